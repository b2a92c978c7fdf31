use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::export::types::ExportConfig;
use crate::image_pipeline::frame::{ColorFrame, Intensity16Frame};

pub trait TiffWriter {
    fn write_tiff(&self, frame: &Intensity16Frame, output: &mut dyn Write, config: &ExportConfig) -> Result<()>;
}

pub trait PreviewWriter {
    fn write_preview(&self, frame: &ColorFrame, output: &mut dyn Write) -> Result<()>;
}
