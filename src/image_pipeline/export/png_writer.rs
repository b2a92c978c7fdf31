use std::io::Write;

use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::export::writer::PreviewWriter;
use crate::image_pipeline::frame::ColorFrame;

/// Writes the clean color preview as an 8-bit RGB PNG.
pub struct PngPreviewWriter;

impl PreviewWriter for PngPreviewWriter {
    fn write_preview(&self, frame: &ColorFrame, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding PNG preview: {}x{}", frame.width(), frame.height());
        PngEncoder::new(output)
            .write_image(
                frame.as_bytes(),
                frame.width() as u32,
                frame.height() as u32,
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| PipelineError::PngError(e.to_string()))
    }
}
