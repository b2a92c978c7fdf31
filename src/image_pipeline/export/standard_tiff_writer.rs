use std::io::Write;

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::export::types::{ExportConfig, TiffCompression};
use crate::image_pipeline::export::writer::TiffWriter;
use crate::image_pipeline::frame::Intensity16Frame;

/// Writes the reconstructed frame as a single-page Gray16 TIFF.
pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(&self, frame: &Intensity16Frame, output: &mut dyn Write, config: &ExportConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", frame.width(), frame.height());

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut buffer = Vec::new();

        {
            let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| PipelineError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => tiff::tags::Predictor::Horizontal,
                    _ => tiff::tags::Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            encoder
                .write_image::<tiff::encoder::colortype::Gray16>(
                    frame.width() as u32,
                    frame.height() as u32,
                    frame.as_slice(),
                )
                .map_err(|e| PipelineError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
