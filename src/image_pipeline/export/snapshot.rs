use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, instrument};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::export::png_writer::PngPreviewWriter;
use crate::image_pipeline::export::standard_tiff_writer::StandardTiffWriter;
use crate::image_pipeline::export::types::ExportConfig;
use crate::image_pipeline::export::writer::{PreviewWriter, TiffWriter};
use crate::image_pipeline::frame::{ColorFrame, Intensity16Frame};

/// `<unix-seconds>_thermal`, shared by the raw and preview snapshot of one moment.
pub fn snapshot_stem() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("{secs}_thermal")
}

/// Saves raw 16-bit frames and color previews into a directory.
pub struct SnapshotExporter<T: TiffWriter = StandardTiffWriter, P: PreviewWriter = PngPreviewWriter> {
    directory: PathBuf,
    tiff_writer: T,
    preview_writer: P,
    config: ExportConfig,
}

impl SnapshotExporter<StandardTiffWriter, PngPreviewWriter> {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            tiff_writer: StandardTiffWriter,
            preview_writer: PngPreviewWriter,
            config: ExportConfig::default(),
        }
    }
}

impl<T: TiffWriter, P: PreviewWriter> SnapshotExporter<T, P> {
    pub fn with_custom<D: AsRef<Path>>(directory: D, tiff_writer: T, preview_writer: P, config: ExportConfig) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            tiff_writer,
            preview_writer,
            config,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn create(&self, file_name: String) -> Result<(PathBuf, BufWriter<File>)> {
        let path = self.directory.join(file_name);
        let file = File::create(&path)
            .map_err(|e| PipelineError::IoError(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))))?;
        Ok((path, BufWriter::new(file)))
    }

    #[instrument(skip(self, frame), fields(width = frame.width(), height = frame.height()))]
    pub fn save_raw(&self, frame: &Intensity16Frame) -> Result<PathBuf> {
        let (path, mut output) = self.create(format!("{}.tif", snapshot_stem()))?;
        self.tiff_writer.write_tiff(frame, &mut output, &self.config)?;
        output.flush()?;
        info!(path = %path.display(), "Saved raw 16-bit TIF");
        Ok(path)
    }

    #[instrument(skip(self, frame), fields(width = frame.width(), height = frame.height()))]
    pub fn save_preview(&self, frame: &ColorFrame) -> Result<PathBuf> {
        let (path, mut output) = self.create(format!("{}.png", snapshot_stem()))?;
        self.preview_writer.write_preview(frame, &mut output)?;
        output.flush()?;
        info!(path = %path.display(), "Saved PNG");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_snapshot_round_trips_through_tiff() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Intensity16Frame::from_rows(&[vec![0, 1, 65535], vec![256, 4096, 30000]]).unwrap();

        let path = SnapshotExporter::new(dir.path()).save_raw(&frame).unwrap();
        assert!(path.to_string_lossy().ends_with("_thermal.tif"));

        let mut decoder = tiff::decoder::Decoder::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (3, 2));
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U16(data) => assert_eq!(data, frame.as_slice()),
            _ => panic!("expected 16-bit samples"),
        }
    }

    #[test]
    fn preview_snapshot_is_png() {
        let dir = tempfile::tempdir().unwrap();
        let frame = ColorFrame::new(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();

        let path = SnapshotExporter::new(dir.path()).save_preview(&frame).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SnapshotExporter::new(dir.path().join("absent"));
        let frame = Intensity16Frame::filled(1, 1, 0).unwrap();
        assert!(matches!(exporter.save_raw(&frame), Err(PipelineError::IoError(_))));
    }
}
