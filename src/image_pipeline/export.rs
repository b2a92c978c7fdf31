//! Snapshot export module
//!
//! Raw 16-bit TIFF and color PNG snapshots of the current frame.

mod png_writer;
mod snapshot;
mod standard_tiff_writer;
pub mod types;
mod writer;

pub use png_writer::PngPreviewWriter;
pub use snapshot::{SnapshotExporter, snapshot_stem};
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{ExportConfig, TiffCompression};
pub use writer::{PreviewWriter, TiffWriter};
