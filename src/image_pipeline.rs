//! Image processing pipeline module
//!
//! Turns one captured dual-plane frame into a 16-bit intensity frame, a display
//! frame and a false-color preview, with histogram and cursor analyses on the side.

pub mod common;
pub mod decode;
pub mod export;
pub mod frame;
pub mod histogram;
pub mod normalize;
pub mod palette;
pub mod pipeline;
pub mod readout;
pub mod recorder;
pub mod sharpen;
pub mod timing;


pub use common::{PipelineError, Result};

pub use frame::{
    ColorFrame, DisplayFrame8, FrameSource, ImageFileSource, Intensity16Frame, RawDualFrame,
    load_dual_frame,
};

pub use decode::{BitPlaneDecoder, DEFAULT_PLANE_CHANNEL};

pub use normalize::{DisplayWindow, NormalizationEngine, RangeConfig, RangeMode};

pub use sharpen::{SharpenLevel, SharpeningStage};

pub use palette::{PaletteKind, PaletteMapper, PaletteSelection};

pub use histogram::{HISTOGRAM_BINS, HistogramAnalyzer, HistogramReport, WindowMarkers};

pub use readout::{DEFAULT_READOUT_RADIUS, RegionReadout};

pub use export::{ExportConfig, SnapshotExporter, TiffCompression};

pub use recorder::{PngSequenceSink, RECORD_FPS, Recorder, RecordingSummary, VideoSink};

pub use pipeline::{FrameOutput, FramePipeline};

pub use timing::{PipelineTimings, StageTiming, Timer};
