//! Frame module
//!
//! Captured dual frames, reconstructed planes, color output and the capture source seam.

mod source;
pub mod types;

pub use source::{FrameSource, ImageFileSource, load_dual_frame};
pub use types::{
    COLOR_CHANNELS, ColorFrame, DUAL_FRAME_CHANNELS, DisplayFrame8, Intensity16Frame, Plane,
    RawDualFrame,
};
