use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::frame::types::RawDualFrame;

/// Supplies captured dual frames. `Ok(None)` means the stream has ended.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<RawDualFrame>>;
}

/// Replays stored dual captures (any format the `image` crate decodes) in order.
pub struct ImageFileSource {
    pending: VecDeque<PathBuf>,
}

impl ImageFileSource {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            pending: paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

/// Decodes an encoded dual capture into a `RawDualFrame`.
pub fn load_dual_frame(path: &Path) -> Result<RawDualFrame> {
    let decoded = image::open(path)
        .map_err(|e| PipelineError::CaptureError(format!("{}: {}", path.display(), e)))?
        .to_rgb8();
    let (width, height) = decoded.dimensions();
    debug!("Loaded capture {}: {}x{}", path.display(), width, height);
    RawDualFrame::new(width as usize, height as usize, decoded.into_raw())
}

impl FrameSource for ImageFileSource {
    fn next_frame(&mut self) -> Result<Option<RawDualFrame>> {
        match self.pending.pop_front() {
            Some(path) => load_dual_frame(&path).map(Some),
            None => Ok(None),
        }
    }
}
