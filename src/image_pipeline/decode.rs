//! Bit-plane reconstruction of the 16-bit radiometric frame.

use tracing::trace;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::frame::{DUAL_FRAME_CHANNELS, Intensity16Frame, RawDualFrame};

/// Channel carrying the byte planes in both halves (green, identical in RGB and BGR order).
pub const DEFAULT_PLANE_CHANNEL: usize = 1;

/// Recombines the high plane (left half) and low plane (right half) of a dual frame.
#[derive(Debug, Clone, Copy)]
pub struct BitPlaneDecoder {
    channel: usize,
}

impl Default for BitPlaneDecoder {
    fn default() -> Self {
        Self { channel: DEFAULT_PLANE_CHANNEL }
    }
}

impl BitPlaneDecoder {
    pub fn new(channel: usize) -> Result<Self> {
        if channel >= DUAL_FRAME_CHANNELS {
            return Err(PipelineError::ChannelOutOfRange {
                channel,
                channels: DUAL_FRAME_CHANNELS,
            });
        }
        Ok(Self { channel })
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    /// Produces `(high << 8) | low` for every pixel of one half.
    pub fn decode(&self, frame: &RawDualFrame) -> Result<Intensity16Frame> {
        let half = frame.half_width();
        let height = frame.height();
        let half_bytes = half * DUAL_FRAME_CHANNELS;
        trace!("Decoding dual frame {}x{} -> {}x{}", frame.width(), height, half, height);

        let mut samples = Vec::with_capacity(half * height);
        for y in 0..height {
            let (left, right) = frame.row(y).split_at(half_bytes);
            let high = left.chunks_exact(DUAL_FRAME_CHANNELS).map(|px| px[self.channel]);
            let low = right.chunks_exact(DUAL_FRAME_CHANNELS).map(|px| px[self.channel]);
            samples.extend(high.zip(low).map(|(h, l)| (u16::from(h) << 8) | u16::from(l)));
        }

        Intensity16Frame::new(half, height, samples)
    }
}
