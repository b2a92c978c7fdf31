//! Diagnostic histogram of the 16-bit frame.

use tracing::trace;

use crate::image_pipeline::frame::Intensity16Frame;
use crate::image_pipeline::normalize::RangeConfig;

/// Bin count over the full 16-bit domain.
pub const HISTOGRAM_BINS: usize = 512;

const BIN_SHIFT: u32 = 16 - HISTOGRAM_BINS.trailing_zeros();

/// Active manual window expressed as fractions of the 16-bit domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMarkers {
    /// `offset / 65535`
    pub start: f64,
    /// `min(offset + width, 65535) / 65535`
    pub end: f64,
}

impl WindowMarkers {
    pub fn from_config(config: &RangeConfig) -> Self {
        let max = f64::from(u16::MAX);
        let offset = f64::from(config.manual_offset());
        let end = (offset + f64::from(config.manual_width())).min(max);
        Self {
            start: offset / max,
            end: end / max,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramReport {
    pub bins: Vec<u32>,
    pub min: u16,
    pub max: u16,
    pub mean: f64,
    /// Present only in manual range mode
    pub markers: Option<WindowMarkers>,
}

impl HistogramReport {
    /// Bar heights scaled so the tallest bin reaches `max_height`.
    pub fn bar_heights(&self, max_height: u32) -> Vec<u32> {
        let peak = self.bins.iter().copied().max().unwrap_or(0);
        if peak == 0 {
            return vec![0; self.bins.len()];
        }
        self.bins
            .iter()
            .map(|&c| (u64::from(c) * u64::from(max_height) / u64::from(peak)) as u32)
            .collect()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HistogramAnalyzer;

impl HistogramAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn bin_of(value: u16) -> usize {
        usize::from(value >> BIN_SHIFT)
    }

    pub fn analyze(&self, frame: &Intensity16Frame, config: &RangeConfig) -> HistogramReport {
        let mut bins = vec![0u32; HISTOGRAM_BINS];
        let mut min = u16::MAX;
        let mut max = u16::MIN;
        let mut sum = 0u64;

        for &v in frame.as_slice() {
            bins[Self::bin_of(v)] += 1;
            min = min.min(v);
            max = max.max(v);
            sum += u64::from(v);
        }

        let mean = sum as f64 / frame.len() as f64;
        trace!(min, max, mean, "Histogram computed");

        HistogramReport {
            bins,
            min,
            max,
            mean,
            markers: config.is_manual().then(|| WindowMarkers::from_config(config)),
        }
    }
}
