use tracing::trace;

use crate::image_pipeline::frame::{DisplayFrame8, Intensity16Frame};
use crate::image_pipeline::normalize::percentile::{SAMPLE_LEVELS, SampleHistogram};
use crate::image_pipeline::normalize::types::{RangeConfig, RangeMode};

/// The 16-bit interval mapped linearly onto `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayWindow {
    pub low: f64,
    pub span: f64,
}

impl DisplayWindow {
    /// Window from auto-mode bounds; `high <= low` is widened to `low + 1`.
    pub fn from_bounds(low: f64, high: f64) -> Self {
        let high = if high <= low { low + 1.0 } else { high };
        Self { low, span: high - low }
    }

    pub fn manual(offset: u16, width: u16) -> Self {
        Self {
            low: f64::from(offset),
            span: f64::from(width.max(1)),
        }
    }

    pub fn high(&self) -> f64 {
        self.low + self.span
    }

    /// `clip((x - low) / span * 255, 0, 255)`, truncated.
    pub fn scale(&self, x: u16) -> u8 {
        let scaled = (f64::from(x) - self.low) / self.span * 255.0;
        scaled.clamp(0.0, 255.0) as u8
    }

    /// Precomputes `scale` for every 16-bit level.
    pub fn lookup_table(&self) -> Vec<u8> {
        (0..SAMPLE_LEVELS).map(|v| self.scale(v as u16)).collect()
    }
}

/// Output of one normalization pass.
#[derive(Debug, Clone)]
pub struct NormalizedFrame {
    pub frame: DisplayFrame8,
    pub window: DisplayWindow,
}

/// Maps 16-bit intensity frames to 8-bit display frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizationEngine;

impl NormalizationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolves the window the current configuration selects for `frame`.
    pub fn window(&self, frame: &Intensity16Frame, config: &RangeConfig) -> DisplayWindow {
        match config.mode() {
            RangeMode::Manual => DisplayWindow::manual(config.manual_offset(), config.manual_width()),
            RangeMode::Auto => {
                let (low_p, high_p) = config.percentiles();
                let hist = SampleHistogram::from_frame(frame);
                let low = hist.percentile(low_p);
                let high = hist.percentile(high_p);
                trace!(low, high, "Auto range percentiles");
                DisplayWindow::from_bounds(low, high)
            }
        }
    }

    pub fn normalize(&self, frame: &Intensity16Frame, config: &RangeConfig) -> NormalizedFrame {
        let window = self.window(frame, config);
        let lut = window.lookup_table();
        NormalizedFrame {
            frame: frame.map(|v| lut[usize::from(v)]),
            window,
        }
    }
}
