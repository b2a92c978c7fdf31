//! Exact percentiles of 16-bit samples from a counting histogram.
//!
//! Counting all 65536 levels in one pass gives the full sorted order without a
//! sort, so any order statistic is a cumulative walk over the counts.

use crate::image_pipeline::frame::Intensity16Frame;

/// Number of distinct 16-bit sample levels.
pub const SAMPLE_LEVELS: usize = 1 << 16;

pub struct SampleHistogram {
    counts: Vec<u32>,
    total: usize,
}

impl SampleHistogram {
    pub fn from_frame(frame: &Intensity16Frame) -> Self {
        Self::from_samples(frame.as_slice())
    }

    pub fn from_samples(samples: &[u16]) -> Self {
        let mut counts = vec![0u32; SAMPLE_LEVELS];
        for &v in samples {
            counts[usize::from(v)] += 1;
        }
        Self { counts, total: samples.len() }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Value at zero-based position `k` of the sorted samples (clamped to the last).
    pub fn kth_smallest(&self, k: usize) -> u16 {
        let k = k.min(self.total.saturating_sub(1));
        let mut seen = 0usize;
        for (level, &count) in self.counts.iter().enumerate() {
            seen += count as usize;
            if seen > k {
                return level as u16;
            }
        }
        u16::MAX
    }

    /// Linear-interpolated percentile, `rank = p / 100 * (n - 1)`.
    pub fn percentile(&self, p: f64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let rank = (p.clamp(0.0, 100.0) / 100.0) * (self.total - 1) as f64;
        let lower = rank.floor() as usize;
        let fraction = rank - lower as f64;

        let a = f64::from(self.kth_smallest(lower));
        if fraction == 0.0 {
            return a;
        }
        let b = f64::from(self.kth_smallest(lower + 1));
        a + (b - a) * fraction
    }
}
