//! Normalization module
//!
//! Maps reconstructed 16-bit frames onto the 8-bit display range, either from
//! per-frame percentiles or from a fixed operator window.

mod engine;
pub mod percentile;
pub mod types;

pub use engine::{DisplayWindow, NormalizationEngine, NormalizedFrame};
pub use percentile::SampleHistogram;
pub use types::{DEFAULT_MANUAL_WIDTH, RangeConfig, RangeConfigBuilder, RangeMode};
