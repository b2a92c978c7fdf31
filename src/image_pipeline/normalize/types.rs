//! Display range configuration types

/// Full-scale width used when no manual window has been chosen.
pub const DEFAULT_MANUAL_WIDTH: u16 = u16::MAX;

/// How the 16-bit window mapped onto 0..=255 is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// Window follows empirical percentiles of each frame
    #[default]
    Auto,
    /// Window is the operator's fixed offset/width
    Manual,
}

impl RangeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Auto,
        }
    }
}

/// Normalization window configuration.
///
/// Fields are private so the invariants (`manual_width >= 1`, percentiles in
/// `[0, 100]` with `low <= high`) are enforced at every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeConfig {
    mode: RangeMode,
    manual_offset: u16,
    manual_width: u16,
    auto_low_percentile: f64,
    auto_high_percentile: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            mode: RangeMode::Auto,
            manual_offset: 0,
            manual_width: DEFAULT_MANUAL_WIDTH,
            auto_low_percentile: 0.0,
            auto_high_percentile: 100.0,
        }
    }
}

fn clamp_percentile(value: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 100.0)
    }
}

impl RangeConfig {
    pub fn builder() -> RangeConfigBuilder {
        RangeConfigBuilder::default()
    }

    pub fn mode(&self) -> RangeMode {
        self.mode
    }

    pub fn is_manual(&self) -> bool {
        self.mode == RangeMode::Manual
    }

    pub fn set_mode(&mut self, mode: RangeMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> RangeMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn manual_offset(&self) -> u16 {
        self.manual_offset
    }

    pub fn set_manual_offset(&mut self, offset: u16) {
        self.manual_offset = offset;
    }

    pub fn manual_width(&self) -> u16 {
        self.manual_width
    }

    /// Sets the manual window width, raising zero to one.
    pub fn set_manual_width(&mut self, width: u16) {
        self.manual_width = width.max(1);
    }

    /// `(low, high)` percentile bounds used in auto mode.
    pub fn percentiles(&self) -> (f64, f64) {
        (self.auto_low_percentile, self.auto_high_percentile)
    }

    /// Sets the auto-mode percentiles, clamping into `[0, 100]` and pulling
    /// `low` down to `high` when they cross.
    pub fn set_percentiles(&mut self, low: f64, high: f64) {
        let high = clamp_percentile(high, 100.0);
        let low = clamp_percentile(low, 0.0).min(high);
        self.auto_low_percentile = low;
        self.auto_high_percentile = high;
    }
}

/// Builder for RangeConfig
#[derive(Default)]
pub struct RangeConfigBuilder {
    mode: Option<RangeMode>,
    manual_offset: Option<u16>,
    manual_width: Option<u16>,
    percentiles: Option<(f64, f64)>,
}

impl RangeConfigBuilder {
    pub fn mode(mut self, mode: RangeMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn manual_offset(mut self, offset: u16) -> Self {
        self.manual_offset = Some(offset);
        self
    }

    pub fn manual_width(mut self, width: u16) -> Self {
        self.manual_width = Some(width);
        self
    }

    pub fn percentiles(mut self, low: f64, high: f64) -> Self {
        self.percentiles = Some((low, high));
        self
    }

    pub fn build(self) -> RangeConfig {
        let mut config = RangeConfig::default();
        if let Some(mode) = self.mode {
            config.set_mode(mode);
        }
        if let Some(offset) = self.manual_offset {
            config.set_manual_offset(offset);
        }
        if let Some(width) = self.manual_width {
            config.set_manual_width(width);
        }
        if let Some((low, high)) = self.percentiles {
            config.set_percentiles(low, high);
        }
        config
    }
}
