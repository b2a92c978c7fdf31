//! Sharpening level types

/// Blur kernel size and blend strength of an unsharp mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnsharpParams {
    /// Odd Gaussian kernel size
    pub kernel_size: usize,
    /// Weight of `original - blurred` added back to the original
    pub strength: f32,
}

/// Operator-selectable sharpening presets, in cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharpenLevel {
    #[default]
    Off,
    Low,
    Medium,
    High,
}

impl SharpenLevel {
    pub const ALL: [SharpenLevel; 4] = [Self::Off, Self::Low, Self::Medium, Self::High];

    pub fn params(self) -> Option<UnsharpParams> {
        match self {
            Self::Off => None,
            Self::Low => Some(UnsharpParams { kernel_size: 5, strength: 0.5 }),
            Self::Medium => Some(UnsharpParams { kernel_size: 5, strength: 1.0 }),
            Self::High => Some(UnsharpParams { kernel_size: 7, strength: 1.5 }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&l| l == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn is_active(self) -> bool {
        self != Self::Off
    }
}
