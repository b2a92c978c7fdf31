//! Sharpening module
//!
//! Optional unsharp-mask enhancement applied to the normalized frame before color mapping.

pub mod gaussian;
pub mod types;
mod unsharp;

pub use types::{SharpenLevel, UnsharpParams};
pub use unsharp::SharpeningStage;
