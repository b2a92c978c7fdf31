use tracing::trace;

use crate::image_pipeline::frame::DisplayFrame8;
use crate::image_pipeline::sharpen::gaussian::gaussian_blur;
use crate::image_pipeline::sharpen::types::{SharpenLevel, UnsharpParams};

/// Unsharp-mask edge enhancement on normalized frames.
///
/// `sharpened = clip(original + strength * (original - blurred), 0, 255)`,
/// evaluated in `f32`. Stateless; `Off` returns the input unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct SharpeningStage;

impl SharpeningStage {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, frame: &DisplayFrame8, level: SharpenLevel) -> DisplayFrame8 {
        match level.params() {
            None => frame.clone(),
            Some(params) => self.unsharp(frame, params),
        }
    }

    pub fn unsharp(&self, frame: &DisplayFrame8, params: UnsharpParams) -> DisplayFrame8 {
        trace!(kernel = params.kernel_size, strength = params.strength, "Unsharp mask");
        let blurred = gaussian_blur(frame, params.kernel_size);
        let out = frame
            .as_slice()
            .iter()
            .zip(blurred.as_slice())
            .map(|(&o, &b)| {
                let o = f32::from(o);
                (o + params.strength * (o - f32::from(b))).clamp(0.0, 255.0) as u8
            })
            .collect();
        frame.with_geometry(out)
    }
}
