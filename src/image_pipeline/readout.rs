//! Cursor readout: raw values and local statistics around a pixel.

use crate::image_pipeline::frame::Intensity16Frame;

/// Half-size of the sampled square around the cursor.
pub const DEFAULT_READOUT_RADIUS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct RegionReadout {
    pub x: usize,
    pub y: usize,
    pub value: u16,
    pub high_byte: u8,
    pub low_byte: u8,
    /// Nominal side length of the sampled square, `2 * radius + 1`
    pub region_size: usize,
    /// Samples actually covered after clipping to the frame
    pub sample_count: usize,
    pub min: u16,
    pub max: u16,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl RegionReadout {
    /// Samples the square window centered on `(x, y)`; `None` when the cursor is outside the frame.
    pub fn sample(frame: &Intensity16Frame, x: usize, y: usize, radius: usize) -> Option<Self> {
        let value = frame.get(x, y)?;

        let x0 = x.saturating_sub(radius);
        let x1 = (x + radius + 1).min(frame.width());
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius + 1).min(frame.height());

        let mut min = u16::MAX;
        let mut max = u16::MIN;
        let mut sum = 0f64;
        let mut sum_sq = 0f64;
        for row in y0..y1 {
            for &v in &frame.row(row)[x0..x1] {
                min = min.min(v);
                max = max.max(v);
                let v = f64::from(v);
                sum += v;
                sum_sq += v * v;
            }
        }

        let count = (x1 - x0) * (y1 - y0);
        let mean = sum / count as f64;
        let variance = (sum_sq / count as f64 - mean * mean).max(0.0);

        Some(Self {
            x,
            y,
            value,
            high_byte: (value >> 8) as u8,
            low_byte: (value & 0xFF) as u8,
            region_size: 2 * radius + 1,
            sample_count: count,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
