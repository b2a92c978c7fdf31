//! Separable Gaussian blur on 8-bit frames.
//!
//! Sigma is derived from the kernel size (`0.3 * ((k - 1) / 2 - 1) + 0.8`), with the
//! usual binomial tables for kernels up to 7 taps. Borders reflect without
//! repeating the edge sample (`dcb|abcd|cba`).

use crate::image_pipeline::frame::DisplayFrame8;

const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Normalized 1-D Gaussian weights for an odd `size`.
pub fn gaussian_kernel(size: usize) -> Vec<f32> {
    let size = if size % 2 == 0 { size + 1 } else { size };
    if let Some(table) = SMALL_KERNELS.get(size / 2) {
        return table.to_vec();
    }

    let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f64;
    let weights: Vec<f64> = (0..size)
        .map(|i| {
            let d = i as f64 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|w| (w / sum) as f32).collect()
}

fn reflect_101(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = index;
    while i < 0 || i > last {
        i = if i < 0 { -i } else { 2 * last - i };
    }
    i as usize
}

/// Blurs `frame` with a `size`-tap kernel in both directions, rounding back to 8 bits.
pub fn gaussian_blur(frame: &DisplayFrame8, size: usize) -> DisplayFrame8 {
    let kernel = gaussian_kernel(size);
    let radius = (kernel.len() / 2) as isize;
    let (width, height) = (frame.width(), frame.height());
    let src = frame.as_slice();

    let mut horizontal = vec![0f32; src.len()];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            horizontal[y * width + x] = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * f32::from(row[reflect_101(x as isize + k as isize - radius, width)]))
                .sum();
        }
    }

    let mut out = Vec::with_capacity(src.len());
    for y in 0..height {
        for x in 0..width {
            let v: f32 = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let sy = reflect_101(y as isize + k as isize - radius, height);
                    w * horizontal[sy * width + x]
                })
                .sum();
            out.push(v.round().clamp(0.0, 255.0) as u8);
        }
    }

    frame.with_geometry(out)
}
