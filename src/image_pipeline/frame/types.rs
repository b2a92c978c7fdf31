//! Frame data types flowing through the pipeline

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Channel count of a captured dual frame (the capture driver delivers 3-channel 8-bit images).
pub const DUAL_FRAME_CHANNELS: usize = 3;

/// Channel count of a false-color output frame.
pub const COLOR_CHANNELS: usize = 3;

fn validate_buffer(width: usize, height: usize, channels: usize, actual: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions(width, height));
    }
    let expected = width * height * channels;
    if actual != expected {
        return Err(PipelineError::BufferLength { expected, actual });
    }
    Ok(())
}

/// One captured image holding two equal-width halves side by side.
///
/// The left half carries the high byte plane and the right half the low byte
/// plane of the radiometric signal. Pixels are interleaved, row-major.
#[derive(Debug, Clone)]
pub struct RawDualFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RawDualFrame {
    /// Wraps an interleaved 3-channel buffer of the full capture width.
    ///
    /// Rejects zero sizes, odd widths and buffers whose length does not match.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        validate_buffer(width, height, DUAL_FRAME_CHANNELS, data.len())?;
        if width % 2 != 0 {
            return Err(PipelineError::OddWidth(width));
        }
        Ok(Self { width, height, data })
    }

    /// Builds a dual frame by placing two half images side by side.
    pub fn from_halves(half_width: usize, height: usize, left: &[u8], right: &[u8]) -> Result<Self> {
        validate_buffer(half_width, height, DUAL_FRAME_CHANNELS, left.len())?;
        validate_buffer(half_width, height, DUAL_FRAME_CHANNELS, right.len())?;

        let row_bytes = half_width * DUAL_FRAME_CHANNELS;
        let mut data = Vec::with_capacity(row_bytes * 2 * height);
        for (l, r) in left.chunks_exact(row_bytes).zip(right.chunks_exact(row_bytes)) {
            data.extend_from_slice(l);
            data.extend_from_slice(r);
        }
        Self::new(half_width * 2, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of each half, which is also the width of the reconstructed frame.
    pub fn half_width(&self) -> usize {
        self.width / 2
    }

    pub fn channels(&self) -> usize {
        DUAL_FRAME_CHANNELS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Full-width row `y` as interleaved bytes.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * DUAL_FRAME_CHANNELS;
        &self.data[y * stride..(y + 1) * stride]
    }
}

/// A single-channel 2-D sample grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// Reconstructed 16-bit radiometric samples.
pub type Intensity16Frame = Plane<u16>;

/// 8-bit display luma after normalization.
pub type DisplayFrame8 = Plane<u8>;

impl<T: Copy> Plane<T> {
    pub fn new(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        validate_buffer(width, height, 1, data.len())?;
        Ok(Self { width, height, data })
    }

    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        Self::new(width, height, vec![value; width * height])
    }

    /// Builds a plane from nested rows; every row must have the same length.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(PipelineError::SizeMismatch {
                expected_width: width,
                expected_height: height,
                width: bad.len(),
                height,
            });
        }
        Self::new(width, height, rows.concat())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    pub fn row(&self, y: usize) -> &[T] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Applies `f` to every sample, keeping the geometry.
    pub fn map<U, F: Fn(T) -> U>(&self, f: F) -> Plane<U> {
        Plane {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Wraps `data` in this plane's geometry; `data` must hold `width * height` samples.
    pub(crate) fn with_geometry<U>(&self, data: Vec<U>) -> Plane<U> {
        debug_assert_eq!(data.len(), self.data.len());
        Plane {
            width: self.width,
            height: self.height,
            data,
        }
    }

    pub fn same_size<U>(&self, other: &Plane<U>) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// False-color output, RGB interleaved, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ColorFrame {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        validate_buffer(width, height, COLOR_CHANNELS, data.len())?;
        Ok(Self { width, height, data })
    }

    /// Color frame with the geometry of `plane`; `data` must hold three bytes per sample.
    pub(crate) fn with_plane_geometry<T>(plane: &Plane<T>, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), plane.data.len() * COLOR_CHANNELS);
        Self {
            width: plane.width,
            height: plane.height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * COLOR_CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }
}
