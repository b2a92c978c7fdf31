use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Dual frame width must be even, got {0}")]
    OddWidth(usize),

    #[error("Frame buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Plane channel {channel} out of range for {channels}-channel frame")]
    ChannelOutOfRange { channel: usize, channels: usize },

    #[error("Frame size mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    SizeMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    #[error("Failed to read capture: {0}")]
    CaptureError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Failed to encode PNG image: {0}")]
    PngError(String),

    #[error("Video sink error: {0}")]
    SinkError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
