use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerialError {
    #[error("Invalid hex command: {0}")]
    InvalidHex(String),

    #[error("Command is empty")]
    EmptyCommand,

    #[error("Serial port is not connected")]
    NotConnected,

    #[error("Failed to open {port}: {reason}")]
    Open { port: String, reason: String },

    #[error("Serial read failed: {0}")]
    Read(String),

    #[error("Serial write failed: {0}")]
    Write(String),

    #[error("Failed to enumerate serial ports: {0}")]
    Enumerate(String),

    #[error("Unsupported baud rate {0}")]
    UnsupportedBaud(u32),

    #[error("Reader thread panicked")]
    ReaderPanicked,
}

pub type Result<T> = std::result::Result<T, SerialError>;
