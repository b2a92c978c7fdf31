//! Serial command channel
//!
//! Full-duplex byte link to the camera's control port: a background reader
//! collecting inbound chunks, hex command sending, and fixed device commands.

mod channel;
pub mod commands;
mod error;
pub mod hex;
mod rx_log;
mod system_transport;
mod transport;
pub mod types;

#[cfg(test)]
mod tests;

pub use channel::{POLL_INTERVAL, READ_TIMEOUT, SerialChannel};
pub use commands::{DeviceCommand, NUC_NO_SHUTTER, NUC_NORMAL};
pub use error::{Result, SerialError};
pub use hex::{format_hex, parse_hex};
pub use rx_log::{RX_LOG_CAPACITY, RxLog, RxRecord};
pub use system_transport::SystemTransportProvider;
pub use transport::{SerialTransport, TransportProvider};
pub use types::{BaudRate, ChannelState, SerialSession};
