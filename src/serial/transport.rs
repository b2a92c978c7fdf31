use std::time::Duration;

use crate::serial::error::Result;
use crate::serial::types::BaudRate;

/// An open byte link. Dropping it closes the port.
pub trait SerialTransport: Send {
    fn bytes_available(&mut self) -> Result<usize>;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Enumerates and opens ports.
pub trait TransportProvider {
    fn available_ports(&self) -> Result<Vec<String>>;
    fn open(&self, port: &str, baud: BaudRate, timeout: Duration) -> Result<Box<dyn SerialTransport>>;
}
