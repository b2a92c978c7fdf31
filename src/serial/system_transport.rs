use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use tracing::debug;

use crate::serial::error::{Result, SerialError};
use crate::serial::transport::{SerialTransport, TransportProvider};
use crate::serial::types::BaudRate;

/// Host serial ports through the `serialport` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTransportProvider;

impl SystemTransportProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TransportProvider for SystemTransportProvider {
    fn available_ports(&self) -> Result<Vec<String>> {
        let ports = serialport::available_ports().map_err(|e| SerialError::Enumerate(e.to_string()))?;
        debug!(count = ports.len(), "Enumerated serial ports");
        Ok(ports.into_iter().map(|p| p.port_name).collect())
    }

    fn open(&self, port: &str, baud: BaudRate, timeout: Duration) -> Result<Box<dyn SerialTransport>> {
        let handle = serialport::new(port, baud.rate())
            .timeout(timeout)
            .open()
            .map_err(|e| SerialError::Open {
                port: port.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Box::new(SystemTransport { port: handle }))
    }
}

struct SystemTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport for SystemTransport {
    fn bytes_available(&mut self) -> Result<usize> {
        self.port
            .bytes_to_read()
            .map(|n| n as usize)
            .map_err(|e| SerialError::Read(e.to_string()))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(SerialError::Read(e.to_string())),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.port
            .write_all(bytes)
            .and_then(|()| self.port.flush())
            .map_err(|e| SerialError::Write(e.to_string()))
    }
}
