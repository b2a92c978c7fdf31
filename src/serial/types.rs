use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::serial::error::{Result, SerialError};

/// Supported link speeds, in cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BaudRate {
    B9600,
    B19200,
    B38400,
    B57600,
    #[default]
    B115200,
    B230400,
    B460800,
    B921600,
}

impl BaudRate {
    pub const ALL: [BaudRate; 8] = [
        Self::B9600,
        Self::B19200,
        Self::B38400,
        Self::B57600,
        Self::B115200,
        Self::B230400,
        Self::B460800,
        Self::B921600,
    ];

    pub fn rate(self) -> u32 {
        match self {
            Self::B9600 => 9600,
            Self::B19200 => 19200,
            Self::B38400 => 38400,
            Self::B57600 => 57600,
            Self::B115200 => 115200,
            Self::B230400 => 230400,
            Self::B460800 => 460800,
            Self::B921600 => 921600,
        }
    }

    pub fn from_rate(rate: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.rate() == rate)
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&b| b == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = SerialError;

    fn try_from(rate: u32) -> Result<Self> {
        Self::from_rate(rate).ok_or(SerialError::UnsupportedBaud(rate))
    }
}

impl From<BaudRate> for u32 {
    fn from(baud: BaudRate) -> u32 {
        baud.rate()
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rate())
    }
}

/// The open link, owned by the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSession {
    pub port: String,
    pub baud: BaudRate,
}

/// Lifecycle of the serial channel. `Connecting` only exists while the transport is opening.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChannelState {
    #[default]
    Disconnected,
    Connecting,
    Connected { since: Instant },
}

impl ChannelState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Connected { .. } => write!(f, "Connected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_baud_is_115200() {
        assert_eq!(BaudRate::default().rate(), 115200);
        assert_eq!(BaudRate::default().index(), 4);
    }

    #[test]
    fn baud_cycle_wraps() {
        assert_eq!(BaudRate::B460800.next(), BaudRate::B921600);
        assert_eq!(BaudRate::B921600.next(), BaudRate::B9600);
    }

    #[test]
    fn unknown_rate_is_rejected() {
        assert_eq!(BaudRate::from_rate(57600), Some(BaudRate::B57600));
        assert!(BaudRate::from_rate(14400).is_none());
        assert!(matches!(BaudRate::try_from(1u32), Err(SerialError::UnsupportedBaud(1))));
    }

    #[test]
    fn baud_serializes_as_number() {
        assert_eq!(serde_json::to_string(&BaudRate::B9600).unwrap(), "9600");
        let baud: BaudRate = serde_json::from_str("921600").unwrap();
        assert_eq!(baud, BaudRate::B921600);
    }
}
