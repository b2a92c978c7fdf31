//! Text ⇄ byte conversion for the operator's hex command line.

use crate::serial::error::{Result, SerialError};

/// Parses hex pairs, ignoring all whitespace. `"aa 05 00"` → `[0xAA, 0x05, 0x00]`.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.is_empty() {
        return Err(SerialError::EmptyCommand);
    }
    if digits.len() % 2 != 0 {
        return Err(SerialError::InvalidHex(format!("odd number of digits in {text:?}")));
    }

    digits
        .chunks_exact(2)
        .map(|pair| {
            let hi = nibble(pair[0]);
            let lo = nibble(pair[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => Err(SerialError::InvalidHex(format!(
                    "{:?} is not a hex byte",
                    String::from_utf8_lossy(pair)
                ))),
            }
        })
        .collect()
}

fn nibble(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|d| d as u8)
}

/// Uppercase hex without separators.
pub fn format_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02X}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(parse_hex("AA05").unwrap(), vec![0xAA, 0x05]);
        assert_eq!(parse_hex(" aa 0 5\t").unwrap(), vec![0xAA, 0x05]);
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(parse_hex("ZZ"), Err(SerialError::InvalidHex(_))));
        assert!(matches!(parse_hex("ABC"), Err(SerialError::InvalidHex(_))));
        assert!(matches!(parse_hex("+1"), Err(SerialError::InvalidHex(_))));
    }

    #[test]
    fn blank_text_is_empty_command() {
        assert!(matches!(parse_hex(""), Err(SerialError::EmptyCommand)));
        assert!(matches!(parse_hex("   "), Err(SerialError::EmptyCommand)));
    }

    #[test]
    fn formats_uppercase_without_separators() {
        assert_eq!(format_hex(&[0x01, 0xab, 0xFF]), "01ABFF");
        assert_eq!(format_hex(&[]), "");
    }
}
