//! Fixed device command frames.
//!
//! Layout: header `AA`, length `05`, command `00 16`, sub-command `01`, parameter,
//! checksum, trailer `EB AA`. The checksum is the low byte of the sum of the six
//! bytes before it.

pub const FRAME_HEADER: u8 = 0xAA;
pub const FRAME_TRAILER: [u8; 2] = [0xEB, 0xAA];

/// Low byte of the wrapping sum of `bytes`.
pub const fn checksum(bytes: &[u8]) -> u8 {
    let mut sum = 0u8;
    let mut i = 0;
    while i < bytes.len() {
        sum = sum.wrapping_add(bytes[i]);
        i += 1;
    }
    sum
}

const fn nuc_frame(parameter: u8) -> [u8; 9] {
    let body = [FRAME_HEADER, 0x05, 0x00, 0x16, 0x01, parameter];
    [
        body[0],
        body[1],
        body[2],
        body[3],
        body[4],
        body[5],
        checksum(&body),
        FRAME_TRAILER[0],
        FRAME_TRAILER[1],
    ]
}

/// Non-uniformity correction using the shutter.
pub const NUC_NORMAL: [u8; 9] = nuc_frame(0x00);
/// Non-uniformity correction without closing the shutter.
pub const NUC_NO_SHUTTER: [u8; 9] = nuc_frame(0x02);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    NucNormal,
    NucNoShutter,
}

impl DeviceCommand {
    pub fn bytes(self) -> &'static [u8] {
        match self {
            Self::NucNormal => &NUC_NORMAL,
            Self::NucNoShutter => &NUC_NO_SHUTTER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NucNormal => "NUC",
            Self::NucNoShutter => "NUC (no shutter)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::hex::parse_hex;

    #[test]
    fn nuc_frames_match_device_documentation() {
        assert_eq!(NUC_NORMAL.to_vec(), parse_hex("AA 05 00 16 01 00 C6 EB AA").unwrap());
        assert_eq!(NUC_NO_SHUTTER.to_vec(), parse_hex("AA 05 00 16 01 02 C8 EB AA").unwrap());
    }

    #[test]
    fn checksum_covers_first_six_bytes() {
        for frame in [NUC_NORMAL, NUC_NO_SHUTTER] {
            assert_eq!(frame[6], checksum(&frame[..6]));
            assert_eq!(frame[0], FRAME_HEADER);
            assert_eq!(&frame[7..], &FRAME_TRAILER);
        }
    }

    #[test]
    fn checksum_wraps() {
        assert_eq!(checksum(&[0xFF, 0x02]), 0x01);
    }

    #[test]
    fn commands_expose_their_frames() {
        assert_eq!(DeviceCommand::NucNormal.bytes(), &NUC_NORMAL);
        assert_eq!(DeviceCommand::NucNoShutter.bytes(), &NUC_NO_SHUTTER);
    }
}
