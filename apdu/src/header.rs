// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Command frame header
//!
//! ## Encoding
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |      CLA      |      INS      |      P1       |      P2       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |      LC       |                                               |
//! +-+-+-+-+-+-+-+-+                                               +
//! /                         DATA (LC bytes)                       /
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use encdec::{Decode, Encode};

use crate::{ApduError, ApduStatic, NEAR_APDU_P2};

/// Command header fields
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ApduHeader {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
}

impl ApduHeader {
    /// Build a header for a static APDU type with the provided `P1`
    pub fn for_apdu<A: ApduStatic>(p1: u8) -> Self {
        Self {
            cla: A::CLA,
            ins: A::INS,
            p1,
            p2: NEAR_APDU_P2,
        }
    }
}

/// Command frame, header plus borrowed data
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Command<'a> {
    pub header: ApduHeader,
    pub data: &'a [u8],
}

impl<'a> Command<'a> {
    /// Length of the header including `LC`
    pub const HEADER_LEN: usize = 5;

    /// Create a new command frame
    pub fn new(header: ApduHeader, data: &'a [u8]) -> Self {
        Self { header, data }
    }
}

impl<'a> Encode for Command<'a> {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(Self::HEADER_LEN + self.data.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let n = Self::HEADER_LEN + self.data.len();

        if self.data.len() > u8::MAX as usize || buff.len() < n {
            return Err(ApduError::InvalidLength);
        }

        buff[0] = self.header.cla;
        buff[1] = self.header.ins;
        buff[2] = self.header.p1;
        buff[3] = self.header.p2;
        buff[4] = self.data.len() as u8;
        buff[Self::HEADER_LEN..n].copy_from_slice(self.data);

        Ok(n)
    }
}

impl<'a> Decode<'a> for Command<'a> {
    type Output = Self;

    type Error = ApduError;

    /// Decode a command frame, `LC` must match the remaining frame length exactly
    fn decode(buff: &'a [u8]) -> Result<(Self::Output, usize), ApduError> {
        if buff.len() < Self::HEADER_LEN {
            return Err(ApduError::InvalidLength);
        }

        let header = ApduHeader {
            cla: buff[0],
            ins: buff[1],
            p1: buff[2],
            p2: buff[3],
        };

        let lc = buff[4] as usize;
        let data = &buff[Self::HEADER_LEN..];
        if data.len() != lc {
            return Err(ApduError::InvalidLength);
        }

        Ok((Self { header, data }, buff.len()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{app_config::AppConfigReq, NEAR_APDU_CLA};

    #[test]
    fn decode_command() {
        let frame = [0x80, 0x02, 0x80, 0x57, 0x03, 0x01, 0x02, 0x03];

        let (c, n) = Command::decode(&frame).unwrap();
        assert_eq!(n, frame.len());
        assert_eq!(c.header.cla, NEAR_APDU_CLA);
        assert_eq!(c.header.ins, 0x02);
        assert_eq!(c.header.p1, 0x80);
        assert_eq!(c.data, &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn decode_length_mismatch() {
        // Short header
        assert!(Command::decode(&[0x80, 0x06, 0x00, 0x00]).is_err());

        // LC larger than the data provided
        assert!(Command::decode(&[0x80, 0x06, 0x00, 0x00, 0x02, 0x01]).is_err());

        // LC smaller than the data provided
        assert!(Command::decode(&[0x80, 0x06, 0x00, 0x00, 0x00, 0x01]).is_err());
    }

    #[test]
    fn encode_static_header() {
        let h = ApduHeader::for_apdu::<AppConfigReq>(0x00);
        let c = Command::new(h, &[]);

        let mut buff = [0u8; 8];
        let n = c.encode(&mut buff).unwrap();

        assert_eq!(&buff[..n], &[0x80, 0x06, 0x00, 0x57, 0x00]);
    }
}
