// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Application configuration APDUs

use encdec::{Decode, DecodeOwned, Encode};

use super::{ApduError, ApduStatic, Instruction, NEAR_APDU_CLA};

/// Fetch application configuration APDU
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct AppConfigReq {}

impl ApduStatic for AppConfigReq {
    /// Configuration command APDU is class `0x80`
    const CLA: u8 = NEAR_APDU_CLA;

    /// Configuration GET APDU is instruction `0x06`
    const INS: u8 = Instruction::GetConfiguration as u8;
}

impl Encode for AppConfigReq {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn encode(&self, _buff: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

impl DecodeOwned for AppConfigReq {
    type Output = Self;

    type Error = ApduError;

    fn decode_owned(_buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        Ok((Self {}, 0))
    }
}

/// Application configuration response APDU, contains the application version
///
/// ## Encoding
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     MAJOR     |     MINOR     |     PATCH     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct AppConfigResp {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl AppConfigResp {
    /// Create a new configuration response
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::encode_decode_apdu;

    #[test]
    fn app_config_req_apdu() {
        let apdu = AppConfigReq::default();

        let mut buff = [0u8; 16];
        assert_eq!(encode_decode_apdu(&mut buff, &apdu), 0);
    }

    #[test]
    fn app_config_resp_apdu() {
        let apdu = AppConfigResp::new(1, 2, 3);

        let mut buff = [0u8; 16];
        let n = encode_decode_apdu(&mut buff, &apdu);

        assert_eq!(&buff[..n], &[1, 2, 3]);
    }
}
