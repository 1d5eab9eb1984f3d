// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Response status words

use encdec::{DecodeOwned, Encode};
use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter};

use crate::ApduError;

/// Status word appended to every response
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter, TryFromPrimitive)]
#[repr(u16)]
pub enum StatusWord {
    /// Command completed successfully
    Ok = 0x9000,

    /// Request rejected by the user on-device
    UserRejected = 0x6985,

    /// Blind signing requested while disabled in settings
    BlindSigningDisabled = 0x6192,

    /// Blind signing payload is not exactly path + hash
    BlindPayloadWrongLength = 0x6191,

    /// Message exceeds the device reassembly buffer
    BufferOverflow = 0x6990,

    /// Malformed input (all decode failures)
    ParsingError = 0x6991,

    /// Command not allowed in the current session state
    CommandNotAllowed = 0x6986,

    /// Operation refused by the signer (unapproved or outside the account namespace)
    SecurityStatusNotSatisfied = 0x6982,

    /// Frame length does not match the declared data length
    WrongDataLength = 0x6A87,

    /// Unsupported P1 / P2 value
    IncorrectP1P2 = 0x6A86,

    /// Unsupported instruction
    InsNotSupported = 0x6D00,

    /// Unsupported class
    ClaNotSupported = 0x6E00,

    /// Internal failure
    Internal = 0x6F00,
}

impl StatusWord {
    /// Check whether this status indicates success
    pub fn is_ok(&self) -> bool {
        *self == StatusWord::Ok
    }
}

impl From<StatusWord> for u16 {
    fn from(s: StatusWord) -> Self {
        s as u16
    }
}

impl Encode for StatusWord {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(2)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < 2 {
            return Err(ApduError::InvalidLength);
        }

        buff[..2].copy_from_slice(&(*self as u16).to_be_bytes());

        Ok(2)
    }
}

impl DecodeOwned for StatusWord {
    type Output = Self;

    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        if buff.len() < 2 {
            return Err(ApduError::InvalidLength);
        }

        match Self::try_from(u16::from_be_bytes([buff[0], buff[1]])) {
            Ok(v) => Ok((v, 2)),
            Err(_) => Err(ApduError::InvalidEncoding),
        }
    }
}
