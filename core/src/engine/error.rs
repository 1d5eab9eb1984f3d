// Copyright (c) 2022-2023 The MobileCoin Foundation

use ledger_near_apdu::{status::StatusWord, ApduError};

/// [Engine][super::Engine] errors
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Fragment received out of sequence
    #[cfg_attr(feature = "thiserror", error("fragment out of sequence"))]
    SequenceError = 0x00,

    /// Message exceeds reassembly buffer
    #[cfg_attr(feature = "thiserror", error("message exceeds buffer capacity"))]
    OversizedMessage = 0x01,

    /// Input ended before the value being read
    #[cfg_attr(feature = "thiserror", error("truncated input"))]
    TruncatedInput = 0x02,

    /// Invalid string or option encoding
    #[cfg_attr(feature = "thiserror", error("invalid encoding"))]
    InvalidEncoding = 0x03,

    /// Unrecognised action tag
    #[cfg_attr(feature = "thiserror", error("unknown action type"))]
    UnknownActionType = 0x04,

    /// Unrecognised access key permission tag
    #[cfg_attr(feature = "thiserror", error("unknown permission type"))]
    UnknownPermissionType = 0x05,

    /// Unsupported public key curve
    #[cfg_attr(feature = "thiserror", error("unsupported key type"))]
    UnsupportedKeyType = 0x06,

    /// Data remaining after the transaction
    #[cfg_attr(feature = "thiserror", error("trailing data"))]
    TrailingData = 0x07,

    /// Blind signing is disabled in device settings
    #[cfg_attr(feature = "thiserror", error("blind signing disabled"))]
    BlindSigningDisabled = 0x10,

    /// Blind signing payload is not path + hash
    #[cfg_attr(feature = "thiserror", error("invalid blind signing payload length"))]
    InvalidBlindPayloadLength = 0x11,

    /// Request rejected by the user
    #[cfg_attr(feature = "thiserror", error("rejected by user"))]
    UserRejected = 0x20,

    /// Signing attempted without approval
    #[cfg_attr(feature = "thiserror", error("signing without approval"))]
    Unapproved = 0x21,

    /// Derivation path outside the NEAR account namespace
    #[cfg_attr(feature = "thiserror", error("derivation path rejected"))]
    PathRejected = 0x22,

    /// Review in progress, command refused
    #[cfg_attr(feature = "thiserror", error("review pending"))]
    Busy = 0x23,

    /// Unexpected event
    #[cfg_attr(feature = "thiserror", error("unexpected event"))]
    UnexpectedEvent = 0x30,

    /// Unsupported P1 / P2
    #[cfg_attr(feature = "thiserror", error("incorrect P1 / P2"))]
    IncorrectP1P2 = 0x31,

    /// Unsupported instruction
    #[cfg_attr(feature = "thiserror", error("unsupported instruction"))]
    UnsupportedInstruction = 0x32,

    /// Unsupported class
    #[cfg_attr(feature = "thiserror", error("unsupported class"))]
    UnsupportedClass = 0x33,

    /// Frame length does not match declared length
    #[cfg_attr(feature = "thiserror", error("wrong data length"))]
    WrongDataLength = 0x34,

    /// Response encoding failed
    #[cfg_attr(feature = "thiserror", error("response encoding failed"))]
    EncodingFailed = 0x35,
}

impl Error {
    /// Check whether this error results from malformed command input
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::TruncatedInput
                | Error::InvalidEncoding
                | Error::UnknownActionType
                | Error::UnknownPermissionType
                | Error::UnsupportedKeyType
                | Error::TrailingData
        )
    }

    /// Map an error to the response [`StatusWord`]
    pub fn status(&self) -> StatusWord {
        use Error::*;

        match self {
            e if e.is_malformed() => StatusWord::ParsingError,
            OversizedMessage => StatusWord::BufferOverflow,
            SequenceError | Busy | UnexpectedEvent => StatusWord::CommandNotAllowed,
            BlindSigningDisabled => StatusWord::BlindSigningDisabled,
            InvalidBlindPayloadLength => StatusWord::BlindPayloadWrongLength,
            UserRejected => StatusWord::UserRejected,
            Unapproved | PathRejected => StatusWord::SecurityStatusNotSatisfied,
            IncorrectP1P2 => StatusWord::IncorrectP1P2,
            UnsupportedInstruction => StatusWord::InsNotSupported,
            UnsupportedClass => StatusWord::ClaNotSupported,
            WrongDataLength => StatusWord::WrongDataLength,
            _ => StatusWord::Internal,
        }
    }
}

impl From<Error> for StatusWord {
    fn from(e: Error) -> Self {
        e.status()
    }
}

impl From<ApduError> for Error {
    fn from(e: ApduError) -> Self {
        match e {
            ApduError::InvalidLength => Error::TruncatedInput,
            _ => Error::InvalidEncoding,
        }
    }
}
