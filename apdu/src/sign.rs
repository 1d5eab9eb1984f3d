// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction and blind signing APDUs
//!
//! Structured signing streams `DERIVATION_PATH || TRANSACTION` across one or more
//! [`SignChunk`] frames, with `P1` set to [`SignMode::More`] for all but the final
//! frame ([`SignMode::Last`]). Blind signing sends a single [`BlindSignReq`]
//! with `P1` set to [`SignMode::Blind`].
//!
//! Both return a [`SignatureResp`] following user approval.

use encdec::{Decode, DecodeOwned, Encode};
use num_enum::TryFromPrimitive;
use static_assertions::const_assert_eq;

use super::{ApduError, ApduStatic, Instruction, NEAR_APDU_CLA};
use crate::path::DerivationPath;

/// Hash length for blind signing
pub const HASH_LEN: usize = 32;

/// Blind signing payload length, derivation path followed by a single hash
pub const BLIND_PAYLOAD_LEN: usize = DerivationPath::LEN + HASH_LEN;

const_assert_eq!(BLIND_PAYLOAD_LEN, 52);

/// Signing mode, carried in `P1`
#[derive(Copy, Clone, PartialEq, Eq, Debug, TryFromPrimitive)]
#[repr(u8)]
pub enum SignMode {
    /// Non-terminal transaction fragment
    More = 0x00,
    /// Terminal transaction fragment
    Last = 0x80,
    /// Blind signing, single frame containing path and hash
    Blind = 0x01,
}

/// Transaction signing fragment
///
/// The first fragment of a message starts with the encoded [`DerivationPath`],
/// the remainder of the message is the serialized transaction.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SignChunk<'a> {
    pub data: &'a [u8],
}

impl<'a> SignChunk<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> ApduStatic for SignChunk<'a> {
    const CLA: u8 = NEAR_APDU_CLA;
    const INS: u8 = Instruction::Sign as u8;
}

impl<'a> Encode for SignChunk<'a> {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(self.data.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < self.data.len() {
            return Err(ApduError::InvalidLength);
        }

        buff[..self.data.len()].copy_from_slice(self.data);

        Ok(self.data.len())
    }
}

impl<'a> Decode<'a> for SignChunk<'a> {
    type Output = Self;

    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self::Output, usize), ApduError> {
        Ok((Self { data: buff }, buff.len()))
    }
}

/// Blind signing request, signs the provided hash directly
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /                DERIVATION_PATH (5 x u32 BE)                   /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                            HASH                               /
/// /                         (32 bytes)                            /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct BlindSignReq {
    pub path: DerivationPath,
    pub hash: [u8; HASH_LEN],
}

impl BlindSignReq {
    pub fn new(path: DerivationPath, hash: [u8; HASH_LEN]) -> Self {
        Self { path, hash }
    }
}

impl ApduStatic for BlindSignReq {
    const CLA: u8 = NEAR_APDU_CLA;
    const INS: u8 = Instruction::Sign as u8;
}

impl Encode for BlindSignReq {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(BLIND_PAYLOAD_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < BLIND_PAYLOAD_LEN {
            return Err(ApduError::InvalidLength);
        }

        let n = self.path.encode(buff)?;
        buff[n..][..HASH_LEN].copy_from_slice(&self.hash);

        Ok(BLIND_PAYLOAD_LEN)
    }
}

impl DecodeOwned for BlindSignReq {
    type Output = Self;

    type Error = ApduError;

    /// Decode a blind signing request, the payload must be exactly [`BLIND_PAYLOAD_LEN`] bytes
    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        if buff.len() != BLIND_PAYLOAD_LEN {
            return Err(ApduError::InvalidLength);
        }

        let (path, n) = DerivationPath::decode_owned(buff)?;

        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(&buff[n..]);

        Ok((Self { path, hash }, BLIND_PAYLOAD_LEN))
    }
}

/// Signature response APDU, contains a 64-byte ed25519 signature
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                            SIGNATURE                          /
/// /                   (64-byte ed25519 signature)                 /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct SignatureResp {
    pub signature: [u8; 64],
}

impl SignatureResp {
    pub fn new(signature: [u8; 64]) -> Self {
        Self { signature }
    }
}
