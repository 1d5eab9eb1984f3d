// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Hierarchical key derivation paths
//!
//! Every key-using command is prefixed with a fixed-length path of five `u32`
//! components, each encoded big-endian with the top bit flagging hardened derivation.
//!
//! ## Encoding
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |H|                   PURPOSE (44) (BE)                         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |H|                   COIN_TYPE (397) (BE)                      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |H|                   ACCOUNT (BE)                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |H|                   CHANGE (BE)                               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |H|                   ADDRESS_INDEX (BE)                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use core::fmt::{self, Display};

use byteorder::{BigEndian, ByteOrder};
use encdec::{DecodeOwned, Encode};
use zeroize::Zeroize;

use crate::ApduError;

/// Number of components in a derivation path
pub const PATH_COMPONENTS: usize = 5;

/// Hardened derivation flag
pub const HARDENED: u32 = 0x8000_0000;

/// BIP-0044 purpose component
pub const NEAR_PURPOSE: u32 = 44;

/// SLIP-0044 registered NEAR coin type
pub const NEAR_COIN_TYPE: u32 = 397;

/// Fixed-length key derivation path
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct DerivationPath([u32; PATH_COMPONENTS]);

impl Zeroize for DerivationPath {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl DerivationPath {
    /// Encoded path length in bytes
    pub const LEN: usize = PATH_COMPONENTS * 4;

    /// Create a path from raw (flag-carrying) components
    pub const fn new(components: [u32; PATH_COMPONENTS]) -> Self {
        Self(components)
    }

    /// Default NEAR account path `m/44'/397'/0'/0'/{index}'`
    pub const fn account(index: u32) -> Self {
        Self([
            NEAR_PURPOSE | HARDENED,
            NEAR_COIN_TYPE | HARDENED,
            HARDENED,
            HARDENED,
            index | HARDENED,
        ])
    }

    /// Raw components, including hardening flags
    pub fn components(&self) -> &[u32; PATH_COMPONENTS] {
        &self.0
    }

    /// Check whether the component at `i` is hardened
    pub fn is_hardened(&self, i: usize) -> bool {
        self.0[i] & HARDENED != 0
    }

    /// Component index at `i` with the hardening flag cleared
    pub fn index(&self, i: usize) -> u32 {
        self.0[i] & !HARDENED
    }

    /// Consume a path from the head of `buff`, returning the path and the remaining data
    pub fn parse(buff: &[u8]) -> Result<(Self, &[u8]), ApduError> {
        let (p, n) = Self::decode_owned(buff)?;
        Ok((p, &buff[n..]))
    }
}

impl Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for i in 0..PATH_COMPONENTS {
            write!(f, "/{}", self.index(i))?;
            if self.is_hardened(i) {
                write!(f, "'")?;
            }
        }
        Ok(())
    }
}

impl Encode for DerivationPath {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(Self::LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < Self::LEN {
            return Err(ApduError::InvalidLength);
        }

        BigEndian::write_u32_into(&self.0, &mut buff[..Self::LEN]);

        Ok(Self::LEN)
    }
}

impl DecodeOwned for DerivationPath {
    type Output = Self;

    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        if buff.len() < Self::LEN {
            return Err(ApduError::InvalidLength);
        }

        let mut c = [0u32; PATH_COMPONENTS];
        BigEndian::read_u32_into(&buff[..Self::LEN], &mut c);

        Ok((Self(c), Self::LEN))
    }
}
