// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Protocol / APDU definitions for NEAR app communication
//!
//! This module provides a protocol specification and reference implementation for communication
//! with NEAR hardware wallets.
//!
//! Commands are framed as `CLA INS P1 P2 LC DATA` (see [header]), where `P1` carries
//! command-specific flags (chunk position for signing, confirmation mode for key requests)
//! and `P2` is reserved. Responses carry a payload followed by a [status::StatusWord].
//!
//! Derivation paths are encoded as five big-endian `u32` components (see [path]),
//! matching the encoding produced by existing NEAR host tooling. Transaction bodies are
//! borsh-encoded and opaque at this layer, see `ledger-near-core` for decoding.

#![no_std]

#[cfg(test)]
extern crate std;

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter};

pub use ledger_proto::{ApduError, ApduReq, ApduStatic};

pub mod app_config;
pub mod header;
pub mod path;
pub mod prelude;
pub mod public_key;
pub mod sign;
pub mod status;

/// NEAR APDU Class
pub const NEAR_APDU_CLA: u8 = 0x80;

/// Reserved `P2` value sent by host tooling (ASCII `W`), ignored by the device
pub const NEAR_APDU_P2: u8 = 0x57;

/// Maximum data length for a single command frame
pub const MAX_APDU_DATA: usize = 255;

/// NEAR APDU instruction codes
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumIter, TryFromPrimitive)]
#[repr(u8)]
pub enum Instruction {
    /// Sign a transaction (chunked) or a pre-computed hash (blind)
    Sign = 0x02,

    /// Fetch the ed25519 public key for a derivation path
    GetPublicKey = 0x04,

    /// Fetch the wallet id (public key) for a derivation path, always confirmed
    GetWalletId = 0x05,

    /// Fetch application version
    GetConfiguration = 0x06,
}
