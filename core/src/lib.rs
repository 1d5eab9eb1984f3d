// Copyright (c) 2022-2023 The MobileCoin Foundation

//! NEAR hardware wallet core
//!
//! This provides a common [Engine][engine] supporting transaction review and signing
//! for execution on hardware wallets.
//!
//! Interactions with the [Engine][engine] are performed via [Event][engine::Event]s and [Output][engine::Output]s,
//! see [ledger_near_apdu] for APDU objects and wire encodings. Platforms typically
//! drive the engine through the [dispatch] helpers, supplying raw command frames
//! and user inputs and receiving encoded responses.
//!
//! ## Operations
//!
//! ### Configuration
//!
//! An [`AppConfigReq`][ledger_near_apdu::app_config::AppConfigReq] returns an
//! [`AppConfigResp`][ledger_near_apdu::app_config::AppConfigResp] containing the
//! application version. This is available in every state.
//!
//! ### Public keys
//!
//! A [`PublicKeyReq`][ledger_near_apdu::public_key::PublicKeyReq] returns a
//! [`PublicKeyResp`][ledger_near_apdu::public_key::PublicKeyResp] containing the ed25519
//! public key for the provided path, either immediately or following on-device
//! confirmation. [`WalletIdReq`][ledger_near_apdu::public_key::WalletIdReq] always
//! requires confirmation.
//!
//! ### Signing a transaction
//!
//! 1. Issue [`SignChunk`][ledger_near_apdu::sign::SignChunk]s containing the derivation
//!    path followed by the borsh-serialized transaction, with `P1 = MORE` for each
//!    fragment but the last (`P1 = LAST`)
//! 2. The transaction is decoded and rendered into a [review plan][review::ReviewPlan]
//!    for the user to step through
//! 3. On approval a [`SignatureResp`][ledger_near_apdu::sign::SignatureResp] containing
//!    the ed25519 signature over `SHA-256(tx)` is returned, on rejection
//!    [`UserRejected`][ledger_near_apdu::status::StatusWord::UserRejected]
//!
//! ### Blind signing
//!
//! When enabled in the device settings, a [`BlindSignReq`][ledger_near_apdu::sign::BlindSignReq]
//! containing a path and 32-byte hash displays only the hash, signing it directly
//! on approval.
//!

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use ledger_near_apdu::{self as apdu};

pub mod dispatch;

pub mod engine;

pub mod review;

pub mod tx;
