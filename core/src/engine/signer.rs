// Copyright (c) 2022-2023 The MobileCoin Foundation

//! ed25519 key derivation and signing
//!
//! Derived secrets are held only for the duration of each call and wiped on return.

use ed25519_dalek::{Signer, SigningKey};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use ledger_near_apdu::path::{DerivationPath, NEAR_COIN_TYPE, NEAR_PURPOSE};

use super::{ApprovalState, Driver, Error};

/// Message to be signed
#[derive(Copy, Clone, Debug)]
pub enum SignMessage<'a> {
    /// Serialized transaction, signed as `SHA-256(tx)`
    Transaction(&'a [u8]),
    /// Pre-computed 32-byte hash, signed directly
    Hash(&'a [u8; 32]),
}

/// Check a path falls within the NEAR account namespace (`m/44'/397'/...`)
pub fn check_path(path: &DerivationPath) -> Result<(), Error> {
    let valid = path.is_hardened(0)
        && path.index(0) == NEAR_PURPOSE
        && path.is_hardened(1)
        && path.index(1) == NEAR_COIN_TYPE;

    match valid {
        true => Ok(()),
        false => {
            #[cfg(feature = "log")]
            log::warn!("rejecting path outside account namespace: {}", path);

            Err(Error::PathRejected)
        }
    }
}

/// Derive a signing key for the provided path
fn signing_key<DRV: Driver>(drv: &DRV, path: &DerivationPath) -> Result<SigningKey, Error> {
    check_path(path)?;

    let mut secret = drv.slip10_derive_ed25519(path.components());
    let key = SigningKey::from_bytes(&secret);

    // Clear secret following use
    secret.zeroize();

    Ok(key)
}

/// Derive the ed25519 public key for the provided path
pub fn public_key<DRV: Driver>(drv: &DRV, path: &DerivationPath) -> Result<[u8; 32], Error> {
    let key = signing_key(drv, path)?;
    Ok(key.verifying_key().to_bytes())
}

/// Sign a message, requires a prior approval for this command
#[cfg_attr(feature = "noinline", inline(never))]
pub fn sign<DRV: Driver>(
    drv: &DRV,
    path: &DerivationPath,
    approval: ApprovalState,
    message: SignMessage,
) -> Result<[u8; 64], Error> {
    if !approval.is_approved() {
        #[cfg(feature = "log")]
        log::error!("signing attempted without approval ({})", approval);

        return Err(Error::Unapproved);
    }

    let key = signing_key(drv, path)?;

    let signature = match message {
        SignMessage::Transaction(tx) => {
            let hash: [u8; 32] = Sha256::digest(tx).into();
            key.sign(&hash)
        }
        SignMessage::Hash(hash) => key.sign(hash),
    };

    Ok(signature.to_bytes())
}
