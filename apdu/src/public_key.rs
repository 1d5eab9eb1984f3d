// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Public key and wallet id APDUs

use encdec::{Decode, Encode};
use num_enum::TryFromPrimitive;

use super::{ApduError, ApduStatic, Instruction, NEAR_APDU_CLA};
use crate::path::DerivationPath;

/// On-device confirmation mode for [`PublicKeyReq`], carried in `P1`
#[derive(Copy, Clone, PartialEq, Eq, Debug, TryFromPrimitive)]
#[repr(u8)]
pub enum KeyDisplay {
    /// Display and require approval before returning the key
    Confirm = 0x00,
    /// Return the key without user interaction
    Silent = 0x01,
}

/// Request the ed25519 public key for a derivation path,
/// returns a [`PublicKeyResp`] (following approval where [`KeyDisplay::Confirm`] is set).
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /                DERIVATION_PATH (5 x u32 BE)                   /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct PublicKeyReq {
    pub path: DerivationPath,
}

impl PublicKeyReq {
    pub fn new(path: DerivationPath) -> Self {
        Self { path }
    }
}

impl ApduStatic for PublicKeyReq {
    const CLA: u8 = NEAR_APDU_CLA;
    const INS: u8 = Instruction::GetPublicKey as u8;
}

/// Request the wallet id for a derivation path, always displayed for approval.
///
/// Encoded identically to [`PublicKeyReq`].
#[derive(Copy, Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct WalletIdReq {
    pub path: DerivationPath,
}

impl WalletIdReq {
    pub fn new(path: DerivationPath) -> Self {
        Self { path }
    }
}

impl ApduStatic for WalletIdReq {
    const CLA: u8 = NEAR_APDU_CLA;
    const INS: u8 = Instruction::GetWalletId as u8;
}

/// Public key response APDU, contains the derived ed25519 public key
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                          PUBLIC_KEY                           /
/// /                  (32-byte ed25519 public key)                 /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct PublicKeyResp {
    pub public_key: [u8; 32],
}

impl PublicKeyResp {
    pub fn new(public_key: [u8; 32]) -> Self {
        Self { public_key }
    }
}

#[cfg(test)]
mod test {
    use rand::random;

    use super::*;
    use crate::test::encode_decode_apdu;

    #[test]
    fn public_key_req_apdu() {
        let apdu = PublicKeyReq::new(DerivationPath::account(random()));

        let mut buff = [0u8; 64];
        let n = encode_decode_apdu(&mut buff, &apdu);
        assert_eq!(n, DerivationPath::LEN);
    }

    #[test]
    fn public_key_resp_apdu() {
        let apdu = PublicKeyResp::new(random());

        let mut buff = [0u8; 64];
        encode_decode_apdu(&mut buff, &apdu);
    }

    #[test]
    fn key_display_p1() {
        assert!(matches!(KeyDisplay::try_from(0x00), Ok(KeyDisplay::Confirm)));
        assert!(matches!(KeyDisplay::try_from(0x01), Ok(KeyDisplay::Silent)));
        assert!(KeyDisplay::try_from(0x02).is_err());
    }
}
