// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Prelude to simplify downstream use of APDU objects
//!

pub use crate::{
    app_config::{AppConfigReq, AppConfigResp},
    header::{ApduHeader, Command},
    path::DerivationPath,
    public_key::{KeyDisplay, PublicKeyReq, PublicKeyResp, WalletIdReq},
    sign::{BlindSignReq, SignChunk, SignMode, SignatureResp, BLIND_PAYLOAD_LEN, HASH_LEN},
    status::StatusWord,
    Instruction, NEAR_APDU_CLA,
};
