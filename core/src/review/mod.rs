// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Review plans, the ordered (label, value) fields presented to the user
//! prior to approval.
//!
//! Plans are independent of the display toolkit, the platform pages through
//! [ReviewPlan::fields] and reports navigation via [UserInput][crate::engine::UserInput].

use alloc::{format, string::String, vec::Vec};
use core::fmt::{self, Write};

use crate::tx::PublicKey;

mod render;
pub use render::TxRenderer;

/// Maximum review label length
pub const LABEL_LEN: usize = 32;

/// Review field label
pub type Label = heapless::String<LABEL_LEN>;

/// Single review field
#[derive(Clone, PartialEq, Debug)]
pub struct ReviewField {
    pub label: Label,
    pub value: String,
}

/// Ordered review fields for a single command
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ReviewPlan {
    fields: Vec<ReviewField>,
}

impl ReviewPlan {
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Review plan for a public key request
    pub fn for_public_key(public_key: &[u8; 32]) -> Self {
        let mut p = Self::new();
        p.push("Public Key", format!("{}", PublicKey::ed25519(*public_key)));
        p
    }

    /// Review plan for a wallet id request
    pub fn for_wallet_id(public_key: &[u8; 32]) -> Self {
        let mut p = Self::new();
        p.push("Wallet ID", hex_string(public_key));
        p
    }

    /// Review plan for blind signing, only the hash is displayed
    pub fn for_blind_hash(hash: &[u8; 32]) -> Self {
        let mut p = Self::new();
        p.push("Base58 Hash", bs58::encode(hash).into_string());
        p
    }

    /// Append a field, labels are truncated to [`LABEL_LEN`]
    pub fn push(&mut self, label: &str, value: String) {
        let mut l = Label::new();
        for c in label.chars() {
            if l.push(c).is_err() {
                break;
            }
        }

        self.fields.push(ReviewField { label: l, value })
    }

    /// Append a field with a formatted label
    pub fn push_fmt(&mut self, label: fmt::Arguments, value: String) {
        self.push(&format!("{label}"), value)
    }

    pub fn fields(&self) -> &[ReviewField] {
        &self.fields
    }

    pub fn get(&self, index: usize) -> Option<&ReviewField> {
        self.fields.get(index)
    }

    /// Fetch the value of the first field with the provided label
    pub fn find(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label.as_str() == label)
            .map(|f| f.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ReviewPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.fields {
            writeln!(f, "{}: {}", r.label, r.value)?;
        }
        Ok(())
    }
}

/// Uppercase hex rendering
pub(crate) fn hex_string(d: &[u8]) -> String {
    let mut s = String::with_capacity(d.len() * 2);
    for b in d {
        let _ = write!(s, "{b:02X}");
    }
    s
}
