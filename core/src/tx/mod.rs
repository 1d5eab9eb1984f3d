// Copyright (c) 2022-2023 The MobileCoin Foundation

//! NEAR transaction types and streaming decoder
//!
//! Transactions are borsh-encoded:
//!
//! ```text
//! signer_id:    u32 len || utf8
//! public_key:   u8 curve || [u8; 32]
//! nonce:        u64
//! receiver_id:  u32 len || utf8
//! block_hash:   [u8; 32]
//! actions:      u32 count || count * (u8 tag || payload)
//! ```
//!
//! Decoded values borrow from the input buffer, see [decode_transaction] for
//! the streaming interface.

use core::fmt;

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter};

mod reader;
pub use reader::Reader;

mod decode;
pub use decode::{decode_transaction, TxField, TxVisitor};

#[cfg(test)]
pub(crate) use decode::test::TxBuilder;

/// Public key curve tags
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, TryFromPrimitive)]
#[repr(u8)]
pub enum KeyType {
    #[strum(to_string = "ed25519")]
    Ed25519 = 0,
}

/// Tagged public key
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PublicKey {
    pub key_type: KeyType,
    pub data: [u8; 32],
}

impl PublicKey {
    pub fn ed25519(data: [u8; 32]) -> Self {
        Self {
            key_type: KeyType::Ed25519,
            data,
        }
    }
}

impl fmt::Display for PublicKey {
    /// Render as `ed25519:<base58 key>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b = [0u8; 64];

        let n = bs58::encode(&self.data)
            .into(&mut b[..])
            .map_err(|_| fmt::Error)?;
        let s = core::str::from_utf8(&b[..n]).map_err(|_| fmt::Error)?;

        write!(f, "{}:{}", self.key_type, s)
    }
}

/// Action tags
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter, TryFromPrimitive)]
#[repr(u8)]
pub enum ActionType {
    #[strum(to_string = "Create Account")]
    CreateAccount = 0,
    #[strum(to_string = "Deploy Contract")]
    DeployContract = 1,
    #[strum(to_string = "Function Call")]
    FunctionCall = 2,
    Transfer = 3,
    Stake = 4,
    #[strum(to_string = "Add Key")]
    AddKey = 5,
    #[strum(to_string = "Delete Key")]
    DeleteKey = 6,
    #[strum(to_string = "Delete Account")]
    DeleteAccount = 7,
}

/// Transaction action
#[derive(Clone, PartialEq, Debug)]
pub enum Action<'a> {
    CreateAccount,
    DeployContract {
        code: &'a [u8],
    },
    FunctionCall(FunctionCall<'a>),
    Transfer {
        deposit: u128,
    },
    Stake {
        stake: u128,
        public_key: PublicKey,
    },
    AddKey {
        public_key: PublicKey,
        access_key: AccessKey<'a>,
    },
    DeleteKey {
        public_key: PublicKey,
    },
    DeleteAccount {
        beneficiary_id: &'a str,
    },
}

impl<'a> Action<'a> {
    pub fn kind(&self) -> ActionType {
        match self {
            Action::CreateAccount => ActionType::CreateAccount,
            Action::DeployContract { .. } => ActionType::DeployContract,
            Action::FunctionCall(_) => ActionType::FunctionCall,
            Action::Transfer { .. } => ActionType::Transfer,
            Action::Stake { .. } => ActionType::Stake,
            Action::AddKey { .. } => ActionType::AddKey,
            Action::DeleteKey { .. } => ActionType::DeleteKey,
            Action::DeleteAccount { .. } => ActionType::DeleteAccount,
        }
    }
}

/// Contract method invocation
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionCall<'a> {
    pub method_name: &'a str,
    pub args: &'a [u8],
    pub gas: u64,
    pub deposit: u128,
}

/// Access key attached by [`Action::AddKey`]
#[derive(Clone, PartialEq, Debug)]
pub struct AccessKey<'a> {
    pub nonce: u64,
    pub permission: Permission<'a>,
}

/// Access key permission tags
#[derive(Copy, Clone, PartialEq, Eq, Debug, TryFromPrimitive)]
#[repr(u8)]
pub enum PermissionType {
    FunctionCall = 0,
    FullAccess = 1,
}

/// Access key permission
#[derive(Clone, PartialEq, Debug)]
pub enum Permission<'a> {
    /// Restricted to calls against `receiver_id`, optionally limited to `method_names`
    FunctionCall {
        allowance: Option<u128>,
        receiver_id: &'a str,
        method_names: MethodNames<'a>,
    },
    FullAccess,
}

/// Lazily iterated list of method names
///
/// Contents are validated on decode, iteration cannot fail.
#[derive(Clone, PartialEq, Debug)]
pub struct MethodNames<'a> {
    count: u32,
    raw: &'a [u8],
}

impl<'a> MethodNames<'a> {
    /// Decode and validate a method name list, returning a view over the raw encoding
    pub(crate) fn decode(r: &mut Reader<'a>) -> Result<Self, crate::engine::Error> {
        let count = r.read_u32()?;

        let mut start = r.clone();
        for _ in 0..count {
            r.read_length_prefixed_string()?;
        }

        let raw = start.read_fixed(r.position() - start.position())?;

        Ok(Self { count, raw })
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> {
        let mut r = Reader::new(self.raw);
        (0..self.count).map_while(move |_| r.read_length_prefixed_string().ok())
    }
}
