// Copyright (c) 2022-2023 The MobileCoin Foundation

use super::{
    AccessKey, Action, ActionType, FunctionCall, KeyType, MethodNames, Permission, PermissionType,
    PublicKey, Reader,
};
use crate::engine::Error;

/// Transaction fields, emitted in encoding order as each is decoded
#[derive(Clone, PartialEq, Debug)]
pub enum TxField<'a> {
    SignerId(&'a str),
    SignerKey(PublicKey),
    Nonce(u64),
    ReceiverId(&'a str),
    BlockHash([u8; 32]),
    ActionCount(u32),
    Action {
        index: u32,
        count: u32,
        action: Action<'a>,
    },
}

/// Consumer for streamed [`TxField`]s
pub trait TxVisitor<'a> {
    fn visit(&mut self, field: TxField<'a>);
}

impl<'a, F: FnMut(TxField<'a>)> TxVisitor<'a> for F {
    fn visit(&mut self, field: TxField<'a>) {
        (self)(field)
    }
}

/// Decode a transaction from `buff`, handing each field to `v` as soon as it
/// has been decoded.
///
/// Fails on the first malformed field, fields already visited must be discarded
/// by the caller. The transaction must consume `buff` exactly.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn decode_transaction<'a, V: TxVisitor<'a>>(buff: &'a [u8], v: &mut V) -> Result<(), Error> {
    let mut r = Reader::new(buff);

    v.visit(TxField::SignerId(r.read_length_prefixed_string()?));
    v.visit(TxField::SignerKey(read_public_key(&mut r)?));
    v.visit(TxField::Nonce(r.read_u64()?));
    v.visit(TxField::ReceiverId(r.read_length_prefixed_string()?));
    v.visit(TxField::BlockHash(r.read_array()?));

    let count = r.read_u32()?;
    v.visit(TxField::ActionCount(count));

    for index in 0..count {
        let action = read_action(&mut r)?;

        #[cfg(feature = "log")]
        log::trace!("action {}/{}: {}", index + 1, count, action.kind());

        v.visit(TxField::Action {
            index,
            count,
            action,
        });
    }

    if !r.is_empty() {
        #[cfg(feature = "log")]
        log::debug!("{} trailing bytes after transaction", r.remaining());

        return Err(Error::TrailingData);
    }

    Ok(())
}

fn read_public_key(r: &mut Reader<'_>) -> Result<PublicKey, Error> {
    let key_type = KeyType::try_from(r.read_u8()?).map_err(|_| Error::UnsupportedKeyType)?;
    let data = r.read_array()?;

    Ok(PublicKey { key_type, data })
}

fn read_action<'a>(r: &mut Reader<'a>) -> Result<Action<'a>, Error> {
    let tag = r.read_u8()?;
    let kind = ActionType::try_from(tag).map_err(|_| {
        #[cfg(feature = "log")]
        log::debug!("unknown action tag: {}", tag);

        Error::UnknownActionType
    })?;

    let a = match kind {
        ActionType::CreateAccount => Action::CreateAccount,
        ActionType::DeployContract => Action::DeployContract {
            code: r.read_length_prefixed_bytes()?,
        },
        ActionType::FunctionCall => Action::FunctionCall(FunctionCall {
            method_name: r.read_length_prefixed_string()?,
            args: r.read_length_prefixed_bytes()?,
            gas: r.read_u64()?,
            deposit: r.read_u128()?,
        }),
        ActionType::Transfer => Action::Transfer {
            deposit: r.read_u128()?,
        },
        ActionType::Stake => Action::Stake {
            stake: r.read_u128()?,
            public_key: read_public_key(r)?,
        },
        ActionType::AddKey => Action::AddKey {
            public_key: read_public_key(r)?,
            access_key: read_access_key(r)?,
        },
        ActionType::DeleteKey => Action::DeleteKey {
            public_key: read_public_key(r)?,
        },
        ActionType::DeleteAccount => Action::DeleteAccount {
            beneficiary_id: r.read_length_prefixed_string()?,
        },
    };

    Ok(a)
}

fn read_access_key<'a>(r: &mut Reader<'a>) -> Result<AccessKey<'a>, Error> {
    let nonce = r.read_u64()?;

    let permission = match PermissionType::try_from(r.read_u8()?) {
        Ok(PermissionType::FullAccess) => Permission::FullAccess,
        Ok(PermissionType::FunctionCall) => {
            let allowance = match r.read_option_tag()? {
                true => Some(r.read_u128()?),
                false => None,
            };

            Permission::FunctionCall {
                allowance,
                receiver_id: r.read_length_prefixed_string()?,
                method_names: MethodNames::decode(r)?,
            }
        }
        Err(_) => return Err(Error::UnknownPermissionType),
    };

    Ok(AccessKey { nonce, permission })
}
