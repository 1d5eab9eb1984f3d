// Copyright (c) 2022-2023 The MobileCoin Foundation

use encdec::Decode;

use ledger_near_apdu::prelude::{
    Command, DerivationPath, Instruction, KeyDisplay, PublicKeyReq, SignMode, WalletIdReq,
    NEAR_APDU_CLA,
};

use super::Error;

/// [`Engine`][super::Engine] input events, typically decoded from request [APDUs][crate::apdu]
#[derive(Clone, PartialEq, Debug)]
pub enum Event<'a> {
    None,

    /// Fetch application version
    GetConfiguration,

    /// Fetch the public key for a path, optionally confirming on-device
    GetPublicKey { path: DerivationPath, confirm: bool },

    /// Fetch the wallet id for a path, always confirmed
    GetWalletId { path: DerivationPath },

    /// Transaction fragment, the first fragment is prefixed with the derivation path
    SignChunk { last: bool, data: &'a [u8] },

    /// Blind signing payload, expected to be path + hash
    BlindSign { data: &'a [u8] },
}

impl<'a> Event<'a> {
    /// Parse an incoming command frame to an [`Event`]
    pub fn parse(cmd: &Command<'a>) -> Result<Self, Error> {
        let h = &cmd.header;

        if h.cla != NEAR_APDU_CLA {
            return Err(Error::UnsupportedClass);
        }

        let ins = Instruction::try_from(h.ins).map_err(|_| Error::UnsupportedInstruction)?;

        let evt = match ins {
            Instruction::GetConfiguration => Event::GetConfiguration,
            Instruction::GetPublicKey => {
                let confirm = match KeyDisplay::try_from(h.p1) {
                    Ok(KeyDisplay::Confirm) => true,
                    Ok(KeyDisplay::Silent) => false,
                    Err(_) => return Err(Error::IncorrectP1P2),
                };

                let r = decode_exact::<PublicKeyReq>(cmd.data)?;
                Event::GetPublicKey {
                    path: r.path,
                    confirm,
                }
            }
            Instruction::GetWalletId => {
                let r = decode_exact::<WalletIdReq>(cmd.data)?;
                Event::GetWalletId { path: r.path }
            }
            Instruction::Sign => match SignMode::try_from(h.p1) {
                Ok(SignMode::More) => Event::SignChunk {
                    last: false,
                    data: cmd.data,
                },
                Ok(SignMode::Last) => Event::SignChunk {
                    last: true,
                    data: cmd.data,
                },
                // Length is checked by the engine after the blind signing setting
                Ok(SignMode::Blind) => Event::BlindSign { data: cmd.data },
                Err(_) => return Err(Error::IncorrectP1P2),
            },
        };

        Ok(evt)
    }
}

/// Helper to decode APDUs that must consume the whole frame
fn decode_exact<'a, T: Decode<'a, Output = T>>(buff: &'a [u8]) -> Result<T, Error>
where
    Error: From<<T as Decode<'a>>::Error>,
{
    let (v, n) = T::decode(buff)?;

    if n != buff.len() {
        return Err(Error::TrailingData);
    }

    Ok(v)
}
