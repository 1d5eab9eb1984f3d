// Copyright (c) 2022-2023 The MobileCoin Foundation

use encdec::Encode;

use ledger_proto::ApduError;

use crate::apdu;

/// [`Engine`][super::Engine] outputs (in response to events), typically encoded to response [APDUs][crate::apdu]
#[derive(Clone, PartialEq, Debug)]
pub enum Output {
    /// Command accepted, no payload
    None,

    /// Application version
    Configuration { major: u8, minor: u8, patch: u8 },

    /// Derived public key
    PublicKey { public_key: [u8; 32] },

    /// ed25519 signature
    Signature { signature: [u8; 64] },

    /// Indicate the device is waiting for user input,
    /// the response is deferred until the review completes
    Pending,
}

impl Output {
    /// Encode an [`Output`] object to a response [APDU][crate::apdu]
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        match self.clone() {
            Output::None => Ok(0),
            Output::Configuration {
                major,
                minor,
                patch,
            } => apdu::app_config::AppConfigResp::new(major, minor, patch).encode(buff),
            Output::PublicKey { public_key } => {
                apdu::public_key::PublicKeyResp::new(public_key).encode(buff)
            }
            Output::Signature { signature } => {
                apdu::sign::SignatureResp::new(signature).encode(buff)
            }
            Output::Pending => Ok(0),
        }
    }
}
