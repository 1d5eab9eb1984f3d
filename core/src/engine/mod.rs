// Copyright (c) 2022-2023 The MobileCoin Foundation

//! The [Engine] provides NEAR signing functionality required by hardware wallets.
//!
//! This handles [Event] inputs and returns [Output] responses to the caller,
//! see [apdu][crate::apdu] for APDU protocol / encoding specifications.
//!
//! Operations requiring user approval return [`Output::Pending`], the platform
//! then presents the [review plan][Engine::review] and forwards [`UserInput`]s
//! via [`Engine::input`] until the review completes.

use encdec::DecodeOwned;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use ledger_near_apdu::{path::DerivationPath, sign::BlindSignReq};

use crate::{
    review::{ReviewPlan, TxRenderer},
    tx::decode_transaction,
};

mod approval;
pub use approval::{ApprovalState, UserInput};

mod chunks;
pub use chunks::{Reassembler, MAX_MESSAGE_LEN, MAX_TX_LEN};

mod error;
pub use error::Error;

mod event;
pub use event::Event;

mod function;
pub use function::{Function, Payload};

mod output;
pub use output::Output;

pub mod signer;
use signer::SignMessage;

/// Application version, reported via [`Event::GetConfiguration`]
pub const APP_VERSION: (u8, u8, u8) = (
    parse_version(env!("CARGO_PKG_VERSION_MAJOR")),
    parse_version(env!("CARGO_PKG_VERSION_MINOR")),
    parse_version(env!("CARGO_PKG_VERSION_PATCH")),
);

const fn parse_version(s: &str) -> u8 {
    let b = s.as_bytes();
    let mut v = 0u8;
    let mut i = 0;

    while i < b.len() {
        v = v * 10 + (b[i] - b'0');
        i += 1;
    }

    v
}

/// Engine internal state enumeration
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum State {
    /// Idle state, no command running
    Idle,
    /// Structured signing message partially received
    AwaitingMore,
    /// Decoding a completed message
    Parsing,
    /// Review pending user approval
    Reviewing,
    /// Approved, computing the response
    Signing,
}

/// [`Driver`] trait provides platform support for [`Engine`] instances
pub trait Driver {
    /// SLIP-0010 derivation for ed25519 keys
    fn slip10_derive_ed25519(&self, path: &[u32]) -> [u8; 32];

    /// Check whether the user has enabled blind signing
    fn blind_signing_enabled(&self) -> bool {
        false
    }
}

impl<T: Driver> Driver for &mut T {
    fn slip10_derive_ed25519(&self, path: &[u32]) -> [u8; 32] {
        T::slip10_derive_ed25519(self, path)
    }

    fn blind_signing_enabled(&self) -> bool {
        T::blind_signing_enabled(self)
    }
}

/// [Engine] provides hardware-independent support for NEAR wallet operations
pub struct Engine<DRV: Driver> {
    state: State,
    chunks: Reassembler,
    function: Function,
    drv: DRV,
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new engine instance with the provided driver
    pub const fn new(drv: DRV) -> Self {
        Self {
            state: State::Idle,
            chunks: Reassembler::new(),
            function: Function::new(),
            drv,
        }
    }

    /// Handle incoming command events
    ///
    /// Failures reset the session, with the exception of [`Error::Busy`]
    /// which leaves an active review untouched.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update(&mut self, evt: &Event) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::debug!("event: {:02x?} (state: {})", evt, self.state);

        let r = match (self.state, evt) {
            // Empty event, do nothing
            (_, Event::None) => Ok(Output::None),

            // Configuration is available in every state
            (_, Event::GetConfiguration) => {
                let (major, minor, patch) = APP_VERSION;
                return Ok(Output::Configuration {
                    major,
                    minor,
                    patch,
                });
            }

            // Only one review may be active
            (State::Reviewing, _e) => {
                #[cfg(feature = "log")]
                log::warn!("review in progress, rejecting: {:02x?}", _e);

                return Err(Error::Busy);
            }

            // Continue structured signing message
            (State::AwaitingMore, Event::SignChunk { last, data }) => {
                self.sign_chunk(false, *last, data)
            }

            // Any other command aborts a partial message
            (State::AwaitingMore, _e) => {
                #[cfg(feature = "log")]
                log::error!("command interrupts signing message: {:02x?}", _e);

                Err(Error::SequenceError)
            }

            (State::Idle, Event::GetPublicKey { path, confirm }) => {
                self.get_public_key(path, *confirm)
            }

            (State::Idle, Event::GetWalletId { path }) => self.get_wallet_id(path),

            (State::Idle, Event::SignChunk { last, data }) => self.sign_chunk(true, *last, data),

            (State::Idle, Event::BlindSign { data }) => self.blind_sign(data),

            // Handle unexpected events
            _e => {
                #[cfg(feature = "log")]
                log::error!("Unexpected event in state {:?}: {:02x?}", self.state, _e);

                Err(Error::UnexpectedEvent)
            }
        };

        if let Err(_e) = &r {
            #[cfg(feature = "log")]
            log::warn!("command failed: {}", _e);

            self.reset();
        }

        r
    }

    /// Handle user input for an active review
    ///
    /// Returns `None` while the review continues (or when no review is active),
    /// otherwise the deferred command result. The session resets on completion.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn input(&mut self, input: UserInput) -> Option<Result<Output, Error>> {
        if self.state != State::Reviewing {
            return None;
        }

        let approval = match self.function.approval_mut() {
            Some(a) => {
                *a = a.next(input);
                *a
            }
            None => {
                self.reset();
                return None;
            }
        };

        #[cfg(feature = "log")]
        log::debug!("input: {} ({})", input, approval);

        match approval {
            ApprovalState::Approved => {
                self.state = State::Signing;

                let r = self.complete(approval);
                self.reset();

                Some(r)
            }
            ApprovalState::Rejected => {
                self.reset();

                Some(Err(Error::UserRejected))
            }
            _ => None,
        }
    }

    /// Handle a command that failed prior to reaching the engine (eg. frame decoding)
    ///
    /// Returns the error to be reported, resetting the session unless a review is active.
    pub fn fail(&mut self, e: Error) -> Error {
        match self.state {
            State::Reviewing => Error::Busy,
            _ => {
                self.reset();
                e
            }
        }
    }

    /// Fetch current engine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Fetch the review plan for the active review
    pub fn review(&self) -> Option<&ReviewPlan> {
        match self.state {
            State::Reviewing => self.function.plan_ref(),
            _ => None,
        }
    }

    /// Fetch the approval state for the active review
    pub fn approval(&self) -> ApprovalState {
        self.function.approval()
    }

    /// Fetch the review field currently displayed, `None` on the approval page
    pub fn page(&self) -> Option<usize> {
        self.function.approval().field()
    }

    /// Reset engine state, wiping any buffered message and pending review
    pub fn reset(&mut self) {
        self.chunks.reset();
        self.function.clear();
        self.state = State::Idle;
    }

    fn get_public_key(&mut self, path: &DerivationPath, confirm: bool) -> Result<Output, Error> {
        let public_key = signer::public_key(&self.drv, path)?;

        if !confirm {
            return Ok(Output::PublicKey { public_key });
        }

        self.function
            .public_key_init(public_key, ReviewPlan::for_public_key(&public_key));
        self.state = State::Reviewing;

        Ok(Output::Pending)
    }

    fn get_wallet_id(&mut self, path: &DerivationPath) -> Result<Output, Error> {
        let public_key = signer::public_key(&self.drv, path)?;

        self.function
            .public_key_init(public_key, ReviewPlan::for_wallet_id(&public_key));
        self.state = State::Reviewing;

        Ok(Output::Pending)
    }

    fn sign_chunk(&mut self, is_first: bool, last: bool, data: &[u8]) -> Result<Output, Error> {
        let message = match self.chunks.push(is_first, last, data)? {
            Some(m) => m,
            None => {
                self.state = State::AwaitingMore;
                return Ok(Output::None);
            }
        };

        self.state = State::Parsing;

        let (path, tx) = DerivationPath::parse(message)?;
        signer::check_path(&path)?;

        #[cfg(feature = "log")]
        log::debug!("decoding {} byte transaction for {}", tx.len(), path);

        let mut plan = ReviewPlan::new();
        decode_transaction(tx, &mut TxRenderer::new(&mut plan))?;

        self.function.sign_init(path, Payload::Transaction, plan);
        self.state = State::Reviewing;

        Ok(Output::Pending)
    }

    fn blind_sign(&mut self, data: &[u8]) -> Result<Output, Error> {
        // Setting is checked prior to the payload
        if !self.drv.blind_signing_enabled() {
            return Err(Error::BlindSigningDisabled);
        }

        let (req, _n) = match BlindSignReq::decode_owned(data) {
            Ok(v) => v,
            Err(_) => return Err(Error::InvalidBlindPayloadLength),
        };

        signer::check_path(&req.path)?;

        let plan = ReviewPlan::for_blind_hash(&req.hash);
        self.function
            .sign_init(req.path, Payload::Hash(req.hash), plan);
        self.state = State::Reviewing;

        Ok(Output::Pending)
    }

    /// Compute the deferred response for an approved review
    fn complete(&self, approval: ApprovalState) -> Result<Output, Error> {
        if let Some(public_key) = self.function.public_key_ref() {
            return Ok(Output::PublicKey {
                public_key: *public_key,
            });
        }

        let (path, payload) = self.function.sign_ref().ok_or(Error::UnexpectedEvent)?;

        let message = match payload {
            Payload::Transaction => {
                let tx = self
                    .chunks
                    .message()
                    .and_then(|m| m.get(DerivationPath::LEN..))
                    .ok_or(Error::UnexpectedEvent)?;
                SignMessage::Transaction(tx)
            }
            Payload::Hash(h) => SignMessage::Hash(h),
        };

        let signature = signer::sign(&self.drv, path, approval, message)?;

        Ok(Output::Signature { signature })
    }
}
