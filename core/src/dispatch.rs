// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Command dispatch, decoding request frames to [`Event`]s and mapping
//! [`Engine`] results to response payloads and [`StatusWord`]s.
//!
//! Platforms pass each received frame to [`handle_apdu`] and each user input
//! to [`handle_input`]. A [`Reply::Complete`] is sent immediately as
//! `reply[..len] || status`, a [`Reply::Deferred`] response is sent once
//! [`handle_input`] completes the review.

use encdec::Decode;

use ledger_near_apdu::{header::Command, status::StatusWord};

use crate::engine::{Driver, Engine, Error, Event, Output, UserInput};

/// Response to a command frame or user input
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Reply {
    /// Response ready, `len` bytes of payload have been written to the reply buffer
    Complete { status: StatusWord, len: usize },
    /// Response deferred pending user review
    Deferred,
}

impl Reply {
    fn error(e: Error) -> Self {
        Reply::Complete {
            status: e.status(),
            len: 0,
        }
    }
}

/// Handle a received command frame, writing any response payload to `reply`
#[cfg_attr(feature = "noinline", inline(never))]
pub fn handle_apdu<DRV: Driver>(engine: &mut Engine<DRV>, frame: &[u8], reply: &mut [u8]) -> Reply {
    // Decode header, Lc must match the received data
    let cmd = match Command::decode(frame) {
        Ok((c, _n)) => c,
        Err(_e) => {
            #[cfg(feature = "log")]
            log::warn!("invalid command frame ({} bytes): {:?}", frame.len(), _e);

            return Reply::error(engine.fail(Error::WrongDataLength));
        }
    };

    // Map to engine events
    let evt = match Event::parse(&cmd) {
        Ok(v) => v,
        Err(e) => {
            #[cfg(feature = "log")]
            log::warn!("failed to parse command {:02x?}: {}", cmd.header, e);

            return Reply::error(engine.fail(e));
        }
    };

    let r = engine.update(&evt);

    complete(engine, r, reply)
}

/// Handle user input during a review, returning the deferred response once the review completes
pub fn handle_input<DRV: Driver>(
    engine: &mut Engine<DRV>,
    input: UserInput,
    reply: &mut [u8],
) -> Option<Reply> {
    let r = engine.input(input)?;

    Some(complete(engine, r, reply))
}

fn complete<DRV: Driver>(
    engine: &mut Engine<DRV>,
    r: Result<Output, Error>,
    reply: &mut [u8],
) -> Reply {
    let output = match r {
        Ok(Output::Pending) => return Reply::Deferred,
        Ok(v) => v,
        Err(e) => return Reply::error(e),
    };

    match output.encode(reply) {
        Ok(len) => Reply::Complete {
            status: StatusWord::Ok,
            len,
        },
        Err(_e) => {
            #[cfg(feature = "log")]
            log::error!("failed to encode response: {:?}", _e);

            engine.reset();
            Reply::error(Error::EncodingFailed)
        }
    }
}
