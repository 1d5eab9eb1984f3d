// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Reassembly of messages delivered across multiple command frames

use heapless::Vec;
use ledger_near_apdu::path::DerivationPath;
use static_assertions::const_assert;
use zeroize::Zeroize;

use super::Error;

/// Maximum serialized transaction length
pub const MAX_TX_LEN: usize = 650;

/// Reassembly buffer capacity, derivation path followed by the transaction
pub const MAX_MESSAGE_LEN: usize = DerivationPath::LEN + MAX_TX_LEN;

const_assert!(MAX_MESSAGE_LEN > ledger_near_apdu::sign::BLIND_PAYLOAD_LEN);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum ChunkState {
    Empty,
    Accumulating,
    Complete,
}

/// Fixed-capacity message reassembler
///
/// Holds at most one in-flight message, contents are wiped on [`Reassembler::reset`]
/// and whenever a new message starts.
pub struct Reassembler {
    buff: Vec<u8, MAX_MESSAGE_LEN>,
    state: ChunkState,
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reassembler {
    pub const fn new() -> Self {
        Self {
            buff: Vec::new(),
            state: ChunkState::Empty,
        }
    }

    /// Append a fragment, returning the completed message on `is_last`
    ///
    /// Any failure wipes the buffer.
    pub fn push(
        &mut self,
        is_first: bool,
        is_last: bool,
        data: &[u8],
    ) -> Result<Option<&[u8]>, Error> {
        match (is_first, self.state) {
            // No pipelining, a new message may not start mid-sequence
            (true, ChunkState::Accumulating) => {
                self.reset();
                return Err(Error::SequenceError);
            }
            (true, _) => self.reset(),
            (false, ChunkState::Accumulating) => (),
            (false, _) => {
                self.reset();
                return Err(Error::SequenceError);
            }
        }

        if self.buff.extend_from_slice(data).is_err() {
            #[cfg(feature = "log")]
            log::warn!(
                "message exceeds {} bytes ({} + {})",
                MAX_MESSAGE_LEN,
                self.buff.len(),
                data.len()
            );

            self.reset();
            return Err(Error::OversizedMessage);
        }

        match is_last {
            true => {
                self.state = ChunkState::Complete;
                Ok(Some(self.buff.as_slice()))
            }
            false => {
                self.state = ChunkState::Accumulating;
                Ok(None)
            }
        }
    }

    /// Check whether a message is partially received
    pub fn is_accumulating(&self) -> bool {
        self.state == ChunkState::Accumulating
    }

    /// Fetch the completed message
    pub fn message(&self) -> Option<&[u8]> {
        match self.state {
            ChunkState::Complete => Some(self.buff.as_slice()),
            _ => None,
        }
    }

    /// Wipe and reset the buffer
    pub fn reset(&mut self) {
        self.buff.as_mut_slice().zeroize();
        self.buff.clear();
        self.state = ChunkState::Empty;
    }
}

impl Drop for Reassembler {
    fn drop(&mut self) {
        self.reset();
    }
}
