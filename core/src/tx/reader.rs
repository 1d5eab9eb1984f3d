// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Bounds-checked cursor over borsh-encoded input

use byteorder::{ByteOrder, LittleEndian};

use crate::engine::Error;

/// Cursor over a borrowed buffer, every read is checked against the remaining length
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    buff: &'a [u8],
    index: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buff: &'a [u8]) -> Self {
        Self { buff, index: 0 }
    }

    /// Bytes remaining after the cursor
    pub fn remaining(&self) -> usize {
        self.buff.len() - self.index
    }

    /// Check whether the cursor has reached the end of the buffer
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Current cursor position
    pub fn position(&self) -> usize {
        self.index
    }

    /// Read `n` bytes
    pub fn read_fixed(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if n > self.remaining() {
            return Err(Error::TruncatedInput);
        }

        let d = &self.buff[self.index..][..n];
        self.index += n;

        Ok(d)
    }

    /// Read a fixed-size array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut a = [0u8; N];
        a.copy_from_slice(self.read_fixed(N)?);
        Ok(a)
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.read_fixed(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        self.read_fixed(4).map(LittleEndian::read_u32)
    }

    pub fn read_u64(&mut self) -> Result<u64, Error> {
        self.read_fixed(8).map(LittleEndian::read_u64)
    }

    pub fn read_u128(&mut self) -> Result<u128, Error> {
        self.read_fixed(16).map(LittleEndian::read_u128)
    }

    /// Read a `u32` length-prefixed byte vector
    ///
    /// The declared length may not exceed the remaining buffer.
    pub fn read_length_prefixed_bytes(&mut self) -> Result<&'a [u8], Error> {
        let n = self.read_u32()? as usize;
        self.read_fixed(n)
    }

    /// Read a `u32` length-prefixed UTF-8 string
    pub fn read_length_prefixed_string(&mut self) -> Result<&'a str, Error> {
        let d = self.read_length_prefixed_bytes()?;
        core::str::from_utf8(d).map_err(|_| Error::InvalidEncoding)
    }

    /// Read a borsh `Option` tag, returning whether a value follows
    pub fn read_option_tag(&mut self) -> Result<bool, Error> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidEncoding),
        }
    }
}
