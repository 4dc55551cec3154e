//! Bounded byte output and width-aware bit helpers.
//!
//! [`ByteBuf`] is the fixed-capacity output the encoder and decoder write
//! into. It wraps caller-owned storage and never grows: once `len` reaches
//! `capacity`, further pushes fail with [`Error::ShortBuffer`].
//!
//! Input is a plain `&mut &[u8]` cursor; consuming a byte moves the slice
//! start forward, so the caller sees exactly what is left after a call.
//!
//! # Example
//! ```
//! use huffpack_core::bitio::ByteBuf;
//!
//! let mut storage = [0u8; 2];
//! let mut out = ByteBuf::new(&mut storage);
//! out.push(0xAB).unwrap();
//! out.push(0xCD).unwrap();
//! assert!(out.is_full());
//! assert!(out.push(0xEF).is_err());
//! assert_eq!(out.filled(), &[0xAB, 0xCD]);
//! ```

use crate::error::{Error, Result};

/// Fixed-capacity output buffer over caller storage.
///
/// # Invariants
/// - `len <= storage.len()`
/// - bytes at `len..` are untouched by the engine
#[derive(Debug)]
pub struct ByteBuf<'a> {
    storage: &'a mut [u8],
    len: usize,
}

impl<'a> ByteBuf<'a> {
    /// Create an empty buffer whose capacity is the whole of `storage`.
    pub fn new(storage: &'a mut [u8]) -> Self {
        Self { storage, len: 0 }
    }

    /// Create a buffer whose first `len` bytes are already filled.
    ///
    /// `len` is clamped to the storage length.
    pub fn with_len(storage: &'a mut [u8], len: usize) -> Self {
        let len = len.min(storage.len());
        Self { storage, len }
    }

    /// Append one byte.
    ///
    /// # Errors
    /// Returns `Error::ShortBuffer` if the buffer is at capacity.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        let slot = self.storage.get_mut(self.len).ok_or(Error::ShortBuffer)?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }

    /// Bytes written so far.
    pub fn filled(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Free space left before the buffer is full.
    pub fn remaining(&self) -> usize {
        self.storage.len() - self.len
    }

    pub fn is_full(&self) -> bool {
        self.len == self.storage.len()
    }

    /// Forget the written bytes, keeping the storage.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

/// Mask selecting the low `count` bits of a u32 (`count` may be 0..=32).
#[inline]
pub(crate) fn low_mask(count: u8) -> u32 {
    match 1u32.checked_shl(u32::from(count)) {
        Some(bit) => bit - 1,
        None => u32::MAX,
    }
}

/// `value >> count`, yielding 0 when `count` is the full width or more.
#[inline]
pub(crate) fn shr32(value: u32, count: u8) -> u32 {
    value.checked_shr(u32::from(count)).unwrap_or(0)
}

/// `value << count`, yielding 0 when `count` is the full width or more.
#[inline]
pub(crate) fn shl64(value: u64, count: u8) -> u64 {
    value.checked_shl(u32::from(count)).unwrap_or(0)
}

/// Pops the first byte off an input cursor.
#[inline]
pub(crate) fn take_byte(input: &mut &[u8]) -> Option<u8> {
    let (&byte, rest) = input.split_first()?;
    *input = rest;
    Some(byte)
}
