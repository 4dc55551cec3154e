//! Streaming decoder: unpacks an MSB-first bit-stream into symbols.
//!
//! The decoder keeps a 64-bit shift register. Input bytes are appended just
//! below the bits already held, and the top 32 bits (the active window) are
//! handed to the symbol coder. Bits left over when input runs out stay in
//! the register until the next call supplies more.
//!
//! # Termination
//!
//! The coder's "no match" answer is ambiguous: it can mean the stream is
//! corrupt, or that fewer than 32 real bits remain and the zero fill below
//! them does not form a code. The decoder resolves it by counting the real
//! bits still available (`bits_left`):
//! - no match with fewer than 32 bits left: out of input, success
//! - no match with 32 or more bits left: `UnknownSymbol`
//! - a match wider than `bits_left`: it matched zero fill, success
//!
//! Trailing end-of-stream padding therefore ends a decode quietly as long as
//! the padding is not itself a complete code.

use crate::bitio::{shl64, take_byte, ByteBuf};
use crate::code::{SymbolCoder, MAX_CODE_BITS};
use crate::error::{Error, Result};

/// Persistent decoder state for one logical stream.
///
/// # Invariants
/// - real bits occupy the top `valid_bits` bits of `window`; the rest is zero
/// - refill stops as soon as `valid_bits >= 32`, so it never exceeds 39
#[derive(Debug, Clone)]
pub struct Decoder<C> {
    coder: C,
    window: u64,
    valid_bits: u8,
}

impl<C: SymbolCoder> Decoder<C> {
    /// Create a decoder bound to `coder`.
    pub fn new(coder: C) -> Self {
        Self {
            coder,
            window: 0,
            valid_bits: 0,
        }
    }

    pub fn coder(&self) -> &C {
        &self.coder
    }

    /// Bits read from input but not yet decoded.
    pub fn buffered_bits(&self) -> u8 {
        self.valid_bits
    }

    /// Forget any buffered bits to start an unrelated stream.
    pub fn reset(&mut self) {
        self.window = 0;
        self.valid_bits = 0;
    }

    /// Decode symbols from `input` into `output`.
    ///
    /// Returns `Ok` once the input is used up, whether or not it ended on a
    /// code boundary; undecoded bits are kept for the next call.
    ///
    /// # Errors
    /// - `Error::ShortBuffer` if `output` is full on entry or fills while
    ///   symbols remain. The pending symbol is decoded again on retry.
    /// - `Error::UnknownSymbol` if a full window of real data matches no
    ///   code.
    pub fn decode(&mut self, input: &mut &[u8], output: &mut ByteBuf<'_>) -> Result<()> {
        if output.is_full() {
            return Err(Error::ShortBuffer);
        }

        loop {
            self.refill(input);

            let bits_left = usize::from(self.valid_bits) + 8 * input.len();
            let (symbol, consumed) = self.coder.decode(self.active_window());

            if consumed == 0 {
                if bits_left < usize::from(MAX_CODE_BITS) {
                    tracing::trace!(bits_left, "decoder starved, waiting for input");
                    return Ok(());
                }
                return Err(Error::UnknownSymbol);
            }
            if usize::from(consumed) > bits_left {
                tracing::trace!(bits_left, consumed, "match ran into zero fill, waiting for input");
                return Ok(());
            }

            // Refill leaves at least 32 bits whenever input remains, so here
            // `consumed` is always covered by the register.
            debug_assert!(consumed <= self.valid_bits);

            output.push(symbol)?;
            self.window = shl64(self.window, consumed);
            self.valid_bits -= consumed;

            if bits_left == usize::from(consumed) {
                return Ok(());
            }
        }
    }

    fn active_window(&self) -> u32 {
        (self.window >> 32) as u32
    }

    fn refill(&mut self, input: &mut &[u8]) {
        while self.valid_bits < MAX_CODE_BITS {
            let Some(byte) = take_byte(input) else {
                break;
            };
            // 56 - valid_bits stays within 25..=56
            self.window |= u64::from(byte) << (56 - self.valid_bits);
            self.valid_bits += 8;
        }
    }
}
