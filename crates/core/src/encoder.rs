//! Streaming encoder: packs symbols into a bounded output, MSB-first.
//!
//! One [`Encoder`] serves one logical output stream, produced across any
//! number of bounded `encode` calls. When the output fills in the middle of
//! a code, the unwritten tail of that code is kept as carry-over and written
//! first on the next call, so the concatenated output of every call is
//! bit-identical to a single unbounded encode.
//!
//! # Padding Rules
//! - Each call that consumes all of its input ends byte aligned: a pending
//!   partial byte is completed with the pad code
//!   `Code { pattern: eos_padding, num_bits: free_bits }`
//! - Calls that stop on `ShortBuffer` never pad
//!
//! # Example
//! ```
//! use huffpack_core::{ByteBuf, Code, Encoder, FnCoder};
//!
//! let coder = FnCoder::new(
//!     |s| match s {
//!         b'A' => Code::new(0b0, 1),
//!         b'B' => Code::new(0b1, 1),
//!         _ => Code::NONE,
//!     },
//!     |bits| if bits >> 31 == 0 { (b'A', 1) } else { (b'B', 1) },
//! );
//! let mut encoder = Encoder::new(&coder);
//!
//! let mut input: &[u8] = b"AABBAABB";
//! let mut storage = [0u8; 4];
//! let mut out = ByteBuf::new(&mut storage);
//! encoder.encode(&mut input, &mut out).unwrap();
//! assert_eq!(out.filled(), &[0b0011_0011]);
//! ```

use crate::bitio::{low_mask, take_byte, ByteBuf};
use crate::code::{Code, SymbolCoder, MAX_CODE_BITS};
use crate::error::{Error, Result};
use crate::length::estimate_encoded_length;

/// Default end-of-stream padding: all ones.
pub const DEFAULT_EOS_PADDING: u8 = 0xFF;

/// Persistent encoder state for one logical stream.
///
/// # Invariants
/// - at most one code's worth of carry-over is pending
/// - carry-over is flushed before any new symbol is read
#[derive(Debug, Clone)]
pub struct Encoder<C> {
    coder: C,
    eos_padding: u8,
    /// Tail of a code cut off by a full output; `num_bits == 0` if none
    overflow_bits: Code,
}

impl<C: SymbolCoder> Encoder<C> {
    /// Create an encoder bound to `coder`, with all-ones padding.
    ///
    /// Pass `&coder` to keep ownership of the coder.
    pub fn new(coder: C) -> Self {
        Self {
            coder,
            eos_padding: DEFAULT_EOS_PADDING,
            overflow_bits: Code::NONE,
        }
    }

    /// Builder-style variant of [`Encoder::set_eos_padding`].
    pub fn with_eos_padding(mut self, eos_padding: u8) -> Self {
        self.eos_padding = eos_padding;
        self
    }

    pub fn set_eos_padding(&mut self, eos_padding: u8) {
        self.eos_padding = eos_padding;
    }

    pub fn eos_padding(&self) -> u8 {
        self.eos_padding
    }

    pub fn coder(&self) -> &C {
        &self.coder
    }

    /// Number of carry-over bits waiting for the next call.
    pub fn pending_bits(&self) -> u8 {
        self.overflow_bits.num_bits
    }

    /// Return to a freshly created state, keeping the padding pattern.
    pub fn reset(&mut self) {
        self.overflow_bits = Code::NONE;
    }

    /// Exact encoded byte length of `symbols` using this encoder's coder.
    ///
    /// See [`estimate_encoded_length`].
    pub fn encoded_length(&self, symbols: &[u8]) -> Result<usize> {
        estimate_encoded_length(&self.coder, symbols)
    }

    /// Encode as much of `input` as fits into `output`.
    ///
    /// Consumed bytes are removed from the front of `input`. On success all
    /// of `input` was consumed and the output ends byte aligned.
    ///
    /// # Errors
    /// - `Error::ShortBuffer` if `output` is full on entry, or fills before
    ///   `input` is exhausted. Call again with more space to continue.
    /// - `Error::UnknownSymbol` if the coder has no code for the next byte.
    ///   That byte is left at the front of `input`.
    pub fn encode(&mut self, input: &mut &[u8], output: &mut ByteBuf<'_>) -> Result<()> {
        if output.is_full() {
            return Err(Error::ShortBuffer);
        }

        let mut writer = BitWriter::new(output);

        if !self.overflow_bits.is_none() {
            let carried = std::mem::replace(&mut self.overflow_bits, Code::NONE);
            self.write_or_carry(&mut writer, carried)?;
        }

        while let Some(&symbol) = input.first() {
            let code = self.coder.encode(symbol);
            if code.is_none() {
                return Err(Error::UnknownSymbol);
            }
            if writer.out.is_full() {
                // Symbol boundary with no room left: nothing to carry.
                return Err(Error::ShortBuffer);
            }

            take_byte(input);
            self.write_or_carry(&mut writer, code)?;
        }

        if writer.free_bits != 8 {
            let pad = Code::new(u32::from(self.eos_padding), writer.free_bits);
            let spilled = writer.write(pad);
            debug_assert!(spilled.is_none() && writer.free_bits == 8);
        }

        Ok(())
    }

    fn write_or_carry(&mut self, writer: &mut BitWriter<'_, '_>, code: Code) -> Result<()> {
        match writer.write(code) {
            None => Ok(()),
            Some(rest) => {
                tracing::trace!(bits = rest.num_bits, "output full mid-code, carrying bits over");
                self.overflow_bits = rest;
                Err(Error::ShortBuffer)
            }
        }
    }
}

/// Per-call MSB-first bit writer over the output buffer.
///
/// A partially filled byte only exists while the output has room for it:
/// whenever a push fills the output, the writer stops and hands back the
/// unwritten bits.
struct BitWriter<'o, 'b> {
    out: &'o mut ByteBuf<'b>,
    /// Byte under construction, filled from the most significant bit
    working: u8,
    /// Unfilled bits remaining in `working` (1..=8)
    free_bits: u8,
}

impl<'o, 'b> BitWriter<'o, 'b> {
    fn new(out: &'o mut ByteBuf<'b>) -> Self {
        Self { out, working: 0, free_bits: 8 }
    }

    /// Write the significant bits of `code`.
    ///
    /// Returns the unwritten tail if the output filled first. The tail is
    /// right-justified, like any other code.
    fn write(&mut self, code: Code) -> Option<Code> {
        let mut remaining = code.num_bits.min(MAX_CODE_BITS);
        let pattern = code.significant();

        while remaining > 0 {
            let take = remaining.min(self.free_bits);
            // remaining - take < 32 because take >= 1
            let slice = (pattern >> (remaining - take)) & low_mask(take);
            self.working |= (slice as u8) << (self.free_bits - take);

            remaining -= take;
            self.free_bits -= take;

            if self.free_bits == 0 {
                // Only reachable while there is room; see the invariant above.
                let pushed = self.out.push(self.working);
                debug_assert!(pushed.is_ok(), "bit writer pushed into a full buffer");
                self.working = 0;
                self.free_bits = 8;

                if self.out.is_full() && remaining > 0 {
                    return Some(Code::new(pattern & low_mask(remaining), remaining));
                }
            }
        }

        None
    }
}
