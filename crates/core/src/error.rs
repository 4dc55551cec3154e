//! Error types for the huffpack engine.
//!
//! Encode and decode calls report exactly two stream conditions:
//! - `UnknownSymbol`: the stream cannot be represented or is corrupt
//! - `ShortBuffer`: the output filled up; the call can be resumed
//!
//! Code-table construction has its own error enum, folded into [`Error`]
//! so that callers deal with a single type.

use thiserror::Error;

/// Top-level error type for all engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Encode: the symbol coder has no code for an input byte.
    /// Decode: a full 32-bit window of real data matches no code.
    ///
    /// The stream is invalid past this point.
    #[error("unknown symbol")]
    UnknownSymbol,

    /// The output buffer reached capacity before the call could finish.
    ///
    /// Resumable: retry on the same encoder/decoder with fresh output space.
    #[error("output buffer too short")]
    ShortBuffer,

    /// A code table failed validation
    #[error("invalid code table: {0}")]
    Table(#[from] TableError),
}

impl Error {
    /// Returns true if retrying with more output space continues the stream.
    pub fn is_resumable(&self) -> bool {
        matches!(self, Error::ShortBuffer)
    }
}

/// Code-table validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// Code is wider than the 32-bit pattern field
    #[error("code for symbol {symbol:#04x} has {num_bits} bits (maximum 32)")]
    CodeTooLong { symbol: u8, num_bits: u8 },

    /// Pattern has bits set above its declared width
    #[error("pattern {pattern:#x} for symbol {symbol:#04x} does not fit in {num_bits} bits")]
    PatternOverflow { symbol: u8, pattern: u32, num_bits: u8 },

    /// One code is a prefix of (or equal to) another
    #[error("code for symbol {prefix:#04x} is a prefix of the code for symbol {symbol:#04x}")]
    NotPrefixFree { prefix: u8, symbol: u8 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
