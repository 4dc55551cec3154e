//! Codes and the symbol-coder strategy.
//!
//! A [`Code`] is a right-justified bit pattern plus its width. A
//! [`SymbolCoder`] maps symbols to codes and 32-bit lookup windows back to
//! symbols; the encoder and decoder are generic over it.

use crate::bitio::low_mask;

/// Maximum width of a single code in bits.
pub const MAX_CODE_BITS: u8 = 32;

/// A variable-length code: the low `num_bits` bits of `pattern`.
///
/// `num_bits == 0` means the symbol has no code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    /// Code bits, right-justified. Bits above `num_bits` are ignored.
    pub pattern: u32,
    /// Number of significant bits (0..=32)
    pub num_bits: u8,
}

impl Code {
    /// The "no code" sentinel.
    pub const NONE: Code = Code { pattern: 0, num_bits: 0 };

    pub const fn new(pattern: u32, num_bits: u8) -> Self {
        Self { pattern, num_bits }
    }

    pub const fn is_none(&self) -> bool {
        self.num_bits == 0
    }

    /// The pattern with everything above `num_bits` cleared.
    pub fn significant(&self) -> u32 {
        self.pattern & low_mask(self.num_bits.min(MAX_CODE_BITS))
    }
}

/// Caller-supplied mapping between symbols and codes.
///
/// Implementations must be deterministic for the duration of a stream. Any
/// context the coder needs lives in the implementing type.
pub trait SymbolCoder {
    /// Code for `symbol`, or [`Code::NONE`] if it cannot be represented.
    fn encode(&self, symbol: u8) -> Code;

    /// Decode the symbol whose code starts at the most significant bit of
    /// `bits`.
    ///
    /// Returns `(symbol, bits_consumed)`. `bits_consumed == 0` signals that
    /// no code matched.
    fn decode(&self, bits: u32) -> (u8, u8);
}

impl<C: SymbolCoder + ?Sized> SymbolCoder for &C {
    fn encode(&self, symbol: u8) -> Code {
        (**self).encode(symbol)
    }

    fn decode(&self, bits: u32) -> (u8, u8) {
        (**self).decode(bits)
    }
}

/// A [`SymbolCoder`] built from an encode closure and a decode closure.
///
/// State captured by the closures takes the place of an opaque context
/// pointer.
///
/// # Example
/// ```
/// use huffpack_core::{Code, FnCoder, SymbolCoder};
///
/// let coder = FnCoder::new(
///     |s| match s {
///         b'A' => Code::new(0b0, 1),
///         b'B' => Code::new(0b1, 1),
///         _ => Code::NONE,
///     },
///     |bits| if bits >> 31 == 0 { (b'A', 1) } else { (b'B', 1) },
/// );
/// assert_eq!(coder.encode(b'B'), Code::new(1, 1));
/// assert_eq!(coder.decode(0x8000_0000), (b'B', 1));
/// ```
#[derive(Clone)]
pub struct FnCoder<E, D> {
    encode: E,
    decode: D,
}

impl<E, D> FnCoder<E, D>
where
    E: Fn(u8) -> Code,
    D: Fn(u32) -> (u8, u8),
{
    pub fn new(encode: E, decode: D) -> Self {
        Self { encode, decode }
    }
}

impl<E, D> SymbolCoder for FnCoder<E, D>
where
    E: Fn(u8) -> Code,
    D: Fn(u32) -> (u8, u8),
{
    fn encode(&self, symbol: u8) -> Code {
        (self.encode)(symbol)
    }

    fn decode(&self, bits: u32) -> (u8, u8) {
        (self.decode)(bits)
    }
}

impl<E, D> std::fmt::Debug for FnCoder<E, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCoder").finish_non_exhaustive()
    }
}
