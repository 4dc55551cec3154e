//! Up-front sizing of encoded output.

use crate::code::SymbolCoder;
use crate::error::{Error, Result};

/// Exact byte length a complete encode of `symbols` produces.
///
/// Sums the code widths and rounds up to whole bytes; the rounding is where
/// end-of-stream padding goes. Nothing is written and no state changes.
///
/// # Errors
/// Returns `Error::UnknownSymbol` if any symbol has no code.
pub fn estimate_encoded_length<C: SymbolCoder>(coder: &C, symbols: &[u8]) -> Result<usize> {
    let mut total_bits = 0usize;
    for &symbol in symbols {
        let code = coder.encode(symbol);
        if code.is_none() {
            return Err(Error::UnknownSymbol);
        }
        total_bits += usize::from(code.num_bits);
    }

    Ok(total_bits.div_ceil(8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Code, FnCoder};

    #[test]
    fn test_rounds_up_to_whole_bytes() {
        let coder = FnCoder::new(|s| Code::new(0, s), |_| (0, 0));
        assert_eq!(estimate_encoded_length(&coder, &[8, 8]), Ok(2));
        assert_eq!(estimate_encoded_length(&coder, &[8, 1]), Ok(2));
        assert_eq!(estimate_encoded_length(&coder, &[7]), Ok(1));
        assert_eq!(estimate_encoded_length(&coder, &[32, 32, 1]), Ok(9));
    }

    #[test]
    fn test_empty_input() {
        let coder = FnCoder::new(|_| Code::NONE, |_| (0, 0));
        assert_eq!(estimate_encoded_length(&coder, &[]), Ok(0));
    }

    #[test]
    fn test_unknown_symbol_fails_whole_call() {
        let coder = FnCoder::new(|s| Code::new(0, s), |_| (0, 0));
        assert_eq!(estimate_encoded_length(&coder, &[5, 0, 5]), Err(Error::UnknownSymbol));
    }
}
