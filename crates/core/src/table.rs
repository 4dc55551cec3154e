//! Table-driven symbol coder.
//!
//! [`CodeTable`] turns a caller-supplied array of 256 codes (one per byte
//! value, [`Code::NONE`] for bytes without a code) into a [`SymbolCoder`].
//! Where the codes come from is up to the caller; the table only checks that
//! they can be decoded unambiguously.
//!
//! # Decode Index
//!
//! Codes are grouped by width and sorted by pattern. A lookup tries each
//! width present in the table, shortest first, comparing the top `width`
//! bits of the window against that group with a binary search. Because the
//! set is prefix-free at most one width can match.

use crate::bitio::{low_mask, shr32};
use crate::code::{Code, SymbolCoder, MAX_CODE_BITS};
use crate::error::{Result, TableError};

const WIDTHS: usize = MAX_CODE_BITS as usize + 1;

#[derive(Debug, Clone, Copy)]
struct Entry {
    pattern: u32,
    symbol: u8,
}

/// A validated, prefix-free code table.
///
/// Construction allocates the decode index; `encode` and `decode` do not
/// allocate. The table is immutable, so one instance can back any number of
/// encoders and decoders, across threads.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Code; 256],
    /// Entries sorted by (width, pattern)
    entries: Vec<Entry>,
    /// `entries[starts[w]..starts[w + 1]]` holds the codes of width `w`
    starts: [usize; WIDTHS + 1],
}

impl CodeTable {
    /// Build a table from one code per byte value.
    ///
    /// # Errors
    /// - `TableError::CodeTooLong` if a code is wider than 32 bits
    /// - `TableError::PatternOverflow` if a pattern has bits above its width
    /// - `TableError::NotPrefixFree` if one code is a prefix of another
    pub fn new(codes: [Code; 256]) -> Result<Self> {
        for (symbol, code) in (0u8..=255).zip(codes.iter()) {
            if code.num_bits > MAX_CODE_BITS {
                return Err(TableError::CodeTooLong { symbol, num_bits: code.num_bits }.into());
            }
            if code.pattern & !low_mask(code.num_bits) != 0 {
                return Err(TableError::PatternOverflow {
                    symbol,
                    pattern: code.pattern,
                    num_bits: code.num_bits,
                }
                .into());
            }
        }

        check_prefix_free(&codes)?;

        let mut entries: Vec<(u8, Entry)> = (0u8..=255)
            .zip(codes.iter())
            .filter(|(_, code)| !code.is_none())
            .map(|(symbol, code)| (code.num_bits, Entry { pattern: code.pattern, symbol }))
            .collect();
        entries.sort_by_key(|(width, entry)| (*width, entry.pattern));

        let mut starts = [0usize; WIDTHS + 1];
        for (width, _) in &entries {
            starts[usize::from(*width) + 1] += 1;
        }
        for w in 1..=WIDTHS {
            starts[w] += starts[w - 1];
        }

        Ok(Self {
            codes,
            entries: entries.into_iter().map(|(_, entry)| entry).collect(),
            starts,
        })
    }

    /// Build a table from `(pattern, num_bits)` pairs indexed by symbol.
    pub fn from_pairs(pairs: &[(u32, u8); 256]) -> Result<Self> {
        Self::new((*pairs).map(|(pattern, num_bits)| Code::new(pattern, num_bits)))
    }

    /// Code assigned to `symbol`.
    pub fn code(&self, symbol: u8) -> Code {
        self.codes[usize::from(symbol)]
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Width of the longest code, 0 for an empty table.
    pub fn max_code_bits(&self) -> u8 {
        (0..=MAX_CODE_BITS)
            .rev()
            .find(|&w| self.group(w).next().is_some())
            .unwrap_or(0)
    }

    fn group(&self, width: u8) -> std::slice::Iter<'_, Entry> {
        let w = usize::from(width);
        self.entries[self.starts[w]..self.starts[w + 1]].iter()
    }
}

impl SymbolCoder for CodeTable {
    fn encode(&self, symbol: u8) -> Code {
        self.code(symbol)
    }

    fn decode(&self, bits: u32) -> (u8, u8) {
        for width in 1..=MAX_CODE_BITS {
            let w = usize::from(width);
            let group = &self.entries[self.starts[w]..self.starts[w + 1]];
            if group.is_empty() {
                continue;
            }

            let candidate = shr32(bits, MAX_CODE_BITS - width);
            if let Ok(i) = group.binary_search_by_key(&candidate, |entry| entry.pattern) {
                return (group[i].symbol, width);
            }
        }

        (0, 0)
    }
}

/// Reject tables where one code is a prefix of another.
///
/// Each code covers an interval of the left-aligned 64-bit code space.
/// Sorted by start (shorter first on ties), a prefix always overlaps the
/// entry right after it, so comparing neighbours is enough.
fn check_prefix_free(codes: &[Code; 256]) -> Result<()> {
    let mut spans: Vec<(u64, u8, u8)> = (0u8..=255)
        .zip(codes.iter())
        .filter(|(_, code)| !code.is_none())
        .map(|(symbol, code)| {
            let start = u64::from(code.pattern) << (64 - u32::from(code.num_bits));
            (start, code.num_bits, symbol)
        })
        .collect();
    spans.sort_unstable();

    for pair in spans.windows(2) {
        let (start, width, prefix) = pair[0];
        let (next_start, _, symbol) = pair[1];
        let end = start | (u64::MAX >> width);
        if next_start <= end {
            return Err(TableError::NotPrefixFree { prefix, symbol }.into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn table_with(entries: &[(u8, u32, u8)]) -> Result<CodeTable> {
        let mut codes = [Code::NONE; 256];
        for &(symbol, pattern, num_bits) in entries {
            codes[usize::from(symbol)] = Code::new(pattern, num_bits);
        }
        CodeTable::new(codes)
    }

    #[test]
    fn test_lookup_by_width() {
        let table = table_with(&[(b'a', 0b0, 1), (b'b', 0b10, 2), (b'c', 0b110, 3)]).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.max_code_bits(), 3);
        assert_eq!(table.encode(b'b'), Code::new(0b10, 2));
        assert_eq!(table.encode(b'z'), Code::NONE);

        assert_eq!(table.decode(0x0000_0000), (b'a', 1));
        assert_eq!(table.decode(0x8000_0000), (b'b', 2));
        assert_eq!(table.decode(0xC000_0000), (b'c', 3));
        assert_eq!(table.decode(0xE000_0000), (0, 0));
    }

    #[test]
    fn test_32_bit_code() {
        let table = table_with(&[(0x00, 0, 1), (0xFF, 0xFFFF_FFFE, 32)]).unwrap();
        assert_eq!(table.decode(0xFFFF_FFFE), (0xFF, 32));
        assert_eq!(table.decode(0xFFFF_FFFF), (0, 0));
        assert_eq!(table.max_code_bits(), 32);
    }

    #[test]
    fn test_rejects_prefix() {
        let err = table_with(&[(b'a', 0b1, 1), (b'b', 0b10, 2)]).unwrap_err();
        assert_eq!(err, Error::Table(TableError::NotPrefixFree { prefix: b'a', symbol: b'b' }));
    }

    #[test]
    fn test_rejects_duplicate() {
        let err = table_with(&[(b'x', 0b01, 2), (b'y', 0b01, 2)]).unwrap_err();
        assert!(matches!(err, Error::Table(TableError::NotPrefixFree { .. })));
    }

    #[test]
    fn test_rejects_wide_code() {
        let err = table_with(&[(7, 0, 33)]).unwrap_err();
        assert_eq!(err, Error::Table(TableError::CodeTooLong { symbol: 7, num_bits: 33 }));
    }

    #[test]
    fn test_rejects_pattern_overflow() {
        let err = table_with(&[(1, 0b100, 2)]).unwrap_err();
        assert!(matches!(err, Error::Table(TableError::PatternOverflow { symbol: 1, .. })));
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let table = CodeTable::new([Code::NONE; 256]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_code_bits(), 0);
        assert_eq!(table.decode(0), (0, 0));
    }

    #[test]
    fn test_from_pairs() {
        let mut pairs = [(0u32, 0u8); 256];
        pairs[usize::from(b'x')] = (0b0, 1);
        pairs[usize::from(b'y')] = (0b11, 2);
        let table = CodeTable::from_pairs(&pairs).unwrap();
        assert_eq!(table.decode(0xC000_0000), (b'y', 2));
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodeTable>();
    }
}
