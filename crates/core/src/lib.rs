//! huffpack-core: streaming, buffer-bounded Huffman bit-packing
//!
//! This library packs 8-bit symbols into a non-byte-aligned bit-stream and
//! unpacks them again, against a symbol/code mapping supplied by the caller.
//! It is the bit-level engine under protocol header compression such as the
//! HPACK static Huffman code.
//!
//! # Architecture
//!
//! - `code`: the `Code` value type and the `SymbolCoder` strategy trait
//! - `table`: a validated, table-driven `SymbolCoder`
//! - `encoder`: resumable packing into bounded output
//! - `decoder`: resumable unpacking with a 64-bit lookahead register
//! - `length`: exact encoded size without encoding
//! - `bitio`: the fixed-capacity output buffer and bit helpers
//!
//! # Streaming
//!
//! Callers pass an input cursor (`&mut &[u8]`) and a fixed-capacity
//! [`ByteBuf`]. Each call does as much work as fits and returns. A code cut
//! off by a full output, or bits left over when input runs out, stay in the
//! encoder/decoder and are picked up by the next call, so any chunking of
//! one logical stream gives the same bits as a single call.
//!
//! # Design Principles
//!
//! - **No allocation**: encode, decode and estimate only touch caller buffers
//! - **No panics**: failures are `Error::UnknownSymbol` or `Error::ShortBuffer`
//! - **Resumable**: `ShortBuffer` is never data loss

pub mod bitio;
pub mod code;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod length;
pub mod table;

// Re-export commonly used types
pub use bitio::ByteBuf;
pub use code::{Code, FnCoder, SymbolCoder, MAX_CODE_BITS};
pub use decoder::Decoder;
pub use encoder::{Encoder, DEFAULT_EOS_PADDING};
pub use error::{Error, Result, TableError};
pub use length::estimate_encoded_length;
pub use table::CodeTable;
