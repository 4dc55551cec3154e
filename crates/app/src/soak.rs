//! One soak round: encode and decode a sample under random buffer sizes.
//!
//! Each round runs three passes over the same input and cross-checks them:
//!
//! 1. One-shot encode into exactly `estimate_encoded_length` bytes
//! 2. Chunked encode, every call getting a random 1..=max_chunk output
//! 3. Chunked decode of the packed bytes, with random input pieces and
//!    random output sizes
//!
//! The round passes when the two encodes are byte-identical, the one-shot
//! encode fills its buffer exactly, and the decode reproduces the input.

use crate::error::Result;
use crate::metrics::Metrics;
use huffpack_core::{estimate_encoded_length, ByteBuf, Decoder, Encoder, Error, SymbolCoder};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Outcome of a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub input_len: usize,
    pub estimate: usize,
    /// Length of the one-shot encode
    pub encoded_len: usize,
    pub encode_calls: u64,
    pub encode_short_buffers: u64,
    pub decode_calls: u64,
    pub decode_short_buffers: u64,
    /// CRC-32 of the input symbols
    pub input_crc: u32,
    /// CRC-32 of the decoded symbols
    pub output_crc: u32,
    /// Chunked encode matched the one-shot encode
    pub encodings_match: bool,
    /// Decoded symbols matched the input
    pub round_trip: bool,
}

impl RoundReport {
    pub fn passed(&self) -> bool {
        self.encodings_match && self.round_trip && self.encoded_len == self.estimate
    }

    /// Fold this round into the run totals.
    pub fn record(&self, metrics: &mut Metrics) {
        metrics.rounds += 1;
        metrics.input_bytes += self.input_len as u64;
        metrics.encoded_bytes += self.encoded_len as u64;
        metrics.encode_calls += self.encode_calls;
        metrics.encode_short_buffers += self.encode_short_buffers;
        metrics.decode_calls += self.decode_calls;
        metrics.decode_short_buffers += self.decode_short_buffers;
        if !self.passed() {
            metrics.mismatches += 1;
        }
    }
}

struct Passes {
    bytes: Vec<u8>,
    calls: u64,
    short_buffers: u64,
}

/// Run one round over `data`.
///
/// `UnknownSymbol` from any pass is returned as an error; a mismatch is
/// reported in the [`RoundReport`] instead.
pub fn run_round<C: SymbolCoder>(
    coder: &C,
    data: &[u8],
    rng: &mut ChaCha8Rng,
    max_chunk: usize,
) -> Result<RoundReport> {
    let max_chunk = max_chunk.max(1);
    let estimate = estimate_encoded_length(coder, data)?;

    let one_shot = encode_one_shot(coder, data, estimate)?;
    let chunked = encode_chunked(coder, data, rng, max_chunk)?;
    let decoded = decode_chunked(coder, &one_shot, rng, max_chunk, data.len())?;

    let report = RoundReport {
        input_len: data.len(),
        estimate,
        encoded_len: one_shot.len(),
        encode_calls: chunked.calls,
        encode_short_buffers: chunked.short_buffers,
        decode_calls: decoded.calls,
        decode_short_buffers: decoded.short_buffers,
        input_crc: crc32fast::hash(data),
        output_crc: crc32fast::hash(&decoded.bytes),
        encodings_match: chunked.bytes == one_shot,
        round_trip: decoded.bytes == data,
    };

    if report.passed() {
        tracing::debug!(
            input_len = report.input_len,
            encoded_len = report.encoded_len,
            encode_calls = report.encode_calls,
            decode_calls = report.decode_calls,
            crc = report.input_crc,
            "round passed"
        );
    } else {
        tracing::warn!(
            input_len = report.input_len,
            estimate = report.estimate,
            encoded_len = report.encoded_len,
            encodings_match = report.encodings_match,
            input_crc = report.input_crc,
            output_crc = report.output_crc,
            "round mismatch"
        );
    }

    Ok(report)
}

fn encode_one_shot<C: SymbolCoder>(coder: &C, data: &[u8], estimate: usize) -> Result<Vec<u8>> {
    // A zero-capacity buffer is full on entry, even for empty input.
    let mut storage = vec![0u8; estimate.max(1)];
    let mut out = ByteBuf::new(&mut storage);
    let mut input = data;
    Encoder::new(coder).encode(&mut input, &mut out)?;
    let len = out.len();
    storage.truncate(len);
    Ok(storage)
}

fn encode_chunked<C: SymbolCoder>(
    coder: &C,
    data: &[u8],
    rng: &mut ChaCha8Rng,
    max_chunk: usize,
) -> Result<Passes> {
    let mut encoder = Encoder::new(coder);
    let mut input = data;
    let mut passes = Passes {
        bytes: Vec::new(),
        calls: 0,
        short_buffers: 0,
    };
    let mut storage = vec![0u8; max_chunk];

    loop {
        let size = rng.gen_range(1..=max_chunk);
        let mut out = ByteBuf::new(&mut storage[..size]);
        let result = encoder.encode(&mut input, &mut out);
        passes.calls += 1;
        passes.bytes.extend_from_slice(out.filled());

        match result {
            Ok(()) => return Ok(passes),
            Err(Error::ShortBuffer) => passes.short_buffers += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

fn decode_chunked<C: SymbolCoder>(
    coder: &C,
    encoded: &[u8],
    rng: &mut ChaCha8Rng,
    max_chunk: usize,
    expected_len: usize,
) -> Result<Passes> {
    let mut decoder = Decoder::new(coder);
    let mut remaining = encoded;
    let mut passes = Passes {
        bytes: Vec::with_capacity(expected_len),
        calls: 0,
        short_buffers: 0,
    };
    let mut storage = vec![0u8; max_chunk];

    // An empty stream still gets one call.
    loop {
        let take = rng.gen_range(1..=max_chunk).min(remaining.len());
        let (piece, rest) = remaining.split_at(take);
        remaining = rest;

        let mut input = piece;
        loop {
            let size = rng.gen_range(1..=max_chunk);
            let mut out = ByteBuf::new(&mut storage[..size]);
            let result = decoder.decode(&mut input, &mut out);
            passes.calls += 1;
            passes.bytes.extend_from_slice(out.filled());

            match result {
                Ok(()) => break,
                Err(Error::ShortBuffer) => passes.short_buffers += 1,
                Err(e) => return Err(e.into()),
            }
        }

        if remaining.is_empty() {
            return Ok(passes);
        }
    }
}
