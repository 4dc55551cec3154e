//! Sample input generation for soak runs.
//!
//! When no input file is given, we generate data that looks like what the
//! HPACK code is used for, mixed with bytes that hit its longest codes.
//!
//! # Design
//!
//! Generated data has:
//! - Header-like text (short codes, 5-8 bits)
//! - Repeated header values (runs of the same codes)
//! - Control and high bytes (the 20-30 bit codes)
//!
//! Long codes are what make output boundaries land mid-code, so they are
//! kept in every sample.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const HEADER_NAMES: &[&[u8]] = &[
    b"content-type",
    b"accept-encoding",
    b"cache-control",
    b"user-agent",
    b"x-request-id",
    b":authority",
    b":path",
    b"cookie",
];

const HEADER_VALUES: &[&[u8]] = &[
    b"text/html; charset=utf-8",
    b"gzip, deflate, br",
    b"no-cache",
    b"Mozilla/5.0 (X11; Linux x86_64)",
    b"www.example.com",
    b"/index.html?q=1&lang=en",
    b"Mon, 21 Oct 2013 20:13:21 GMT",
];

/// Generate sample data with mixed code widths.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_bytes`: exact size of generated data
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_with(&mut rng, size_bytes)
}

/// Same as [`generate_sample_data`], drawing from an existing generator.
fn generate_with(rng: &mut ChaCha8Rng, size_bytes: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size_bytes + 64);

    while data.len() < size_bytes {
        let chunk_type: u8 = rng.gen_range(0..10);

        match chunk_type {
            // 50% header lines
            0..=4 => {
                let name = HEADER_NAMES[rng.gen_range(0..HEADER_NAMES.len())];
                let value = HEADER_VALUES[rng.gen_range(0..HEADER_VALUES.len())];
                data.extend_from_slice(name);
                data.extend_from_slice(b": ");
                data.extend_from_slice(value);
                data.extend_from_slice(b"\r\n");
            }

            // 20% repeated value
            5..=6 => {
                let value = HEADER_VALUES[rng.gen_range(0..HEADER_VALUES.len())];
                for _ in 0..rng.gen_range(2..=4) {
                    data.extend_from_slice(value);
                }
            }

            // 30% raw bytes, biased to the long codes
            _ => {
                for _ in 0..rng.gen_range(1..=32) {
                    let byte = if rng.gen_bool(0.5) {
                        rng.gen_range(0x00..0x20)
                    } else {
                        rng.gen_range(0x80..=0xff)
                    };
                    data.push(byte);
                }
            }
        }
    }

    // Truncate to exact size
    data.truncate(size_bytes);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sample_data() {
        let data = generate_sample_data(42, 1000);
        assert_eq!(data.len(), 1000);
    }

    #[test]
    fn test_determinism() {
        let data1 = generate_sample_data(12345, 5000);
        let data2 = generate_sample_data(12345, 5000);

        assert_eq!(data1, data2);
    }

    #[test]
    fn test_different_seeds() {
        let data1 = generate_sample_data(1, 1000);
        let data2 = generate_sample_data(2, 1000);

        assert_ne!(data1, data2);
    }

    #[test]
    fn test_various_sizes() {
        for size in [0, 1, 100, 1000, 10000] {
            let data = generate_sample_data(999, size);
            assert_eq!(data.len(), size);
        }
    }

    #[test]
    fn test_contains_long_code_bytes() {
        let data = generate_sample_data(7, 10_000);
        assert!(data.iter().any(|&b| b >= 0x80));
        assert!(data.iter().any(|&b| b < 0x20));
    }
}
