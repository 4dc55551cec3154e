//! Counters collected while soaking the engine.
//!
//! Tracks how much data went through, how often calls had to be resumed,
//! and whether every round reproduced its input.
//!
//! # Thread Safety
//!
//! `Metrics` is NOT thread-safe. The soak loop is single-threaded and
//! updates it after each stage.

use std::time::{Duration, Instant};

/// Counters for one soak run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Volume ===
    /// Rounds completed
    pub rounds: u64,

    /// Symbols fed to the encoder (once per round)
    pub input_bytes: u64,

    /// Packed bytes produced (once per round)
    pub encoded_bytes: u64,

    // === Calls ===
    /// Encode calls made by chunked encodes
    pub encode_calls: u64,

    /// Encode calls that stopped on a full output
    pub encode_short_buffers: u64,

    /// Decode calls made by chunked decodes
    pub decode_calls: u64,

    /// Decode calls that stopped on a full output
    pub decode_short_buffers: u64,

    // === Verification ===
    /// Rounds whose chunked output or round trip did not match
    pub mismatches: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            rounds: 0,
            input_bytes: 0,
            encoded_bytes: 0,
            encode_calls: 0,
            encode_short_buffers: 0,
            decode_calls: 0,
            decode_short_buffers: 0,
            mismatches: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Packed size relative to input (encoded / input).
    ///
    /// Returns 0.0 if nothing was encoded.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.encoded_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Share of encode and decode calls that had to be resumed.
    pub fn resume_rate(&self) -> f64 {
        let calls = self.encode_calls + self.decode_calls;
        if calls == 0 {
            0.0
        } else {
            (self.encode_short_buffers + self.decode_short_buffers) as f64 / calls as f64
        }
    }

    /// Input symbols processed per second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Soak Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!("Rounds: {}", self.rounds);
        println!();

        println!("=== Volume ===");
        println!("Input:   {} bytes", self.input_bytes);
        println!("Encoded: {} bytes", self.encoded_bytes);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();

        println!("=== Calls ===");
        println!("Encode calls: {} ({} resumed)", self.encode_calls, self.encode_short_buffers);
        println!("Decode calls: {} ({} resumed)", self.decode_calls, self.decode_short_buffers);
        println!("Resume rate: {:.2}%", self.resume_rate() * 100.0);
        println!();

        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.passed() {
            println!("✓ Soak passed");
            println!("  {} rounds, {} bytes in {} ms", self.rounds, self.input_bytes, self.duration().as_millis());
        } else {
            println!("✗ Soak failed: {} of {} rounds mismatched", self.mismatches, self.rounds);
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             rounds={}\n\
             input_bytes={}\n\
             encoded_bytes={}\n\
             compression_ratio={:.4}\n\
             encode_calls={}\n\
             decode_calls={}\n\
             resume_rate={:.4}\n\
             mismatches={}\n",
            self.duration().as_millis(),
            self.rounds,
            self.input_bytes,
            self.encoded_bytes,
            self.compression_ratio(),
            self.encode_calls,
            self.decode_calls,
            self.resume_rate(),
            self.mismatches,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
