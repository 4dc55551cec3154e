//! Configuration for the soak harness.
//!
//! Handles parsing command-line arguments and generating defaults
//! (randomized where useful, reproducible with a seed).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments. All defaults are derived from
//! the seed and printed, so a failing run can be replayed exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// Complete configuration for a soak run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // === Input ===
    /// Input file path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Size of each generated sample in bytes
    pub sample_bytes: usize,

    // === Rounds ===
    /// Seed for sample generation and chunk sizes
    pub seed: u64,

    /// Number of encode/decode rounds
    pub rounds: usize,

    /// Largest output or input chunk handed to a single call
    pub max_chunk: usize,

    // === Behavior ===
    /// Whether to print the resolved config
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If --seed is not given, a time-based seed is used for all randomness.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut rounds: Option<usize> = None;
        let mut max_chunk: Option<usize> = None;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--len" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--len requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid len")?);
                }
                "--rounds" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--rounds requires a number".to_string());
                    }
                    rounds = Some(args[i].parse().map_err(|_| "invalid rounds")?);
                }
                "--max-chunk" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--max-chunk requires a number".to_string());
                    }
                    let value: usize = args[i].parse().map_err(|_| "invalid max-chunk")?;
                    if value == 0 {
                        return Err("--max-chunk must be at least 1".to_string());
                    }
                    max_chunk = Some(value);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        // Generate defaults using seed
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        Ok(Config {
            input_file,
            sample_bytes: sample_bytes.unwrap_or_else(|| rng.gen_range(1024..=16 * 1024)),
            seed,
            rounds: rounds.unwrap_or(16),
            max_chunk: max_chunk.unwrap_or_else(|| rng.gen_range(1..=64)),
            print_config,
            print_metrics,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.input_file {
            Some(path) => println!("Input file: {}", path.display()),
            None => println!("Input file: (generate {} byte samples)", self.sample_bytes),
        }
        println!("Seed: {}", self.seed);
        println!("Rounds: {}", self.rounds);
        println!("Max chunk: {} bytes", self.max_chunk);
        println!();
    }
}

fn print_help() {
    println!("huffpack-soak: chunked encode/decode soak over the HPACK Huffman code");
    println!();
    println!("USAGE:");
    println!("    huffpack-soak [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>         Input file (default: generate samples)");
    println!("    --len <N>           Generated sample size (default: random 1024-16384)");
    println!("    --seed <N>          Random seed for determinism");
    println!("    --rounds <N>        Encode/decode rounds (default: 16)");
    println!("    --max-chunk <N>     Largest buffer per call (default: random 1-64)");
    println!();
    println!("    --print-config      Print resolved configuration");
    println!("    --no-metrics        Don't print metrics summary");
    println!("    --help, -h          Print this help");
    println!();
    println!("Set RUST_LOG=debug for per-round logging.");
    println!();
}
