//! huffpack-soak: drives the engine over the RFC 7541 table with random
//! buffer sizes and checks every round reproduces its input.

mod config;
mod error;
mod hpack_table;
mod input_gen;
mod metrics;
mod soak;

use config::Config;
use error::{AppError, Result};
use metrics::Metrics;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(metrics) if metrics.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &[String]) -> Result<Metrics> {
    let config = Config::from_args(args).map_err(AppError::Config)?;
    if config.print_config {
        config.print();
    }

    let table = hpack_table::rfc7541_table()?;
    tracing::info!(
        symbols = table.len(),
        max_code_bits = table.max_code_bits(),
        "loaded RFC 7541 table"
    );

    let file_data = match &config.input_file {
        Some(path) => Some(std::fs::read(path)?),
        None => None,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut metrics = Metrics::new();

    for round in 0..config.rounds {
        let span = tracing::debug_span!("round", round);
        let _guard = span.enter();

        let generated;
        let data: &[u8] = match &file_data {
            Some(bytes) => bytes,
            None => {
                // Per-round data seed, logged at debug level.
                let data_seed: u64 = rng.gen();
                tracing::debug!(data_seed, "generating sample");
                generated = input_gen::generate_sample_data(data_seed, config.sample_bytes);
                &generated
            }
        };

        let report = soak::run_round(&table, data, &mut rng, config.max_chunk)?;
        report.record(&mut metrics);
    }

    metrics.complete();
    tracing::info!(
        rounds = metrics.rounds,
        mismatches = metrics.mismatches,
        seed = config.seed,
        "soak finished"
    );
    tracing::debug!("metrics:\n{}", metrics.export_text());

    if config.print_metrics {
        metrics.print_summary();
    }
    metrics.print_result();

    Ok(metrics)
}
