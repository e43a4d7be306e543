//! # Octet
//!
//! Command-line host for the octet-core byte-buffer codecs.
//!
//! ## Usage
//!
//! ```bash
//! # One operation, operands as JSON
//! octet call Data.HexToBytes '{"text": "48690a"}'
//! octet call GetInteger32 '{"buffer": "AQIDBA=="}' '{"integer": 1}' '{"endianness": "big-endian"}'
//!
//! # A script of chained operations
//! octet run -f script.json
//!
//! # List operations
//! octet ops
//! ```

use clap::Parser;
use octet::cli;
use octet::config::{AppConfig, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // Configuration decides the log format, so it is loaded before logging
    // starts and any error is reported once the subscriber is up.
    let config = AppConfig::load(cli.config.as_deref());
    let log_format = config
        .as_ref()
        .map(|c| c.log_format)
        .unwrap_or_default();
    init_tracing(log_format, cli.verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::execute(cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing(format: LogFormat, verbose: bool) {
    let default_filter = if verbose { "octet=debug,octet_core=debug" } else { "octet=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
