//! # Octet CLI Module
//!
//! This module implements the CLI interface for Octet.
//!
//! ## Available Commands
//!
//! - `call` - Run one operation on JSON operands
//! - `run` - Run a JSON script of chained operations
//! - `ops` - List operations and their operand signatures

mod commands;

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use octet_core::OctetError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Octet - typed byte-buffer codecs
///
/// Create byte buffers, convert them to and from text, Base64, hex and byte
/// arrays, and read or write fixed-width numbers at byte positions.
#[derive(Parser, Debug)]
#[command(name = "octet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one operation
    Call {
        /// Operation name, e.g. Data.HexToBytes or HexToBytes
        operation: String,

        /// Operands as JSON, e.g. '{"text": "ff00"}'
        operands: Vec<String>,
    },

    /// Run a JSON script of steps
    Run {
        /// Path to the script file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List operations and their signatures
    Ops,
}

/// Output switches shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json_mode: bool,
    pub verbose: bool,
    pub quiet: bool,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and resolved configuration.
pub fn execute(cli: Cli, config: &AppConfig) -> Result<(), OctetError> {
    let output = Output {
        json_mode: cli.json_mode,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    match cli.command {
        Some(Commands::Call {
            operation,
            operands,
        }) => cmd_call(config, output, &operation, &operands),
        Some(Commands::Run { file }) => cmd_run(config, output, &file),
        Some(Commands::Ops) | None => cmd_ops(output),
    }
}
