//! # Octet Application Library
//!
//! The pieces of the command-line host that tests and other binaries reuse:
//! configuration loading, JSON wire types and the script runner.

pub mod cli;
pub mod config;
pub mod script;
