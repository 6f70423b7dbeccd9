//! CLI argument parsing.
//!
//! The host passes no arguments at all — everything arrives in the stdin
//! envelope. The flags here exist for manual local runs.

use clap::Parser;

/// Command-line arguments for the `scenetag` plugin binary.
#[derive(Parser, Debug)]
#[command(name = "scenetag", version, about, long_about = None)]
pub struct CliArgs {
    /// Operation mode for manual runs. When present, the stdin envelope
    /// is not read and the configured fallback connection is used
    /// (unauthenticated).
    pub mode: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, env = "SCENETAG_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,
}
