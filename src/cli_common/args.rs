//! Command-line arguments shared by every subcommand

use clap::Args;
use std::path::PathBuf;

use super::OutputFormat;

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Analyzer configuration file (TOML)
    #[arg(long, global = true, env = "PLAGIARISM_CONFIG")]
    pub config: Option<PathBuf>,
}
