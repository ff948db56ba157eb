//! CLI parse: clap types for replconf. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Patch node configuration files from a JSON descriptor
#[derive(Parser, Debug)]
#[command(name = "replconf", version)]
#[command(about = "Patch node configuration files from a JSON descriptor")]
pub struct Cli {
    /// Descriptor file listing one record per node
    #[arg(default_value = "config.json")]
    pub descriptor: PathBuf,

    /// Report the changes without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Summary format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (text, pretty, json)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr)
    #[arg(long)]
    pub log_output: Option<String>,
}
