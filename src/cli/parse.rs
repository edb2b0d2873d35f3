//! CLI parse: clap types for graphsync. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Graphsync CLI - keep follows and lists in step with a YAML document
#[derive(Parser)]
#[command(name = "graphsync")]
#[command(about = "Reconcile a social account's follows and lists against a YAML document")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Apply every pending change without prompting
    #[arg(long, short = 'y', global = true, conflicts_with = "dry_run")]
    pub yes: bool,

    /// Show pending changes without applying any of them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write the remote account's follows and lists to a document
    Download {
        /// Account document path
        file: PathBuf,
    },
    /// Reconcile the remote account toward a document
    Upload {
        /// Account document path
        file: PathBuf,
    },
    /// Check a document without contacting the remote API
    Validate {
        /// Account document path
        file: PathBuf,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Download { .. } => "download",
            Commands::Upload { .. } => "upload",
            Commands::Validate { .. } => "validate",
        }
    }
}
