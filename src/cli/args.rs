//! Command line argument parsing for the Palimpsest CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::matching::ChunkState;

/// Palimpsest - multi-version document match engine
#[derive(Parser, Debug, Clone)]
#[command(name = "palimpsest")]
#[command(about = "Locate and exchange runs of text shared by versions of a multi-version document")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PalimpsestArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PalimpsestArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Log level for the effective verbosity. Engine tracing of individual
    /// records starts at `-vvvv`.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the versions of a document
    Versions(VersionsArgs),

    /// Print the reconstructed text of one version
    Text(TextArgs),

    /// Build matches for a run ending at a backbone coordinate
    Find(FindArgs),

    /// Search versions for a pattern
    Search(SearchArgs),

    /// Parse serialized match records
    Parse(ParseArgs),
}

/// Arguments for listing versions
#[derive(Parser, Debug, Clone)]
pub struct VersionsArgs {
    /// Path to the MVD file (JSON)
    #[arg(value_name = "MVD_FILE")]
    pub mvd_path: PathBuf,
}

/// Arguments for printing a version
#[derive(Parser, Debug, Clone)]
pub struct TextArgs {
    /// Path to the MVD file (JSON)
    #[arg(value_name = "MVD_FILE")]
    pub mvd_path: PathBuf,

    /// Version id or siglum
    #[arg(short, long, value_name = "VERSION")]
    pub witness: String,
}

/// Arguments for building matches from coordinates
#[derive(Parser, Debug, Clone)]
pub struct FindArgs {
    /// Path to the MVD file (JSON)
    #[arg(value_name = "MVD_FILE")]
    pub mvd_path: PathBuf,

    /// Run length in bytes
    #[arg(short, long)]
    pub length: u32,

    /// Versions to report (ids or sigla, comma separated; all if omitted)
    #[arg(long, value_delimiter = ',')]
    pub versions: Vec<String>,

    /// Index of the segment the run ends in
    #[arg(long)]
    pub end_segment: usize,

    /// Index of the run's last byte within the end segment
    #[arg(long)]
    pub end_index: usize,

    /// Report only the lowest version
    #[arg(long)]
    pub single: bool,

    /// Classification tag for the produced matches
    #[arg(long, default_value = "none")]
    pub state: ChunkState,
}

/// Arguments for pattern search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Path to the MVD file (JSON)
    #[arg(value_name = "MVD_FILE")]
    pub mvd_path: PathBuf,

    /// Text to search for
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Versions to search (ids or sigla, comma separated; all if omitted)
    #[arg(long, value_delimiter = ',')]
    pub versions: Vec<String>,

    /// Search configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Report only the first version with a hit
    #[arg(long)]
    pub single: bool,

    /// Maximum number of matches
    #[arg(short, long)]
    pub max: Option<usize>,

    /// Classification tag for the produced matches
    #[arg(long)]
    pub state: Option<ChunkState>,

    /// Scan versions one at a time
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for parsing match records
#[derive(Parser, Debug, Clone)]
pub struct ParseArgs {
    /// Records to parse
    #[arg(value_name = "RECORDS", required_unless_present = "file")]
    pub records: Option<String>,

    /// Read records from a file instead
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
