//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PalimpsestArgs};
use crate::error::Result;
use crate::matching::{BracketedRecord, Match};
use crate::version::VersionInfo;

/// Result structure for version listings.
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionListResult {
    pub description: String,
    pub versions: Vec<VersionInfo>,
    pub segments: usize,
}

/// Result structure for a reconstructed version.
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionTextResult {
    pub version: u16,
    pub short_name: String,
    pub length: u64,
    pub text: String,
}

/// Result structure for commands producing matches.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchListResult {
    pub matches: Vec<Match>,
    pub total: usize,
    pub duration_ms: u64,
}

/// Results that can print themselves for a terminal.
pub trait HumanOutput {
    /// Print in human-readable form.
    fn print_human(&self, args: &PalimpsestArgs);
}

impl HumanOutput for VersionListResult {
    fn print_human(&self, args: &PalimpsestArgs) {
        if !self.description.is_empty() {
            println!("{}", self.description);
        }
        if args.verbosity() > 1 {
            println!("Segments: {}", self.segments);
        }
        for info in &self.versions {
            if info.long_name.is_empty() {
                println!("{:>5}  {}", info.id, info.short_name);
            } else {
                println!("{:>5}  {}  {}", info.id, info.short_name, info.long_name);
            }
        }
    }
}

impl HumanOutput for VersionTextResult {
    fn print_human(&self, args: &PalimpsestArgs) {
        if args.verbosity() > 1 {
            println!(
                "Version {} ({}), {} bytes",
                self.version, self.short_name, self.length
            );
        }
        println!("{}", self.text);
    }
}

impl HumanOutput for MatchListResult {
    fn print_human(&self, args: &PalimpsestArgs) {
        for m in &self.matches {
            println!("{}", m.render());
        }
        if args.verbosity() > 1 {
            println!();
            println!("{} match(es) in {} ms", self.total, self.duration_ms);
        }
    }
}

/// Output a result in the selected format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &PalimpsestArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PalimpsestArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
