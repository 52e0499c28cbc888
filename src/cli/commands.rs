//! Command implementations for the Palimpsest CLI.

use std::fs;
use std::time::Instant;

use anyhow::Context;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{PalimpsestError, Result};
use crate::matching::{Match, MatchFinder, MatchSearcher, SearchConfig};
use crate::mvd::{Backbone, Mvd};
use crate::version::{VersionRegistry, VersionSet};

/// Execute a CLI command.
pub fn execute_command(args: PalimpsestArgs) -> Result<()> {
    match &args.command {
        Command::Versions(versions_args) => {
            let result = list_versions(versions_args)?;
            output_result("Versions", &result, &args)
        }
        Command::Text(text_args) => {
            let result = version_text(text_args)?;
            output_result("Version text", &result, &args)
        }
        Command::Find(find_args) => {
            let result = find_matches(find_args)?;
            output_result("Matches", &result, &args)
        }
        Command::Search(search_args) => {
            let result = search_matches(search_args)?;
            output_result("Search results", &result, &args)
        }
        Command::Parse(parse_args) => {
            let result = parse_records(parse_args)?;
            output_result("Parsed records", &result, &args)
        }
    }
}

/// List the versions of a document.
pub fn list_versions(args: &VersionsArgs) -> Result<VersionListResult> {
    let mvd = Mvd::load(&args.mvd_path)?;
    let versions = mvd
        .registry()
        .ids()
        .into_iter()
        .filter_map(|id| mvd.registry().get(id).cloned())
        .collect();
    Ok(VersionListResult {
        description: mvd.description().to_string(),
        versions,
        segments: mvd.segment_count(),
    })
}

/// Reconstruct one version's text.
pub fn version_text(args: &TextArgs) -> Result<VersionTextResult> {
    let mvd = Mvd::load(&args.mvd_path)?;
    let version = resolve_version(mvd.registry(), &args.witness)?;
    let bytes = mvd.version_text(version)?;
    Ok(VersionTextResult {
        version,
        short_name: mvd.version_short_name(version)?.to_string(),
        length: bytes.len() as u64,
        text: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Build matches for a run ending at the given coordinates.
pub fn find_matches(args: &FindArgs) -> Result<MatchListResult> {
    let start_time = Instant::now();
    let mvd = Mvd::load(&args.mvd_path)?;
    let versions = resolve_versions(&mvd, &args.versions)?;
    let matches = MatchFinder::new(&mvd).make_matches(
        args.length,
        &versions,
        args.end_segment,
        args.end_index,
        !args.single,
        args.state,
    )?;
    Ok(match_list(matches, start_time))
}

/// Search the selected versions for a pattern.
pub fn search_matches(args: &SearchArgs) -> Result<MatchListResult> {
    let start_time = Instant::now();
    let mvd = Mvd::load(&args.mvd_path)?;
    let versions = resolve_versions(&mvd, &args.versions)?;

    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("loading search config from {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if args.single {
        config = config.with_multiple(false);
    }
    if let Some(max) = args.max {
        config = config.with_max_matches(max);
    }
    if let Some(state) = args.state {
        config = config.with_state(state);
    }
    if args.sequential {
        config = config.with_parallel(false);
    }

    let matches = MatchSearcher::new(&mvd).search(args.pattern.as_bytes(), &versions, &config)?;
    Ok(match_list(matches, start_time))
}

/// Parse serialized match records.
pub fn parse_records(args: &ParseArgs) -> Result<MatchListResult> {
    let start_time = Instant::now();
    let text = match (&args.records, &args.file) {
        (_, Some(path)) => fs::read(path)
            .with_context(|| format!("reading match records from {}", path.display()))?,
        (Some(records), None) => records.clone().into_bytes(),
        (None, None) => {
            return Err(PalimpsestError::invalid_argument(
                "either RECORDS or --file is required",
            ));
        }
    };
    let matches = Match::parse_all(&text)?;
    Ok(match_list(matches, start_time))
}

/// Resolve a version given as a numeric id or a siglum.
///
/// Sigla take precedence, so a version named "2" is found by name first.
pub fn resolve_version(registry: &VersionRegistry, token: &str) -> Result<u16> {
    let token = token.trim();
    if let Some(id) = registry.id_of(token) {
        return Ok(id);
    }
    match token.parse::<u16>() {
        Ok(id) if registry.contains(id) => Ok(id),
        _ => Err(PalimpsestError::range(format!("Unknown version: {token}"))),
    }
}

/// Resolve a list of version tokens. An empty list selects every version.
pub fn resolve_versions(mvd: &Mvd, tokens: &[String]) -> Result<VersionSet> {
    if tokens.is_empty() {
        return Ok(mvd.all_versions());
    }
    tokens
        .iter()
        .map(|token| resolve_version(mvd.registry(), token))
        .collect()
}

fn match_list(matches: Vec<Match>, start_time: Instant) -> MatchListResult {
    MatchListResult {
        total: matches.len(),
        matches,
        duration_ms: start_time.elapsed().as_millis() as u64,
    }
}
