//! # Palimpsest
//!
//! A compact store for many versions of one text, with a match engine for
//! collation tools.
//!
//! ## Features
//!
//! - Multi-version documents: every version encoded once as an ordered pair backbone
//! - Bitset version sets with ascending iteration
//! - Reconstruction of per-version offsets from backbone coordinates
//! - Pattern search across chosen versions
//! - A bracketed textual record format for exchanging matches

pub mod cli;
pub mod error;
pub mod matching;
pub mod mvd;
pub mod util;
pub mod version;

pub mod prelude {
    pub use crate::error::{PalimpsestError, Result};
    pub use crate::matching::{
        BracketedRecord, ChunkState, Match, MatchFinder, MatchKey, MatchSearcher, SearchConfig,
    };
    pub use crate::mvd::{Backbone, Mvd, Pair};
    pub use crate::version::{VersionInfo, VersionRegistry, VersionSet};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
