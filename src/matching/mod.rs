//! Matches: located runs of text within individual versions.
//!
//! - [`entity`]: the [`Match`] value itself.
//! - [`codec`]: the bracketed textual form used between tool invocations.
//! - [`finder`]: building matches from backbone coordinates.
//! - [`search`]: locating a pattern in selected versions.

pub mod codec;
pub mod config;
pub mod entity;
pub mod finder;
pub mod search;
pub mod state;

// Re-export commonly used types
pub use codec::BracketedRecord;
pub use config::SearchConfig;
pub use entity::{Match, MatchKey};
pub use finder::MatchFinder;
pub use search::MatchSearcher;
pub use state::ChunkState;
