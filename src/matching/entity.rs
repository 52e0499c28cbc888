//! The match entity.

use std::fmt;
use std::hash::{Hash, Hasher};

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::matching::codec::BracketedRecord;
use crate::matching::state::ChunkState;

/// A located run of text within one version.
///
/// Equality and hashing consider only `(version, offset, length)`: two
/// matches describing the same physical run are equal whatever their short
/// name or classification tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub(crate) version: u16,
    pub(crate) offset: u32,
    pub(crate) length: u32,
    #[serde(default)]
    pub(crate) short_name: String,
    #[serde(default)]
    pub(crate) state: ChunkState,
    #[serde(skip)]
    pub(crate) found: bool,
}

/// Identity of a match, usable as a hash key in a caller-owned seen set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchKey {
    pub version: u16,
    pub offset: u32,
    pub length: u32,
}

impl Match {
    /// Create a match with the `none` classification tag.
    pub fn new<S: Into<String>>(version: u16, offset: u32, length: u32, short_name: S) -> Self {
        Self::with_state(version, offset, length, short_name, ChunkState::None)
    }

    /// Create a match with an explicit classification tag.
    pub fn with_state<S: Into<String>>(
        version: u16,
        offset: u32,
        length: u32,
        short_name: S,
        state: ChunkState,
    ) -> Self {
        Match {
            version,
            offset,
            length,
            short_name: short_name.into(),
            state,
            found: false,
        }
    }

    /// Offset of the first byte of the run within its version.
    pub fn start_offset(&self) -> u32 {
        self.offset
    }

    /// Length of the run in bytes.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Id of the version the run occurs in.
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Short name of the version, possibly empty.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Classification tag.
    pub fn state(&self) -> ChunkState {
        self.state
    }

    /// Whether a consumer has already accounted for this match.
    pub fn is_found(&self) -> bool {
        self.found
    }

    /// Set the found flag.
    pub fn set_found(&mut self, found: bool) {
        self.found = found;
    }

    /// The identity of this match.
    pub fn key(&self) -> MatchKey {
        MatchKey {
            version: self.version,
            offset: self.offset,
            length: self.length,
        }
    }

    /// Concatenate two match lists, first list first. No deduplication.
    pub fn merge(mut first: Vec<Match>, second: Vec<Match>) -> Vec<Match> {
        first.extend(second);
        first
    }

    /// Flag every match equal to an earlier one as found.
    ///
    /// Returns the number of matches newly flagged.
    pub fn mark_duplicates(matches: &mut [Match]) -> usize {
        let mut seen = AHashSet::with_capacity(matches.len());
        let mut flagged = 0;
        for m in matches.iter_mut() {
            if !seen.insert(m.key()) && !m.found {
                m.found = true;
                flagged += 1;
            }
        }
        flagged
    }
}

impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.length == other.length
            && self.offset == other.offset
    }
}

impl Eq for Match {}

impl Hash for Match {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
