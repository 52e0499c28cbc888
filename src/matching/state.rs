//! Classification tags attached to matches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PalimpsestError, Result};

/// What a located run represents to the caller that requested it.
///
/// The match engine never interprets the tag; it only stamps it on the
/// matches it produces and writes it as trailing text when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkState {
    /// No particular meaning.
    #[default]
    None,
    /// Text present only in the base version.
    Deleted,
    /// Text present only in the compared version.
    Added,
    /// Text shared as a backup copy.
    Backup,
    /// Text merged from several versions.
    Merged,
    /// A hit of an explicit search.
    Found,
    /// The source of a transposition.
    Parent,
    /// The destination of a transposition.
    Child,
    /// Text moved relative to the other version.
    Transposed,
}

impl ChunkState {
    /// All tags in declaration order.
    pub const ALL: [ChunkState; 9] = [
        ChunkState::None,
        ChunkState::Deleted,
        ChunkState::Added,
        ChunkState::Backup,
        ChunkState::Merged,
        ChunkState::Found,
        ChunkState::Parent,
        ChunkState::Child,
        ChunkState::Transposed,
    ];

    /// The textual name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkState::None => "none",
            ChunkState::Deleted => "deleted",
            ChunkState::Added => "added",
            ChunkState::Backup => "backup",
            ChunkState::Merged => "merged",
            ChunkState::Found => "found",
            ChunkState::Parent => "parent",
            ChunkState::Child => "child",
            ChunkState::Transposed => "transposed",
        }
    }
}

impl fmt::Display for ChunkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChunkState {
    type Err = PalimpsestError;

    fn from_str(s: &str) -> Result<Self> {
        ChunkState::ALL
            .iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| PalimpsestError::parse(format!("Unknown chunk state: {s}")))
    }
}
