//! Configuration for pattern searches.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matching::state::ChunkState;

/// Configuration for [`MatchSearcher`](crate::matching::search::MatchSearcher).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Report hits in every requested version, or only the first version with a hit.
    pub multiple: bool,
    /// Classification tag stamped on produced matches.
    pub state: ChunkState,
    /// Maximum number of matches to return.
    pub max_matches: Option<usize>,
    /// Scan versions in parallel.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            multiple: true,
            state: ChunkState::Found,
            max_matches: None,
            parallel: true,
        }
    }
}

impl SearchConfig {
    /// Set whether every requested version is reported.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Set the classification tag.
    pub fn with_state(mut self, state: ChunkState) -> Self {
        self.state = state;
        self
    }

    /// Cap the number of returned matches.
    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = Some(max_matches);
        self
    }

    /// Set whether versions are scanned in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }
}
