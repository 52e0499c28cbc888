//! An owned multi-version document and its JSON file format.
//!
//! The on-disk format is a single JSON object:
//! ```json
//! {
//!   "description": "Two witnesses of a short poem",
//!   "versions": [
//!     {"id": 1, "short_name": "A"},
//!     {"id": 2, "short_name": "B", "long_name": "Second edition"}
//!   ],
//!   "pairs": [
//!     {"versions": [1, 2], "text": "The quick "},
//!     {"versions": [1], "text": "brown "},
//!     {"versions": [1, 2], "text": "fox"}
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PalimpsestError, Result};
use crate::mvd::backbone::Backbone;
use crate::mvd::pair::Pair;
use crate::version::{VersionRegistry, VersionSet};

/// A multi-version document: an ordered list of pairs plus its version registry.
#[derive(Debug, Clone, Default)]
pub struct Mvd {
    description: String,
    registry: VersionRegistry,
    pairs: Vec<Pair>,
}

impl Mvd {
    /// Create an empty document.
    pub fn new<S: Into<String>>(description: S) -> Self {
        Mvd {
            description: description.into(),
            registry: VersionRegistry::new(),
            pairs: Vec::new(),
        }
    }

    /// Document description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The version registry.
    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    /// All pairs in backbone order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Register a new version.
    pub fn add_version<S: Into<String>, L: Into<String>>(
        &mut self,
        id: u16,
        short_name: S,
        long_name: L,
    ) -> Result<()> {
        self.registry.register(id, short_name, long_name)
    }

    /// Append a pair. Every member version must already be registered.
    pub fn add_pair(&mut self, pair: Pair) -> Result<()> {
        if let Some(unknown) = pair.versions().iter().find(|id| !self.registry.contains(*id)) {
            return Err(PalimpsestError::range(format!(
                "Pair {} refers to unregistered version {unknown}",
                self.pairs.len()
            )));
        }
        self.pairs.push(pair);
        Ok(())
    }

    /// All version ids present in the document.
    pub fn all_versions(&self) -> VersionSet {
        self.registry.ids().into_iter().collect()
    }

    /// Reconstruct the full text of a version.
    pub fn version_text(&self, version: u16) -> Result<Vec<u8>> {
        self.ensure_version(version)?;
        let mut text = Vec::new();
        for pair in self.pairs.iter().filter(|p| p.contains(version)) {
            text.extend_from_slice(pair.data());
        }
        Ok(text)
    }

    /// Length in bytes of a version's text.
    pub fn version_length(&self, version: u16) -> Result<u64> {
        self.ensure_version(version)?;
        Ok(self
            .pairs
            .iter()
            .filter(|p| p.contains(version))
            .map(|p| p.length() as u64)
            .sum())
    }

    /// Parse a document from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: MvdFile = serde_json::from_str(json)?;
        let mut mvd = Mvd::new(file.description);
        for info in file.versions {
            mvd.add_version(info.id, info.short_name, info.long_name)?;
        }
        for entry in file.pairs {
            mvd.add_pair(Pair::new(entry.versions, entry.text.into_bytes())?)?;
        }
        log::debug!(
            "Loaded MVD with {} versions and {} pairs",
            mvd.registry.len(),
            mvd.pairs.len()
        );
        Ok(mvd)
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let pairs = self
            .pairs
            .iter()
            .map(|pair| {
                let text = String::from_utf8(pair.data().to_vec()).map_err(|e| {
                    PalimpsestError::other(format!("Pair data is not valid UTF-8: {e}"))
                })?;
                Ok(PairEntry {
                    versions: pair.versions().clone(),
                    text,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let file = MvdFile {
            description: self.description.clone(),
            versions: self.registry.clone().into(),
            pairs,
        };
        let json = if pretty {
            serde_json::to_string_pretty(&file)?
        } else {
            serde_json::to_string(&file)?
        };
        Ok(json)
    }

    /// Load a document from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    fn ensure_version(&self, version: u16) -> Result<()> {
        if self.registry.contains(version) {
            Ok(())
        } else {
            Err(PalimpsestError::range(format!("Unknown version {version}")))
        }
    }
}

impl Backbone for Mvd {
    fn segment_count(&self) -> usize {
        self.pairs.len()
    }

    fn segment_at(&self, index: usize) -> Result<&Pair> {
        self.pairs.get(index).ok_or_else(|| {
            PalimpsestError::range(format!(
                "Segment {index} out of range (backbone has {} segments)",
                self.pairs.len()
            ))
        })
    }

    fn version_short_name(&self, version: u16) -> Result<&str> {
        self.registry.short_name(version)
    }
}

/// Serialized form of an [`Mvd`].
#[derive(Debug, Serialize, Deserialize)]
struct MvdFile {
    #[serde(default)]
    description: String,
    versions: Vec<crate::version::VersionInfo>,
    pairs: Vec<PairEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PairEntry {
    versions: VersionSet,
    text: String,
}
