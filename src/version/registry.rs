//! Registry mapping version ids to their sigla.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{PalimpsestError, Result};

/// Separates fields in a rendered match, so it cannot appear in a siglum.
const SIGLUM_FORBIDDEN: char = ':';

/// Display metadata for a single version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version id.
    pub id: u16,
    /// Short display name (siglum).
    pub short_name: String,
    /// Optional long description of the witness.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub long_name: String,
}

/// Maps version ids to their short names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<VersionInfo>", into = "Vec<VersionInfo>")]
pub struct VersionRegistry {
    versions: AHashMap<u16, VersionInfo>,
}

impl VersionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        VersionRegistry {
            versions: AHashMap::new(),
        }
    }

    /// Register a version.
    ///
    /// Ids and non-empty short names must be unique, and a short name may not contain
    /// the `:` field separator of the match record format.
    pub fn register<S: Into<String>, L: Into<String>>(
        &mut self,
        id: u16,
        short_name: S,
        long_name: L,
    ) -> Result<()> {
        let short_name = short_name.into();
        if self.versions.contains_key(&id) {
            return Err(PalimpsestError::value(format!(
                "Version {id} is already registered"
            )));
        }
        if short_name.contains(SIGLUM_FORBIDDEN) {
            return Err(PalimpsestError::value(format!(
                "Short name {short_name:?} of version {id} contains '{SIGLUM_FORBIDDEN}'"
            )));
        }
        if !short_name.is_empty()
            && let Some(existing) = self.id_of(&short_name)
        {
            return Err(PalimpsestError::value(format!(
                "Short name {short_name:?} is already used by version {existing}"
            )));
        }
        self.versions.insert(
            id,
            VersionInfo {
                id,
                short_name,
                long_name: long_name.into(),
            },
        );
        Ok(())
    }

    /// Check whether a version id is known.
    pub fn contains(&self, id: u16) -> bool {
        self.versions.contains_key(&id)
    }

    /// Get the full record for a version.
    pub fn get(&self, id: u16) -> Option<&VersionInfo> {
        self.versions.get(&id)
    }

    /// Get the short name of a version.
    pub fn short_name(&self, id: u16) -> Result<&str> {
        self.versions
            .get(&id)
            .map(|info| info.short_name.as_str())
            .ok_or_else(|| PalimpsestError::range(format!("Unknown version {id}")))
    }

    /// Get the long name of a version.
    pub fn long_name(&self, id: u16) -> Result<&str> {
        self.versions
            .get(&id)
            .map(|info| info.long_name.as_str())
            .ok_or_else(|| PalimpsestError::range(format!("Unknown version {id}")))
    }

    /// Look up a version id by its short name.
    pub fn id_of(&self, short_name: &str) -> Option<u16> {
        self.versions
            .values()
            .find(|info| info.short_name == short_name)
            .map(|info| info.id)
    }

    /// All registered ids in ascending order.
    pub fn ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self.versions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered versions.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Check if no versions are registered.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl TryFrom<Vec<VersionInfo>> for VersionRegistry {
    type Error = PalimpsestError;

    fn try_from(infos: Vec<VersionInfo>) -> Result<Self> {
        let mut registry = VersionRegistry::new();
        for info in infos {
            registry.register(info.id, info.short_name, info.long_name)?;
        }
        Ok(registry)
    }
}

impl From<VersionRegistry> for Vec<VersionInfo> {
    fn from(registry: VersionRegistry) -> Self {
        let mut infos: Vec<VersionInfo> =
            registry.versions.into_iter().map(|(_, info)| info).collect();
        infos.sort_by_key(|info| info.id);
        infos
    }
}
