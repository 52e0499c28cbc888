//! A single backbone segment.

use crate::error::{PalimpsestError, Result};
use crate::version::VersionSet;

/// One element of the backbone: a run of bytes shared by a set of versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    versions: VersionSet,
    data: Vec<u8>,
}

impl Pair {
    /// Create a pair. Fails if the data length does not fit in a u32.
    pub fn new<D: Into<Vec<u8>>>(versions: VersionSet, data: D) -> Result<Self> {
        let data = data.into();
        if u32::try_from(data.len()).is_err() {
            return Err(PalimpsestError::value(format!(
                "Pair length {} exceeds u32 range",
                data.len()
            )));
        }
        Ok(Pair { versions, data })
    }

    /// Versions this pair belongs to.
    pub fn versions(&self) -> &VersionSet {
        &self.versions
    }

    /// Check whether this pair belongs to the given version.
    pub fn contains(&self, version: u16) -> bool {
        self.versions.contains(version)
    }

    /// Length of the pair data in bytes.
    pub fn length(&self) -> u32 {
        // Bounded by the check in `new`.
        self.data.len() as u32
    }

    /// Raw pair data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
