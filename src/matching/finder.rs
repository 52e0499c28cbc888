//! Turning backbone coordinates into per-version matches.
//!
//! A run found while walking the backbone is known only by the segment it
//! ends in and the index of its last byte inside that segment. For each
//! requested version the finder adds up the lengths of the earlier segments
//! that version belongs to, which gives the position just past the run in
//! the version's own text; subtracting the run length gives its start.

use crate::error::{PalimpsestError, Result};
use crate::matching::entity::Match;
use crate::matching::state::ChunkState;
use crate::mvd::backbone::Backbone;
use crate::version::VersionSet;

/// Builds matches from backbone coordinates.
#[derive(Debug)]
pub struct MatchFinder<'a, B: Backbone + ?Sized> {
    backbone: &'a B,
}

impl<'a, B: Backbone + ?Sized> MatchFinder<'a, B> {
    /// Create a finder over a backbone.
    pub fn new(backbone: &'a B) -> Self {
        MatchFinder { backbone }
    }

    /// Generate the matches for a run of `length` bytes ending at byte
    /// `end_index` of segment `end_segment`.
    ///
    /// Produces one match per version in `versions`, in ascending id order,
    /// or only the first when `multiple` is false. Coordinates outside the
    /// backbone, unknown versions, and runs longer than the text preceding
    /// their end are range errors. Every id in `versions` is checked, even
    /// when only the first is reported.
    pub fn make_matches(
        &self,
        length: u32,
        versions: &VersionSet,
        end_segment: usize,
        end_index: usize,
        multiple: bool,
        state: ChunkState,
    ) -> Result<Vec<Match>> {
        let end_pair = self.backbone.segment_at(end_segment)?;
        if end_index >= end_pair.length() as usize {
            return Err(PalimpsestError::range(format!(
                "Index {end_index} out of range for segment {end_segment} of length {}",
                end_pair.length()
            )));
        }

        let named = versions
            .iter()
            .map(|version| Ok((version, self.backbone.version_short_name(version)?)))
            .collect::<Result<Vec<(u16, &str)>>>()?;

        let mut matches = Vec::with_capacity(if multiple { named.len() } else { 1 });
        for (version, short_name) in named {
            // One past the last byte of the run, within the end segment.
            let mut offset = end_index as u64 + 1;
            for index in (0..end_segment).rev() {
                let pair = self.backbone.segment_at(index)?;
                if pair.contains(version) {
                    offset += pair.length() as u64;
                }
            }
            let start = offset.checked_sub(length as u64).ok_or_else(|| {
                PalimpsestError::range(format!(
                    "Run of length {length} starts before the beginning of version {version}"
                ))
            })?;
            let start = u32::try_from(start).map_err(|_| {
                PalimpsestError::value(format!(
                    "Offset {start} in version {version} exceeds u32 range"
                ))
            })?;
            matches.push(Match::with_state(version, start, length, short_name, state));
            if !multiple {
                break;
            }
        }

        log::debug!(
            "Built {} match(es) of length {length} ending at segment {end_segment}:{end_index}",
            matches.len()
        );
        Ok(matches)
    }
}
