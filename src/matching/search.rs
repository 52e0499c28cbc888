//! Pattern search across selected versions.
//!
//! Each selected version's text is reconstructed from the backbone together
//! with the position at which every contributing pair starts. An occurrence
//! of the pattern is located by the pair its last byte falls in, and the
//! [`MatchFinder`] turns that coordinate back into a version offset.

use rayon::prelude::*;

use crate::error::{PalimpsestError, Result};
use crate::matching::config::SearchConfig;
use crate::matching::entity::Match;
use crate::matching::finder::MatchFinder;
use crate::matching::state::ChunkState;
use crate::mvd::backbone::Backbone;
use crate::version::VersionSet;

/// Searches a backbone for occurrences of a byte pattern.
#[derive(Debug)]
pub struct MatchSearcher<'a, B: Backbone + ?Sized> {
    backbone: &'a B,
}

/// A pair's contribution to a reconstructed version text.
#[derive(Debug, Clone, Copy)]
struct Span {
    pair_index: usize,
    text_start: usize,
}

impl<'a, B: Backbone + ?Sized> MatchSearcher<'a, B> {
    /// Create a searcher over a backbone.
    pub fn new(backbone: &'a B) -> Self {
        MatchSearcher { backbone }
    }

    /// Find every occurrence of `pattern` in the selected versions.
    ///
    /// Results are ordered by version id, then by offset.
    pub fn search(
        &self,
        pattern: &[u8],
        versions: &VersionSet,
        config: &SearchConfig,
    ) -> Result<Vec<Match>> {
        if pattern.is_empty() {
            return Err(PalimpsestError::invalid_argument("search pattern is empty"));
        }
        let length = u32::try_from(pattern.len()).map_err(|_| {
            PalimpsestError::value(format!("pattern length {} exceeds u32", pattern.len()))
        })?;

        let ids: Vec<u16> = versions.iter().collect();
        let per_version: Vec<Vec<Match>> = if config.parallel {
            ids.par_iter()
                .map(|version| self.scan_version(pattern, length, *version, config.state))
                .collect::<Result<Vec<_>>>()?
        } else {
            ids.iter()
                .map(|version| self.scan_version(pattern, length, *version, config.state))
                .collect::<Result<Vec<_>>>()?
        };

        let mut matches = Vec::new();
        for hits in per_version.into_iter().filter(|hits| !hits.is_empty()) {
            matches = Match::merge(matches, hits);
            if !config.multiple {
                break;
            }
        }
        if let Some(max) = config.max_matches {
            matches.truncate(max);
        }

        log::debug!(
            "Search over {} version(s) returned {} match(es)",
            ids.len(),
            matches.len()
        );
        Ok(matches)
    }

    fn scan_version(
        &self,
        pattern: &[u8],
        length: u32,
        version: u16,
        state: ChunkState,
    ) -> Result<Vec<Match>> {
        self.backbone.version_short_name(version)?;

        let mut text = Vec::new();
        let mut spans = Vec::new();
        for pair_index in 0..self.backbone.segment_count() {
            let pair = self.backbone.segment_at(pair_index)?;
            if pair.contains(version) && pair.length() > 0 {
                spans.push(Span {
                    pair_index,
                    text_start: text.len(),
                });
                text.extend_from_slice(pair.data());
            }
        }

        let finder = MatchFinder::new(self.backbone);
        let only = VersionSet::from_ids([version]);
        let mut matches = Vec::new();
        for (start, _) in text
            .windows(pattern.len())
            .enumerate()
            .filter(|(_, window)| *window == pattern)
        {
            let end = start + pattern.len() - 1;
            // Spans start at 0, so at least one span precedes `end`.
            let span = spans[spans.partition_point(|s| s.text_start <= end) - 1];
            let found = finder.make_matches(
                length,
                &only,
                span.pair_index,
                end - span.text_start,
                false,
                state,
            )?;
            matches.extend(found);
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvd::{Mvd, Pair};

    fn sample_mvd() -> Mvd {
        let mut mvd = Mvd::new("search sample");
        mvd.add_version(1, "A", "").unwrap();
        mvd.add_version(2, "B", "").unwrap();
        mvd.add_version(3, "C", "").unwrap();
        for (versions, text) in [
            (vec![1, 2, 3], "the cat "),
            (vec![1], "sat on "),
            (vec![2], "lay on "),
            (vec![], ""),
            (vec![1, 2], "the mat"),
            (vec![3], "the hat"),
        ] {
            mvd.add_pair(Pair::new(VersionSet::from_ids(versions), text).unwrap())
                .unwrap();
        }
        mvd
    }

    #[test]
    fn test_search_all_versions() {
        let mvd = sample_mvd();
        let matches = MatchSearcher::new(&mvd)
            .search(b"the", &mvd.all_versions(), &SearchConfig::default())
            .unwrap();

        let keys: Vec<(u16, u32)> = matches
            .iter()
            .map(|m| (m.version(), m.start_offset()))
            .collect();
        assert_eq!(keys, vec![(1, 0), (1, 15), (2, 0), (2, 15), (3, 0), (3, 8)]);
        assert!(matches.iter().all(|m| m.state() == ChunkState::Found));
    }

    #[test]
    fn test_search_matches_reconstructed_text() {
        let mvd = sample_mvd();
        let config = SearchConfig::default().with_parallel(false);
        let matches = MatchSearcher::new(&mvd)
            .search(b"t on the", &mvd.all_versions(), &config)
            .unwrap();
        assert_eq!(matches, vec![Match::new(1, 10, 8, "A")]);

        let text = mvd.version_text(1).unwrap();
        let m = &matches[0];
        let start = m.start_offset() as usize;
        assert_eq!(&text[start..start + m.length() as usize], b"t on the");
    }

    #[test]
    fn test_search_single_version_mode() {
        let mvd = sample_mvd();
        let config = SearchConfig::default().with_multiple(false);
        let matches = MatchSearcher::new(&mvd)
            .search(b"on", &VersionSet::from_ids([2, 3, 1]), &config)
            .unwrap();
        assert_eq!(matches, vec![Match::new(1, 12, 2, "A")]);
    }

    #[test]
    fn test_search_max_matches() {
        let mvd = sample_mvd();
        let config = SearchConfig::default().with_max_matches(2);
        let matches = MatchSearcher::new(&mvd)
            .search(b"the", &mvd.all_versions(), &config)
            .unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.version() == 1));
    }

    #[test]
    fn test_search_no_hits() {
        let mvd = sample_mvd();
        let matches = MatchSearcher::new(&mvd)
            .search(b"dog", &mvd.all_versions(), &SearchConfig::default())
            .unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_search_rejects_empty_pattern() {
        let mvd = sample_mvd();
        let err = MatchSearcher::new(&mvd)
            .search(b"", &mvd.all_versions(), &SearchConfig::default())
            .unwrap_err();
        assert!(matches!(err, PalimpsestError::Other(_)));
    }

    #[test]
    fn test_search_unknown_version() {
        let mvd = sample_mvd();
        let err = MatchSearcher::new(&mvd)
            .search(b"the", &VersionSet::from_ids([1, 9]), &SearchConfig::default())
            .unwrap_err();
        assert!(err.is_range());
    }
}
