//! Compact sets of version identifiers.
//!
//! A [`VersionSet`] is backed by a growable bit vector: membership tests are
//! O(1) and iteration always yields ids in ascending order, which the match
//! finder relies on when it reports one match per version.

use std::fmt;

use bit_vec::BitVec;
use serde::{Deserialize, Serialize};

/// A set of version ids with bitset semantics.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<u16>", into = "Vec<u16>")]
pub struct VersionSet {
    /// Bit `i` is set when version `i` is a member.
    bits: BitVec,
}

impl VersionSet {
    /// Create an empty version set.
    pub fn new() -> Self {
        VersionSet { bits: BitVec::new() }
    }

    /// Create an empty set with room for ids below `capacity` without growing.
    pub fn with_capacity(capacity: usize) -> Self {
        VersionSet {
            bits: BitVec::from_elem(capacity, false),
        }
    }

    /// Create a set from a list of ids. Duplicates collapse.
    pub fn from_ids<I: IntoIterator<Item = u16>>(ids: I) -> Self {
        let mut set = VersionSet::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Add a version. Returns `true` if it was not already present.
    pub fn insert(&mut self, id: u16) -> bool {
        let index = id as usize;
        if index >= self.bits.len() {
            self.bits.grow(index + 1 - self.bits.len(), false);
        }
        let was_present = self.bits.get(index).unwrap_or(false);
        self.bits.set(index, true);
        !was_present
    }

    /// Remove a version. Returns `true` if it was present.
    pub fn remove(&mut self, id: u16) -> bool {
        let index = id as usize;
        if !self.contains(id) {
            return false;
        }
        self.bits.set(index, false);
        true
    }

    /// Check whether a version is a member.
    pub fn contains(&self, id: u16) -> bool {
        self.bits.get(id as usize).unwrap_or(false)
    }

    /// Number of member versions.
    pub fn len(&self) -> usize {
        self.bits.iter().filter(|bit| *bit).count()
    }

    /// Check if the set has no members.
    pub fn is_empty(&self) -> bool {
        !self.bits.any()
    }

    /// The lowest member id, if any.
    pub fn first(&self) -> Option<u16> {
        self.iter().next()
    }

    /// Iterate over member ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, bit)| *bit)
            .map(|(index, _)| index as u16)
    }

    /// Versions present in either set.
    pub fn union(&self, other: &VersionSet) -> VersionSet {
        let mut result = self.clone();
        result.extend(other.iter());
        result
    }

    /// Versions present in both sets.
    pub fn intersection(&self, other: &VersionSet) -> VersionSet {
        self.iter().filter(|id| other.contains(*id)).collect()
    }
}

impl PartialEq for VersionSet {
    fn eq(&self, other: &Self) -> bool {
        // Capacity differences must not affect equality.
        self.iter().eq(other.iter())
    }
}

impl Eq for VersionSet {}

impl fmt::Debug for VersionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<u16> for VersionSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        VersionSet::from_ids(iter)
    }
}

impl Extend<u16> for VersionSet {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl From<Vec<u16>> for VersionSet {
    fn from(ids: Vec<u16>) -> Self {
        VersionSet::from_ids(ids)
    }
}

impl From<VersionSet> for Vec<u16> {
    fn from(set: VersionSet) -> Self {
        set.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut set = VersionSet::new();
        assert!(set.is_empty());
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.insert(1));

        assert!(set.contains(1));
        assert!(set.contains(3));
        assert!(!set.contains(2));
        assert!(!set.contains(500));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_iteration_is_ascending() {
        let set = VersionSet::from_ids([9, 2, 5, 2, 0]);
        let ids: Vec<u16> = set.iter().collect();
        assert_eq!(ids, vec![0, 2, 5, 9]);
        assert_eq!(set.first(), Some(0));
    }

    #[test]
    fn test_remove() {
        let mut set = VersionSet::from_ids([1, 2]);
        assert!(set.remove(1));
        assert!(!set.remove(1));
        assert!(!set.remove(40));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2]);
        assert!(set.remove(2));
        assert!(set.is_empty());
        assert_eq!(set.first(), None);
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let mut wide = VersionSet::with_capacity(64);
        wide.insert(4);
        let narrow = VersionSet::from_ids([4]);
        assert_eq!(wide, narrow);
        assert_ne!(narrow, VersionSet::from_ids([5]));
    }

    #[test]
    fn test_union_and_intersection() {
        let a = VersionSet::from_ids([1, 2, 3]);
        let b = VersionSet::from_ids([3, 4]);
        assert_eq!(a.union(&b), VersionSet::from_ids([1, 2, 3, 4]));
        assert_eq!(a.intersection(&b), VersionSet::from_ids([3]));
        assert!(a.intersection(&VersionSet::new()).is_empty());
    }

    #[test]
    fn test_serde_as_sorted_list() {
        let set = VersionSet::from_ids([7, 1]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[1,7]");

        let parsed: VersionSet = serde_json::from_str("[3,1,3]").unwrap();
        assert_eq!(parsed, VersionSet::from_ids([1, 3]));
    }

    #[test]
    fn test_debug_lists_members() {
        let set = VersionSet::from_ids([2, 1]);
        assert_eq!(format!("{set:?}"), "{1, 2}");
    }
}
