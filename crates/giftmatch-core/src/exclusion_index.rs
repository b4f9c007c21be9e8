//! Exclusion index: O(1) "may these two be matched?" lookups.
//!
//! Pairs are stored as canonical [`ExclusionPair`]s, so the query is
//! independent of argument order and inserting `(A, B)` after `(B, A)` is a
//! no-op.

use std::collections::HashSet;

use giftmatch_types::{ExclusionPair, ParticipantId, Result};

/// Set of symmetric exclusion constraints.
#[derive(Debug, Clone, Default)]
pub struct ExclusionIndex {
    pairs: HashSet<ExclusionPair>,
}

impl ExclusionIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from already-validated pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a ExclusionPair>) -> Self {
        let mut index = Self::new();
        for pair in pairs {
            index.insert(*pair);
        }
        index
    }

    /// Build an index from raw `(a, b)` tuples.
    ///
    /// # Errors
    /// Returns `SelfExclusion` if any tuple names the same participant twice.
    pub fn try_from_tuples(tuples: &[(ParticipantId, ParticipantId)]) -> Result<Self> {
        let mut index = Self::new();
        for &(a, b) in tuples {
            index.insert(ExclusionPair::new(a, b)?);
        }
        Ok(index)
    }

    /// Add a pair. Returns `false` if it (or its reverse) was already present.
    pub fn insert(&mut self, pair: ExclusionPair) -> bool {
        self.pairs.insert(pair)
    }

    /// Whether `a` and `b` must not be matched, in either direction.
    ///
    /// Always `false` for `a == b`; self-matching is a separate rule.
    #[must_use]
    pub fn excluded(&self, a: ParticipantId, b: ParticipantId) -> bool {
        ExclusionPair::new(a, b).is_ok_and(|pair| self.pairs.contains(&pair))
    }

    /// Everyone excluded with `p`, in ascending ID order.
    #[must_use]
    pub fn partners_of(&self, p: ParticipantId) -> Vec<ParticipantId> {
        let mut partners: Vec<_> = self.pairs.iter().filter_map(|pair| pair.other(p)).collect();
        partners.sort_unstable();
        partners
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExclusionPair> {
        self.pairs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
