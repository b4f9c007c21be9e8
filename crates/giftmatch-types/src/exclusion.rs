//! Symmetric exclusion constraints between two participants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{GiftmatchError, ParticipantId, Result};

/// An unordered pair of distinct participants who must not be matched as
/// giver → receiver in either direction.
///
/// The pair is always stored in canonical `(min, max)` order, so `(A, B)`
/// and `(B, A)` produce equal, identically hashed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(
    try_from = "(ParticipantId, ParticipantId)",
    into = "(ParticipantId, ParticipantId)"
)]
pub struct ExclusionPair {
    low: ParticipantId,
    high: ParticipantId,
}

impl ExclusionPair {
    /// Build a canonical pair.
    ///
    /// # Errors
    /// Returns [`GiftmatchError::SelfExclusion`] if `a == b`. Self-matching
    /// is already forbidden by the engine and never goes through the index.
    pub fn new(a: ParticipantId, b: ParticipantId) -> Result<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Ok(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => Err(GiftmatchError::SelfExclusion(a)),
        }
    }

    #[must_use]
    pub fn low(&self) -> ParticipantId {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> ParticipantId {
        self.high
    }

    /// Whether `p` is one of the two ends.
    #[must_use]
    pub fn contains(&self, p: ParticipantId) -> bool {
        self.low == p || self.high == p
    }

    /// The end opposite `p`, or `None` if `p` is not part of this pair.
    #[must_use]
    pub fn other(&self, p: ParticipantId) -> Option<ParticipantId> {
        if p == self.low {
            Some(self.high)
        } else if p == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

impl TryFrom<(ParticipantId, ParticipantId)> for ExclusionPair {
    type Error = GiftmatchError;

    fn try_from((a, b): (ParticipantId, ParticipantId)) -> Result<Self> {
        Self::new(a, b)
    }
}

impl From<ExclusionPair> for (ParticipantId, ParticipantId) {
    fn from(pair: ExclusionPair) -> Self {
        (pair.low, pair.high)
    }
}

impl fmt::Display for ExclusionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} <-> {}}}", self.low.short(), self.high.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(n: u128) -> ParticipantId {
        ParticipantId::from_u128(n)
    }

    #[test]
    fn reversed_pairs_are_equal() {
        let ab = ExclusionPair::new(pid(1), pid(2)).unwrap();
        let ba = ExclusionPair::new(pid(2), pid(1)).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.low(), pid(1));
        assert_eq!(ab.high(), pid(2));
    }

    #[test]
    fn self_pair_rejected() {
        let err = ExclusionPair::new(pid(3), pid(3)).unwrap_err();
        assert!(matches!(err, GiftmatchError::SelfExclusion(p) if p == pid(3)));
    }

    #[test]
    fn other_end() {
        let pair = ExclusionPair::new(pid(5), pid(9)).unwrap();
        assert_eq!(pair.other(pid(5)), Some(pid(9)));
        assert_eq!(pair.other(pid(9)), Some(pid(5)));
        assert_eq!(pair.other(pid(1)), None);
        assert!(pair.contains(pid(9)));
        assert!(!pair.contains(pid(4)));
    }

    #[test]
    fn try_from_tuple() {
        let pair: ExclusionPair = (pid(2), pid(1)).try_into().unwrap();
        assert_eq!(pair.low(), pid(1));
    }

    #[test]
    fn deserialized_pair_keeps_canonical_order() {
        let pair = ExclusionPair::new(pid(8), pid(4)).unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        let back: ExclusionPair = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, back);
        assert_eq!(back.low(), pid(4));
    }

    #[test]
    fn deserialize_canonicalizes_reversed_tuple() {
        let json = serde_json::to_string(&(pid(8), pid(4))).unwrap();
        let pair: ExclusionPair = serde_json::from_str(&json).unwrap();
        assert_eq!(pair.low(), pid(4));
        assert_eq!(pair.high(), pid(8));
    }

    #[test]
    fn deserialize_rejects_self_pair() {
        let json = serde_json::to_string(&(pid(4), pid(4))).unwrap();
        assert!(serde_json::from_str::<ExclusionPair>(&json).is_err());
    }
}
