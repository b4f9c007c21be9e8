//! Identifiers used throughout GiftMatch.
//!
//! All entity IDs use UUIDv7 for time-ordered lexicographic sorting. The
//! engine itself treats them as opaque: only equality, ordering and hashing
//! are ever consulted.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ParticipantId
// ---------------------------------------------------------------------------

/// Opaque identifier of one accepted member of a gift exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Build an ID from a plain integer. Handy for callers whose participant
    /// keys are database row numbers rather than UUIDs.
    #[must_use]
    pub fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Last 8 hex characters, for compact log output. The UUIDv7 prefix is a
    /// timestamp and collides for IDs minted in the same millisecond.
    #[must_use]
    pub fn short(&self) -> String {
        let simple = self.0.simple().to_string();
        simple[24..].to_string()
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant:{}", self.0)
    }
}

impl From<Uuid> for ParticipantId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

// ---------------------------------------------------------------------------
// ExchangeId
// ---------------------------------------------------------------------------

/// Unique identifier of a gift exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ExchangeId(pub Uuid);

impl ExchangeId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ExchangeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exchange:{}", self.0)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
pub mod fixtures {
    use super::ParticipantId;

    /// `n` participants with IDs `1..=n`, in ascending order.
    #[must_use]
    pub fn participants(n: u128) -> Vec<ParticipantId> {
        (1..=n).map(ParticipantId::from_u128).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
