//! The giver → receiver mapping produced by a successful draw.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ParticipantId;

/// A single giver → receiver link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
}

/// A complete giver → receiver mapping.
///
/// Backed by a `BTreeMap` so iteration order (and therefore any digest over
/// it) depends only on the contents, never on insertion order.
///
/// Assignments handed out by the engine are always a derangement of the
/// input participants that respects every exclusion. An `Assignment` built
/// by hand carries no such guarantee until it has been verified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    links: BTreeMap<ParticipantId, ParticipantId>,
}

impl Assignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `giver → receiver`, returning the receiver previously recorded
    /// for this giver, if any.
    pub fn insert(&mut self, giver: ParticipantId, receiver: ParticipantId) -> Option<ParticipantId> {
        self.links.insert(giver, receiver)
    }

    /// The participant `giver` buys a gift for.
    #[must_use]
    pub fn receiver_of(&self, giver: ParticipantId) -> Option<ParticipantId> {
        self.links.get(&giver).copied()
    }

    /// The participant who buys a gift for `receiver`. Linear scan.
    #[must_use]
    pub fn giver_of(&self, receiver: ParticipantId) -> Option<ParticipantId> {
        self.links
            .iter()
            .find_map(|(g, r)| (*r == receiver).then_some(*g))
    }

    /// Iterate `(giver, receiver)` in ascending giver order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, ParticipantId)> + '_ {
        self.links.iter().map(|(g, r)| (*g, *r))
    }

    #[must_use]
    pub fn pairings(&self) -> Vec<Pairing> {
        self.iter()
            .map(|(giver, receiver)| Pairing { giver, receiver })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl FromIterator<(ParticipantId, ParticipantId)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, ParticipantId)>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}
