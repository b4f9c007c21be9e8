//! Candidate graph: who each participant may give to.
//!
//! Participants are addressed by their position in the input list. The
//! adjacency lists hold positions in ascending order, so the graph is a pure
//! function of its inputs; search-time randomization happens on copies.

use std::collections::HashMap;

use giftmatch_types::{GiftmatchError, ParticipantId, Result};

use crate::ExclusionIndex;

/// For every participant, the set of legal receivers:
/// everyone else, minus anyone excluded with them.
#[derive(Debug, Clone)]
pub struct CandidateGraph {
    participants: Vec<ParticipantId>,
    positions: HashMap<ParticipantId, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl CandidateGraph {
    /// Build the graph for `participants` under `index`.
    ///
    /// Exclusions naming someone outside `participants` have no effect.
    ///
    /// # Errors
    /// Returns `DuplicateParticipant` if an ID appears twice.
    pub fn build(participants: &[ParticipantId], index: &ExclusionIndex) -> Result<Self> {
        let mut positions = HashMap::with_capacity(participants.len());
        for (i, &p) in participants.iter().enumerate() {
            if positions.insert(p, i).is_some() {
                return Err(GiftmatchError::DuplicateParticipant(p));
            }
        }

        let adjacency = participants
            .iter()
            .enumerate()
            .map(|(i, &giver)| {
                participants
                    .iter()
                    .enumerate()
                    .filter(|&(j, &receiver)| j != i && !index.excluded(giver, receiver))
                    .map(|(j, _)| j)
                    .collect()
            })
            .collect();

        Ok(Self {
            participants: participants.to_vec(),
            positions,
            adjacency,
        })
    }

    /// Participants in input order.
    #[must_use]
    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    #[must_use]
    pub(crate) fn participant(&self, position: usize) -> ParticipantId {
        self.participants[position]
    }

    #[must_use]
    pub fn position_of(&self, p: ParticipantId) -> Option<usize> {
        self.positions.get(&p).copied()
    }

    /// Candidate positions of the participant at `position`.
    #[must_use]
    pub(crate) fn adjacency(&self, position: usize) -> &[usize] {
        &self.adjacency[position]
    }

    /// Legal receivers of `p`, in input order. `None` if `p` is unknown.
    #[must_use]
    pub fn candidates_of(&self, p: ParticipantId) -> Option<Vec<ParticipantId>> {
        let position = self.position_of(p)?;
        Some(
            self.adjacency[position]
                .iter()
                .map(|&j| self.participants[j])
                .collect(),
        )
    }

    /// `(participant, candidate count)` in input order.
    pub fn degrees(&self) -> impl Iterator<Item = (ParticipantId, usize)> + '_ {
        self.participants
            .iter()
            .zip(&self.adjacency)
            .map(|(&p, adj)| (p, adj.len()))
    }

    /// Smallest candidate count, or `None` for an empty graph.
    #[must_use]
    pub fn min_degree(&self) -> Option<usize> {
        self.adjacency.iter().map(Vec::len).min()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
