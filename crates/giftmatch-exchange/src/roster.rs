//! Roster: who was invited, who answered, and who must not draw whom.
//!
//! Participants keep their invitation order. That order is what the engine
//! sees, so a seeded draw over the same roster is reproducible.

use std::collections::BTreeSet;

use giftmatch_types::{
    ExclusionPair, GiftmatchError, ParticipantId, ParticipantStatus, Result,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub participant: ParticipantId,
    pub status: ParticipantStatus,
}

/// Invited participants and the exclusions between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Entries in invitation order.
    entries: Vec<RosterEntry>,
    exclusions: BTreeSet<ExclusionPair>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invite a participant.
    ///
    /// # Errors
    /// Returns `DuplicateParticipant` if already invited.
    pub fn invite(&mut self, participant: ParticipantId) -> Result<()> {
        if self.entry(participant).is_some() {
            return Err(GiftmatchError::DuplicateParticipant(participant));
        }
        self.entries.push(RosterEntry {
            participant,
            status: ParticipantStatus::Invited,
        });
        Ok(())
    }

    /// Record a participant's answer. Answers may be changed.
    ///
    /// # Errors
    /// Returns `ParticipantNotFound` if `participant` was never invited.
    pub fn respond(&mut self, participant: ParticipantId, status: ParticipantStatus) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.participant == participant)
            .ok_or(GiftmatchError::ParticipantNotFound(participant))?;
        entry.status = status;
        Ok(())
    }

    /// Forbid `a` and `b` from drawing each other. Returns `false` if the
    /// pair (in either order) was already excluded.
    ///
    /// # Errors
    /// - `ParticipantNotFound` if either end was never invited
    /// - `SelfExclusion` if `a == b`
    pub fn add_exclusion(&mut self, a: ParticipantId, b: ParticipantId) -> Result<bool> {
        self.require(a)?;
        self.require(b)?;
        Ok(self.exclusions.insert(ExclusionPair::new(a, b)?))
    }

    /// Lift an exclusion. Returns `false` if it was not present.
    ///
    /// # Errors
    /// Returns `SelfExclusion` if `a == b`.
    pub fn remove_exclusion(&mut self, a: ParticipantId, b: ParticipantId) -> Result<bool> {
        Ok(self.exclusions.remove(&ExclusionPair::new(a, b)?))
    }

    #[must_use]
    pub fn status_of(&self, participant: ParticipantId) -> Option<ParticipantStatus> {
        self.entry(participant).map(|e| e.status)
    }

    /// Accepted participants, in invitation order.
    #[must_use]
    pub fn accepted(&self) -> Vec<ParticipantId> {
        self.entries
            .iter()
            .filter(|e| e.status == ParticipantStatus::Accepted)
            .map(|e| e.participant)
            .collect()
    }

    /// Number of invitations not yet answered.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == ParticipantStatus::Invited)
            .count()
    }

    /// Exclusions whose both ends have accepted.
    #[must_use]
    pub fn active_exclusions(&self) -> Vec<ExclusionPair> {
        self.exclusions
            .iter()
            .filter(|pair| self.is_accepted(pair.low()) && self.is_accepted(pair.high()))
            .copied()
            .collect()
    }

    pub fn exclusions(&self) -> impl Iterator<Item = &ExclusionPair> {
        self.exclusions.iter()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, participant: ParticipantId) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.participant == participant)
    }

    fn require(&self, participant: ParticipantId) -> Result<()> {
        self.entry(participant)
            .map(|_| ())
            .ok_or(GiftmatchError::ParticipantNotFound(participant))
    }

    fn is_accepted(&self, participant: ParticipantId) -> bool {
        self.status_of(participant) == Some(ParticipantStatus::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(n: u128) -> ParticipantId {
        ParticipantId::from_u128(n)
    }

    fn roster_of(n: u128) -> Roster {
        let mut roster = Roster::new();
        for i in 1..=n {
            roster.invite(pid(i)).unwrap();
        }
        roster
    }

    #[test]
    fn invite_twice_rejected() {
        let mut roster = roster_of(1);
        let err = roster.invite(pid(1)).unwrap_err();
        assert!(matches!(err, GiftmatchError::DuplicateParticipant(p) if p == pid(1)));
    }

    #[test]
    fn accepted_keeps_invitation_order() {
        let mut roster = Roster::new();
        for i in [3, 1, 2] {
            roster.invite(pid(i)).unwrap();
            roster.respond(pid(i), ParticipantStatus::Accepted).unwrap();
        }
        assert_eq!(roster.accepted(), vec![pid(3), pid(1), pid(2)]);
    }

    #[test]
    fn pending_counts_unanswered() {
        let mut roster = roster_of(3);
        assert_eq!(roster.pending_count(), 3);
        roster.respond(pid(1), ParticipantStatus::Accepted).unwrap();
        roster.respond(pid(2), ParticipantStatus::Declined).unwrap();
        assert_eq!(roster.pending_count(), 1);
        assert_eq!(roster.accepted(), vec![pid(1)]);
    }

    #[test]
    fn respond_unknown_rejected() {
        let mut roster = roster_of(1);
        let err = roster
            .respond(pid(7), ParticipantStatus::Accepted)
            .unwrap_err();
        assert!(matches!(err, GiftmatchError::ParticipantNotFound(p) if p == pid(7)));
    }

    #[test]
    fn exclusion_requires_invited_ends() {
        let mut roster = roster_of(2);
        assert!(roster.add_exclusion(pid(1), pid(9)).is_err());
        assert!(roster.add_exclusion(pid(1), pid(1)).is_err());
        assert!(roster.add_exclusion(pid(1), pid(2)).unwrap());
        assert!(!roster.add_exclusion(pid(2), pid(1)).unwrap());
        assert_eq!(roster.exclusions().count(), 1);
    }

    #[test]
    fn remove_exclusion_either_order() {
        let mut roster = roster_of(2);
        roster.add_exclusion(pid(1), pid(2)).unwrap();
        assert!(roster.remove_exclusion(pid(2), pid(1)).unwrap());
        assert!(!roster.remove_exclusion(pid(1), pid(2)).unwrap());
    }

    #[test]
    fn declined_ends_drop_exclusion() {
        let mut roster = roster_of(3);
        roster.add_exclusion(pid(1), pid(2)).unwrap();
        roster.add_exclusion(pid(1), pid(3)).unwrap();
        roster.respond(pid(1), ParticipantStatus::Accepted).unwrap();
        roster.respond(pid(2), ParticipantStatus::Accepted).unwrap();
        roster.respond(pid(3), ParticipantStatus::Declined).unwrap();
        let active = roster.active_exclusions();
        assert_eq!(active, vec![ExclusionPair::new(pid(1), pid(2)).unwrap()]);
    }
}
