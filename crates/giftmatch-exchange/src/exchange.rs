//! The exchange aggregate and its draw.
//!
//! ```text
//! DRAFT --open()--> OPEN --draw()--> MATCHED --complete()--> COMPLETED
//! ```
//!
//! The roster is editable in DRAFT and OPEN. `draw()` is the only way into
//! MATCHED; if the engine fails, the exchange stays OPEN so the organizer
//! can change the roster and try again.

use chrono::{DateTime, Utc};
use giftmatch_core::{compute_assignment_digest, find_assignment, find_assignment_with_rng};
use giftmatch_types::{
    Assignment, ExchangeId, ExchangeStatus, GiftmatchError, MatcherConfig, ParticipantId,
    ParticipantStatus, Result,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Roster;

/// One gift exchange: its roster, status, and (once drawn) assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: ExchangeId,
    pub name: String,
    status: ExchangeStatus,
    roster: Roster,
    assignment: Option<Assignment>,
    digest: Option<[u8; 32]>,
    pub created_at: DateTime<Utc>,
    matched_at: Option<DateTime<Utc>>,
}

impl Exchange {
    /// A new exchange in DRAFT with an empty roster.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ExchangeId::new(),
            name: name.into(),
            status: ExchangeStatus::Draft,
            roster: Roster::new(),
            assignment: None,
            digest: None,
            created_at: Utc::now(),
            matched_at: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> ExchangeStatus {
        self.status
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    #[must_use]
    pub fn digest(&self) -> Option<[u8; 32]> {
        self.digest
    }

    #[must_use]
    pub fn digest_hex(&self) -> Option<String> {
        self.digest.map(hex::encode)
    }

    #[must_use]
    pub fn matched_at(&self) -> Option<DateTime<Utc>> {
        self.matched_at
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// DRAFT → OPEN.
    ///
    /// # Errors
    /// `InvalidTransition` from any other status.
    pub fn open(&mut self) -> Result<()> {
        self.advance(ExchangeStatus::Open)
    }

    /// MATCHED → COMPLETED.
    ///
    /// # Errors
    /// `InvalidTransition` from any other status.
    pub fn complete(&mut self) -> Result<()> {
        self.advance(ExchangeStatus::Completed)
    }

    fn advance(&mut self, to: ExchangeStatus) -> Result<()> {
        if self.status.next() != Some(to) {
            return Err(GiftmatchError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        tracing::info!(exchange = %self.id, from = %self.status, to = %to, "Exchange status changed");
        self.status = to;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------

    /// # Errors
    /// `ExchangeLocked` once matched; `DuplicateParticipant` on re-invite.
    pub fn invite(&mut self, participant: ParticipantId) -> Result<()> {
        self.ensure_editable()?;
        self.roster.invite(participant)
    }

    /// # Errors
    /// `ExchangeLocked` once matched; `ParticipantNotFound` if not invited.
    pub fn accept(&mut self, participant: ParticipantId) -> Result<()> {
        self.ensure_editable()?;
        self.roster.respond(participant, ParticipantStatus::Accepted)
    }

    /// # Errors
    /// `ExchangeLocked` once matched; `ParticipantNotFound` if not invited.
    pub fn decline(&mut self, participant: ParticipantId) -> Result<()> {
        self.ensure_editable()?;
        self.roster.respond(participant, ParticipantStatus::Declined)
    }

    /// # Errors
    /// `ExchangeLocked` once matched; see [`Roster::add_exclusion`].
    pub fn add_exclusion(&mut self, a: ParticipantId, b: ParticipantId) -> Result<bool> {
        self.ensure_editable()?;
        self.roster.add_exclusion(a, b)
    }

    /// # Errors
    /// `ExchangeLocked` once matched; see [`Roster::remove_exclusion`].
    pub fn remove_exclusion(&mut self, a: ParticipantId, b: ParticipantId) -> Result<bool> {
        self.ensure_editable()?;
        self.roster.remove_exclusion(a, b)
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(GiftmatchError::ExchangeLocked {
                status: self.status,
            })
        }
    }

    // -----------------------------------------------------------------
    // Draw
    // -----------------------------------------------------------------

    /// Run the engine over accepted participants and move to MATCHED.
    ///
    /// # Errors
    /// - `NotMatchable` unless OPEN
    /// - `PendingInvitations` while anyone has not answered
    /// - any engine error; the exchange is left unchanged
    pub fn draw(&mut self, config: &MatcherConfig) -> Result<&Assignment> {
        self.ensure_matchable()?;
        let participants = self.roster.accepted();
        let exclusions = self.roster.active_exclusions();
        let assignment = find_assignment(&participants, &exclusions, config)?;
        Ok(self.record(assignment))
    }

    /// [`Exchange::draw`] with a caller-supplied RNG.
    ///
    /// # Errors
    /// Same as [`Exchange::draw`].
    pub fn draw_with_rng<R: Rng + ?Sized>(
        &mut self,
        config: &MatcherConfig,
        rng: &mut R,
    ) -> Result<&Assignment> {
        self.ensure_matchable()?;
        let participants = self.roster.accepted();
        let exclusions = self.roster.active_exclusions();
        let assignment = find_assignment_with_rng(&participants, &exclusions, config, rng)?;
        Ok(self.record(assignment))
    }

    fn ensure_matchable(&self) -> Result<()> {
        if !self.status.is_matchable() {
            return Err(GiftmatchError::NotMatchable {
                status: self.status,
            });
        }
        let pending = self.roster.pending_count();
        if pending > 0 {
            return Err(GiftmatchError::PendingInvitations { count: pending });
        }
        Ok(())
    }

    fn record(&mut self, assignment: Assignment) -> &Assignment {
        let digest = compute_assignment_digest(&assignment);
        tracing::info!(
            exchange = %self.id,
            participants = assignment.len(),
            digest = hex::encode(digest),
            "Exchange drawn"
        );
        self.digest = Some(digest);
        self.matched_at = Some(Utc::now());
        self.status = ExchangeStatus::Matched;
        self.assignment.insert(assignment)
    }

    /// Who `giver` buys for.
    ///
    /// # Errors
    /// - `NotYetMatched` before a successful draw
    /// - `ParticipantNotFound` if `giver` is not part of the assignment
    pub fn receiver_for(&self, giver: ParticipantId) -> Result<ParticipantId> {
        let assignment = self
            .assignment
            .as_ref()
            .ok_or(GiftmatchError::NotYetMatched)?;
        assignment
            .receiver_of(giver)
            .ok_or(GiftmatchError::ParticipantNotFound(giver))
    }
}
