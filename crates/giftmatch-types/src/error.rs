//! Error types for the GiftMatch engine.
//!
//! All errors use the `GM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by how the caller should react:
//! - 1xx: Precondition errors (fix the input, nothing was searched)
//! - 2xx: Certain infeasibility (no valid assignment exists)
//! - 3xx: Uncertain infeasibility (search budget spent, one may still exist)
//! - 4xx: Exchange lifecycle errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{ExchangeStatus, ParticipantId};

/// Coarse classification of a [`GiftmatchError`], for choosing a
/// user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request was malformed or the exchange is not ready.
    Precondition,
    /// The configuration provably admits no assignment.
    StructuralInfeasibility,
    /// No assignment was found, but one may exist.
    SearchExhausted,
    /// Lifecycle misuse of an exchange.
    Lifecycle,
    /// A bug or misconfiguration.
    Internal,
}

/// Central error enum for all GiftMatch operations.
#[derive(Debug, Error)]
pub enum GiftmatchError {
    // =================================================================
    // Precondition Errors (1xx)
    // =================================================================
    /// Too few participants to draw.
    #[error("GM_ERR_100: Too few participants: {count} (minimum {min})")]
    TooFewParticipants { count: usize, min: usize },

    /// The same participant was listed twice.
    #[error("GM_ERR_101: Duplicate participant: {0}")]
    DuplicateParticipant(ParticipantId),

    /// An exclusion pair named the same participant on both ends.
    #[error("GM_ERR_102: Participant cannot be excluded from themselves: {0}")]
    SelfExclusion(ParticipantId),

    /// The exchange is not in a status that permits a draw.
    #[error("GM_ERR_103: Exchange not matchable in status {status}")]
    NotMatchable { status: ExchangeStatus },

    /// Some invitations have not been answered yet.
    #[error("GM_ERR_104: {count} invitation(s) still pending")]
    PendingInvitations { count: usize },

    // =================================================================
    // Certain Infeasibility (2xx)
    // =================================================================
    /// A participant has nobody they are allowed to give to.
    #[error("GM_ERR_200: Structurally infeasible: {participant} has no eligible receiver")]
    StructurallyInfeasible { participant: ParticipantId },

    /// Every participant has candidates, but no complete assignment exists.
    #[error("GM_ERR_201: No valid assignment exists: at most {matched} of {total} participants can be matched")]
    NoValidAssignment { matched: usize, total: usize },

    // =================================================================
    // Uncertain Infeasibility (3xx)
    // =================================================================
    /// All randomized trials failed. A valid assignment may still exist.
    #[error("GM_ERR_300: No assignment found after {trials} trial(s); one may still exist")]
    SearchExhausted { trials: usize },

    // =================================================================
    // Exchange Lifecycle Errors (4xx)
    // =================================================================
    /// The requested status change skips or reverses a step.
    #[error("GM_ERR_400: Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ExchangeStatus,
        to: ExchangeStatus,
    },

    /// The roster can no longer be edited.
    #[error("GM_ERR_401: Exchange locked in status {status}")]
    ExchangeLocked { status: ExchangeStatus },

    /// The participant is not part of this exchange.
    #[error("GM_ERR_402: Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    /// The exchange has not been drawn yet.
    #[error("GM_ERR_403: Exchange has not been matched yet")]
    NotYetMatched,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// An assignment broke one of its invariants.
    #[error("GM_ERR_900: Invalid assignment: {reason}")]
    InvalidAssignment { reason: String },

    /// Configuration error (invalid values, missing fields, etc.).
    #[error("GM_ERR_901: Configuration error: {0}")]
    Configuration(String),

    /// Unrecoverable internal error.
    #[error("GM_ERR_902: Internal error: {0}")]
    Internal(String),
}

impl GiftmatchError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::TooFewParticipants { .. }
            | Self::DuplicateParticipant(_)
            | Self::SelfExclusion(_)
            | Self::NotMatchable { .. }
            | Self::PendingInvitations { .. } => FailureKind::Precondition,
            Self::StructurallyInfeasible { .. } | Self::NoValidAssignment { .. } => {
                FailureKind::StructuralInfeasibility
            }
            Self::SearchExhausted { .. } => FailureKind::SearchExhausted,
            Self::InvalidTransition { .. }
            | Self::ExchangeLocked { .. }
            | Self::ParticipantNotFound(_)
            | Self::NotYetMatched => FailureKind::Lifecycle,
            Self::InvalidAssignment { .. } | Self::Configuration(_) | Self::Internal(_) => {
                FailureKind::Internal
            }
        }
    }

    /// Whether this error proves that no valid assignment exists for the
    /// given input. `SearchExhausted` is deliberately excluded.
    #[must_use]
    pub fn is_certain_infeasibility(&self) -> bool {
        self.kind() == FailureKind::StructuralInfeasibility
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, GiftmatchError>;
