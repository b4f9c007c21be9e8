//! Lifecycle states of an exchange and of each invited participant.
//!
//! An exchange moves forward through four states:
//! **DRAFT → OPEN → MATCHED → COMPLETED**
//!
//! During DRAFT and OPEN, invitations and exclusions can still change.
//! Only an OPEN exchange may be drawn. Once MATCHED the roster is frozen.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a gift exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeStatus {
    /// Being set up by the organizer; invitations not yet sent.
    Draft,
    /// Invitations out; participants accepting or declining.
    Open,
    /// Assignment drawn; everyone knows who to buy for.
    Matched,
    /// Gifts exchanged.
    Completed,
}

impl ExchangeStatus {
    /// The single status this one may advance to, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Draft => Some(Self::Open),
            Self::Open => Some(Self::Matched),
            Self::Matched => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Whether the roster (participants and exclusions) may still change.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Open)
    }

    /// Whether a draw may be run from this status.
    #[must_use]
    pub fn is_matchable(self) -> bool {
        self == Self::Open
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "DRAFT"),
            Self::Open => write!(f, "OPEN"),
            Self::Matched => write!(f, "MATCHED"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// Response state of an invited participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantStatus {
    Invited,
    Accepted,
    Declined,
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invited => write!(f, "INVITED"),
            Self::Accepted => write!(f, "ACCEPTED"),
            Self::Declined => write!(f, "DECLINED"),
        }
    }
}
