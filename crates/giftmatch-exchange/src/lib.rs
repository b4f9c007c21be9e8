//! # giftmatch-exchange
//!
//! **Caller side of the engine**: the exchange aggregate that owns a roster,
//! gates the draw on its lifecycle, and records the result.
//!
//! ## Architecture
//!
//! 1. **Roster**: invitations, answers, and exclusions in invitation order
//! 2. **Exchange**: status machine DRAFT → OPEN → MATCHED → COMPLETED
//! 3. **Draw**: accepted participants + exclusions between them
//!    → `giftmatch_core::find_assignment` → assignment + digest
//!
//! Persistence and notification stay with the application; an `Exchange`
//! is a plain serializable value.

pub mod exchange;
pub mod roster;

pub use exchange::Exchange;
pub use roster::{Roster, RosterEntry};
