//! Invariant checks for a finished assignment.
//!
//! A valid assignment over participants `P` under exclusions `E`:
//! 1. is a bijection `P -> P` (everyone gives once, everyone receives once)
//! 2. has no fixed point
//! 3. contains no pair from `E`, in either direction
//!
//! The matcher runs this on every result it returns; callers can run it on
//! assignments loaded back from storage.

use std::collections::HashSet;

use giftmatch_types::{Assignment, GiftmatchError, ParticipantId, Result};

use crate::ExclusionIndex;

/// Check all three assignment invariants.
///
/// # Errors
/// Returns `InvalidAssignment` describing the first violation found.
pub fn verify_assignment(
    assignment: &Assignment,
    participants: &[ParticipantId],
    index: &ExclusionIndex,
) -> Result<()> {
    let expected: HashSet<ParticipantId> = participants.iter().copied().collect();

    if assignment.len() != expected.len() {
        return Err(invalid(format!(
            "{} givers for {} participants",
            assignment.len(),
            expected.len()
        )));
    }

    let mut receivers = HashSet::with_capacity(expected.len());
    for (giver, receiver) in assignment.iter() {
        if !expected.contains(&giver) {
            return Err(invalid(format!("unknown giver {giver}")));
        }
        if !expected.contains(&receiver) {
            return Err(invalid(format!("unknown receiver {receiver}")));
        }
        if giver == receiver {
            return Err(invalid(format!("{giver} gives to themselves")));
        }
        if index.excluded(giver, receiver) {
            return Err(invalid(format!("{giver} -> {receiver} is excluded")));
        }
        if !receivers.insert(receiver) {
            return Err(invalid(format!("{receiver} receives more than once")));
        }
    }

    Ok(())
}

fn invalid(reason: String) -> GiftmatchError {
    GiftmatchError::InvalidAssignment { reason }
}
