//! Content digest of an assignment.
//!
//! Lets a caller record "which draw happened" without storing or logging the
//! pairs themselves, and later confirm that a stored assignment is the one
//! that was drawn.

use giftmatch_types::{Assignment, constants};
use sha2::{Digest, Sha256};

/// SHA-256 over the assignment's pairs in ascending giver order.
///
/// Depends only on the contents: two equal assignments always hash equal,
/// regardless of how they were built.
#[must_use]
pub fn compute_assignment_digest(assignment: &Assignment) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(constants::ASSIGNMENT_DIGEST_DOMAIN);
    hasher.update((assignment.len() as u64).to_le_bytes());

    for (giver, receiver) in assignment.iter() {
        hasher.update(giver.0.as_bytes());
        hasher.update(receiver.0.as_bytes());
    }

    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

/// Hex form of [`compute_assignment_digest`], for logs and storage.
#[must_use]
pub fn assignment_digest_hex(assignment: &Assignment) -> String {
    hex::encode(compute_assignment_digest(assignment))
}

/// Recompute the digest and compare with `expected`.
#[must_use]
pub fn verify_assignment_digest(assignment: &Assignment, expected: &[u8; 32]) -> bool {
    compute_assignment_digest(assignment) == *expected
}

#[cfg(test)]
mod tests {
    use giftmatch_types::ParticipantId;

    use super::*;

    fn pid(n: u128) -> ParticipantId {
        ParticipantId::from_u128(n)
    }

    fn cycle(order: &[u128]) -> Assignment {
        order
            .iter()
            .zip(order.iter().cycle().skip(1))
            .map(|(&g, &r)| (pid(g), pid(r)))
            .collect()
    }

    #[test]
    fn empty_digest_is_stable() {
        let a = compute_assignment_digest(&Assignment::new());
        let b = compute_assignment_digest(&Assignment::new());
        assert_eq!(a, b);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let forward = cycle(&[1, 2, 3]);
        let mut reversed = Assignment::new();
        for (g, r) in forward.iter().collect::<Vec<_>>().into_iter().rev() {
            reversed.insert(g, r);
        }
        assert_eq!(
            compute_assignment_digest(&forward),
            compute_assignment_digest(&reversed)
        );
    }

    #[test]
    fn direction_matters() {
        let a = cycle(&[1, 2, 3]);
        let b = cycle(&[1, 3, 2]);
        assert_ne!(compute_assignment_digest(&a), compute_assignment_digest(&b));
    }

    #[test]
    fn verify_roundtrip() {
        let a = cycle(&[1, 2, 3, 4]);
        let digest = compute_assignment_digest(&a);
        assert!(verify_assignment_digest(&a, &digest));
        assert!(!verify_assignment_digest(&a, &[0xAB; 32]));
    }

    #[test]
    fn hex_is_64_chars() {
        assert_eq!(assignment_digest_hex(&cycle(&[1, 2, 3])).len(), 64);
    }
}
