//! System-wide constants for the GiftMatch engine.

/// Minimum number of participants in a draw.
pub const MIN_PARTICIPANTS: usize = 3;

/// Default number of independent randomized backtracking trials.
pub const DEFAULT_MAX_TRIALS: usize = 10;

/// Domain-separation prefix for assignment digests.
pub const ASSIGNMENT_DIGEST_DOMAIN: &[u8] = b"giftmatch:assignment:v1:";

