//! # giftmatch-core
//!
//! **Pure gift-exchange matching engine for GiftMatch.**
//!
//! Given accepted participants and symmetric exclusion pairs, finds one
//! giver → receiver assignment in which nobody draws themselves and no
//! excluded pair is matched. It has:
//!
//! - **Zero side effects**: no I/O, no persistence, no shared state
//! - **Typed failures**: precondition, certain infeasibility, or search
//!   exhaustion, so callers can tell "impossible" from "not found"
//! - **Reproducible draws**: every random choice goes through a caller-visible RNG
//!
//! ```text
//! participants + exclusions
//!   -> ExclusionIndex -> CandidateGraph -> precheck
//!   -> [prove_feasible] -> randomized backtracking trials
//!   -> verify_assignment -> Assignment
//! ```

pub mod candidate_graph;
pub mod digest;
pub mod exclusion_index;
pub mod feasibility;
pub mod matcher;
pub mod verification;

pub use candidate_graph::CandidateGraph;
pub use digest::{assignment_digest_hex, compute_assignment_digest, verify_assignment_digest};
pub use exclusion_index::ExclusionIndex;
pub use feasibility::{precheck, prove_feasible};
pub use matcher::{find_assignment, find_assignment_with_rng};
pub use verification::verify_assignment;
