//! Randomized backtracking matcher.
//!
//! The entry point of the engine:
//!
//! ```text
//! find_assignment(participants, exclusions, config) -> Result<Assignment>
//! ```
//!
//! ## Pipeline
//!
//! 1. Check the config and the participant count
//! 2. Build the [`ExclusionIndex`] and the [`CandidateGraph`]
//! 3. [`precheck`]: fail fast if anyone has no candidate
//! 4. Optionally [`prove_feasible`] (exact, see [`MatcherConfig::exact_feasibility`])
//! 5. Run up to `max_trials` independent randomized depth-first searches
//! 6. Verify the first complete assignment and return it
//!
//! ## Trials
//!
//! Each trial shuffles the giver order and every giver's candidate order,
//! then backtracks: claim a free receiver, forward-check that every later
//! giver still has a free candidate, recurse, undo on failure. Without a
//! backtrack budget a trial explores its whole tree.

use giftmatch_types::{Assignment, ExclusionPair, GiftmatchError, MatcherConfig, ParticipantId, Result};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    CandidateGraph, ExclusionIndex,
    digest::assignment_digest_hex,
    feasibility::{precheck, prove_feasible},
    verification::verify_assignment,
};

/// Find one valid assignment.
///
/// Uses a `StdRng` seeded from `config.seed` when set, otherwise the
/// thread-local RNG.
///
/// # Errors
/// - `Configuration` for an invalid config
/// - `TooFewParticipants`, `DuplicateParticipant` for bad input
/// - `StructurallyInfeasible` if someone has no candidate
/// - `NoValidAssignment` if the exact proof fails (only when enabled)
/// - `SearchExhausted` if every trial failed
pub fn find_assignment(
    participants: &[ParticipantId],
    exclusions: &[ExclusionPair],
    config: &MatcherConfig,
) -> Result<Assignment> {
    match config.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            find_assignment_with_rng(participants, exclusions, config, &mut rng)
        }
        None => find_assignment_with_rng(participants, exclusions, config, &mut rand::thread_rng()),
    }
}

/// [`find_assignment`] with a caller-supplied RNG. `config.seed` is ignored.
///
/// # Errors
/// Same as [`find_assignment`].
pub fn find_assignment_with_rng<R: Rng + ?Sized>(
    participants: &[ParticipantId],
    exclusions: &[ExclusionPair],
    config: &MatcherConfig,
    rng: &mut R,
) -> Result<Assignment> {
    config.validate()?;
    if participants.len() < config.min_participants {
        return Err(GiftmatchError::TooFewParticipants {
            count: participants.len(),
            min: config.min_participants,
        });
    }

    let index = ExclusionIndex::from_pairs(exclusions);
    let graph = CandidateGraph::build(participants, &index)?;
    precheck(&graph)?;

    let witness = if config.exact_feasibility {
        Some(prove_feasible(&graph)?)
    } else {
        None
    };

    for trial in 1..=config.max_trials {
        let mut search = Trial::new(&graph, config.max_backtracks_per_trial, rng);
        let outcome = search.run();
        tracing::debug!(
            trial,
            backtracks = search.backtracks,
            outcome = ?outcome,
            "Backtracking trial finished"
        );
        if outcome == TrialOutcome::Complete {
            let assignment = search.into_assignment();
            return accept(assignment, participants, &index, trial);
        }
    }

    if let Some(witness) = witness {
        tracing::debug!(
            trials = config.max_trials,
            "Randomized trials exhausted, using feasibility witness"
        );
        return accept(witness, participants, &index, config.max_trials);
    }

    tracing::warn!(
        participants = participants.len(),
        exclusions = index.len(),
        trials = config.max_trials,
        "No assignment found within trial budget"
    );
    Err(GiftmatchError::SearchExhausted {
        trials: config.max_trials,
    })
}

/// Final gate: nothing leaves the engine without passing verification.
fn accept(
    assignment: Assignment,
    participants: &[ParticipantId],
    index: &ExclusionIndex,
    trial: usize,
) -> Result<Assignment> {
    verify_assignment(&assignment, participants, index)?;
    tracing::info!(
        participants = participants.len(),
        exclusions = index.len(),
        trial,
        digest = assignment_digest_hex(&assignment),
        "Assignment found"
    );
    Ok(assignment)
}

// ---------------------------------------------------------------------------
// Trial
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrialOutcome {
    /// Every giver has a receiver.
    Complete,
    /// The whole search tree for this ordering was explored.
    Exhausted,
    /// The backtrack budget ran out first.
    OverBudget,
}

/// One randomized depth-first search over a fixed ordering.
struct Trial<'g> {
    graph: &'g CandidateGraph,
    /// Giver positions in the order they are assigned.
    order: Vec<usize>,
    /// Per giver position, its candidates in the order they are tried.
    candidates: Vec<Vec<usize>>,
    claimed: Vec<bool>,
    receiver_of: Vec<Option<usize>>,
    backtracks: u64,
    budget: Option<u64>,
}

impl<'g> Trial<'g> {
    fn new<R: Rng + ?Sized>(graph: &'g CandidateGraph, budget: Option<u64>, rng: &mut R) -> Self {
        let n = graph.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        let candidates = (0..n)
            .map(|giver| {
                let mut c = graph.adjacency(giver).to_vec();
                c.shuffle(rng);
                c
            })
            .collect();
        Self {
            graph,
            order,
            candidates,
            claimed: vec![false; n],
            receiver_of: vec![None; n],
            backtracks: 0,
            budget,
        }
    }

    fn run(&mut self) -> TrialOutcome {
        self.search(0)
    }

    fn search(&mut self, depth: usize) -> TrialOutcome {
        if depth == self.order.len() {
            return TrialOutcome::Complete;
        }
        let giver = self.order[depth];

        for k in 0..self.candidates[giver].len() {
            let receiver = self.candidates[giver][k];
            if self.claimed[receiver] {
                continue;
            }

            self.claimed[receiver] = true;
            self.receiver_of[giver] = Some(receiver);

            if self.rest_viable(depth + 1) {
                match self.search(depth + 1) {
                    TrialOutcome::Exhausted => {}
                    done => return done,
                }
            }

            self.claimed[receiver] = false;
            self.receiver_of[giver] = None;
            self.backtracks += 1;
            if self.budget.is_some_and(|b| self.backtracks >= b) {
                return TrialOutcome::OverBudget;
            }
        }

        TrialOutcome::Exhausted
    }

    /// Every giver from `depth` on still has at least one unclaimed candidate.
    fn rest_viable(&self, depth: usize) -> bool {
        self.order[depth..].iter().all(|&giver| {
            self.graph
                .adjacency(giver)
                .iter()
                .any(|&receiver| !self.claimed[receiver])
        })
    }

    fn into_assignment(self) -> Assignment {
        self.receiver_of
            .iter()
            .enumerate()
            .filter_map(|(giver, receiver)| {
                receiver.map(|r| (self.graph.participant(giver), self.graph.participant(r)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use giftmatch_types::fixtures;

    use super::*;

    fn pid(n: u128) -> ParticipantId {
        ParticipantId::from_u128(n)
    }

    fn pairs(raw: &[(u128, u128)]) -> Vec<ExclusionPair> {
        raw.iter()
            .map(|&(a, b)| ExclusionPair::new(pid(a), pid(b)).unwrap())
            .collect()
    }

    fn seeded(seed: u64) -> MatcherConfig {
        MatcherConfig::default().with_seed(seed)
    }

    #[test]
    fn three_without_exclusions_is_a_cycle() {
        let ps = fixtures::participants(3);
        let a = find_assignment(&ps, &[], &seeded(1)).unwrap();
        assert_eq!(a.len(), 3);
        let receivers: HashSet<_> = a.iter().map(|(_, r)| r).collect();
        assert_eq!(receivers.len(), 3);
        for (g, r) in a.iter() {
            assert_ne!(g, r);
        }
    }

    #[test]
    fn exclusion_routes_around() {
        let ps = fixtures::participants(4);
        let ex = pairs(&[(1, 2)]);
        for seed in 0..20 {
            let a = find_assignment(&ps, &ex, &seeded(seed)).unwrap();
            assert_ne!(a.receiver_of(pid(1)), Some(pid(2)));
            assert_ne!(a.receiver_of(pid(2)), Some(pid(1)));
        }
    }

    #[test]
    fn three_with_one_exclusion_has_no_assignment() {
        // 1 and 2 can each only give to 3.
        let ps = fixtures::participants(3);
        let err = find_assignment(&ps, &pairs(&[(1, 2)]), &seeded(0)).unwrap_err();
        assert!(matches!(err, GiftmatchError::SearchExhausted { .. }));
    }

    #[test]
    fn two_participants_rejected_before_search() {
        let ps = fixtures::participants(2);
        let err = find_assignment(&ps, &[], &seeded(0)).unwrap_err();
        assert!(matches!(err, GiftmatchError::TooFewParticipants { count: 2, min: 3 }));
    }

    #[test]
    fn stranded_participant_is_structural() {
        let ps = fixtures::participants(3);
        let err = find_assignment(&ps, &pairs(&[(1, 2), (1, 3)]), &seeded(0)).unwrap_err();
        assert!(matches!(err, GiftmatchError::StructurallyInfeasible { participant } if participant == pid(1)));
    }

    #[test]
    fn hall_violation_exhausts_search() {
        let ps = fixtures::participants(4);
        let err = find_assignment(&ps, &pairs(&[(1, 2), (1, 3), (2, 3)]), &seeded(0)).unwrap_err();
        assert!(
            matches!(err, GiftmatchError::SearchExhausted { trials: 10 }),
            "got {err:?}"
        );
    }

    #[test]
    fn hall_violation_proven_with_exact_config() {
        let ps = fixtures::participants(4);
        let cfg = MatcherConfig::exact().with_seed(0);
        let err = find_assignment(&ps, &pairs(&[(1, 2), (1, 3), (2, 3)]), &cfg).unwrap_err();
        assert!(matches!(err, GiftmatchError::NoValidAssignment { .. }));
    }

    #[test]
    fn duplicate_participant_rejected() {
        let ps = vec![pid(1), pid(2), pid(3), pid(2)];
        let err = find_assignment(&ps, &[], &seeded(0)).unwrap_err();
        assert!(matches!(err, GiftmatchError::DuplicateParticipant(p) if p == pid(2)));
    }

    #[test]
    fn invalid_config_rejected() {
        let ps = fixtures::participants(3);
        let err = find_assignment(&ps, &[], &seeded(0).with_max_trials(0)).unwrap_err();
        assert!(matches!(err, GiftmatchError::Configuration(_)));
    }

    #[test]
    fn same_seed_same_assignment() {
        let ps = fixtures::participants(12);
        let ex = pairs(&[(1, 2), (3, 4), (5, 6), (7, 8)]);
        let a = find_assignment(&ps, &ex, &seeded(99)).unwrap();
        let b = find_assignment(&ps, &ex, &seeded(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_explore_different_assignments() {
        let ps = fixtures::participants(8);
        let distinct: HashSet<Vec<(ParticipantId, ParticipantId)>> = (0..30)
            .map(|seed| find_assignment(&ps, &[], &seeded(seed)).unwrap().iter().collect())
            .collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn tight_budget_still_errors_cleanly() {
        // 1, 2, 3 all need 4: every trial must backtrack.
        let ps = fixtures::participants(4);
        let cfg = MatcherConfig {
            max_backtracks_per_trial: Some(1),
            ..seeded(3)
        };
        let err = find_assignment(&ps, &pairs(&[(1, 2), (1, 3), (2, 3)]), &cfg).unwrap_err();
        assert!(matches!(err, GiftmatchError::SearchExhausted { .. }));
    }

    /// Participants 1, 2 and 3 may only give to 4; everyone else is free.
    /// Every candidate set is non-empty, yet no assignment exists.
    fn funnel(n: u128) -> (Vec<ParticipantId>, Vec<ExclusionPair>) {
        let ps = fixtures::participants(n);
        let mut ex = Vec::new();
        for a in 1..=3 {
            for b in (1..=n).filter(|&b| b != a && b != 4) {
                ex.push(ExclusionPair::new(pid(a), pid(b)).unwrap());
            }
        }
        (ps, ex)
    }

    #[test]
    fn backtrack_budget_bounds_large_infeasible_search() {
        let (ps, ex) = funnel(30);
        let cfg = MatcherConfig {
            max_backtracks_per_trial: Some(200),
            ..seeded(8)
        };
        let err = find_assignment(&ps, &ex, &cfg).unwrap_err();
        assert!(matches!(err, GiftmatchError::SearchExhausted { trials: 10 }));

        let graph = CandidateGraph::build(&ps, &ExclusionIndex::from_pairs(&ex)).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..10 {
            let mut t = Trial::new(&graph, Some(200), &mut rng);
            assert_ne!(t.run(), TrialOutcome::Complete);
            assert!(t.backtracks <= 200);
        }
    }

    #[test]
    fn exact_proof_rejects_large_infeasible_input() {
        let (ps, ex) = funnel(30);
        let err = find_assignment(&ps, &ex, &MatcherConfig::exact().with_seed(8)).unwrap_err();
        assert!(matches!(
            err,
            GiftmatchError::NoValidAssignment { matched: 28, total: 30 }
        ));
    }

    #[test]
    fn trial_outcomes() {
        let ps = fixtures::participants(4);
        let mut rng = StdRng::seed_from_u64(5);

        let open = CandidateGraph::build(&ps, &ExclusionIndex::new()).unwrap();
        let mut t = Trial::new(&open, None, &mut rng);
        assert_eq!(t.run(), TrialOutcome::Complete);
        assert_eq!(t.into_assignment().len(), 4);

        let blocked = CandidateGraph::build(
            &ps,
            &ExclusionIndex::from_pairs(&pairs(&[(1, 2), (1, 3), (2, 3)])),
        )
        .unwrap();
        let mut t = Trial::new(&blocked, None, &mut rng);
        assert_eq!(t.run(), TrialOutcome::Exhausted);
    }

    #[test]
    fn custom_rng_is_used() {
        let ps = fixtures::participants(6);
        let mut a_rng = StdRng::seed_from_u64(11);
        let mut b_rng = StdRng::seed_from_u64(11);
        let cfg = MatcherConfig::default();
        let a = find_assignment_with_rng(&ps, &[], &cfg, &mut a_rng).unwrap();
        let b = find_assignment_with_rng(&ps, &[], &cfg, &mut b_rng).unwrap();
        assert_eq!(a, b);
    }
}
