//! Feasibility checks run before the randomized search.
//!
//! Two levels:
//!
//! - [`precheck`]: every participant has at least one candidate. Cheap,
//!   necessary, **not** sufficient. A configuration can pass and still admit
//!   no complete assignment (e.g. three people who can only give to the same
//!   fourth person).
//! - [`prove_feasible`]: maximum bipartite matching (Kuhn's augmenting
//!   paths, O(V·E)). Exact: returns a witness assignment iff one exists.

use giftmatch_types::{Assignment, GiftmatchError, Result};

use crate::CandidateGraph;

/// Reject any graph in which some participant has no legal receiver.
///
/// Reports the first such participant in input order, so repeated calls on
/// the same input always fail the same way.
///
/// # Errors
/// Returns `StructurallyInfeasible` naming the stranded participant.
pub fn precheck(graph: &CandidateGraph) -> Result<()> {
    if let Some((participant, _)) = graph.degrees().find(|&(_, degree)| degree == 0) {
        tracing::warn!(
            participant = %participant,
            participants = graph.len(),
            "Participant has no eligible receiver"
        );
        return Err(GiftmatchError::StructurallyInfeasible { participant });
    }
    Ok(())
}

/// Prove that a complete assignment exists by constructing one.
///
/// Givers and receivers are the two sides of a bipartite graph; a perfect
/// matching on it is exactly a valid assignment.
///
/// # Errors
/// Returns `NoValidAssignment` with the size of the maximum matching when
/// it does not cover everyone.
pub fn prove_feasible(graph: &CandidateGraph) -> Result<Assignment> {
    let n = graph.len();
    let mut giver_of: Vec<Option<usize>> = vec![None; n];
    let mut matched = 0;

    for giver in 0..n {
        let mut visited = vec![false; n];
        if augment(graph, giver, &mut visited, &mut giver_of) {
            matched += 1;
        }
    }

    if matched < n {
        tracing::warn!(matched, total = n, "No perfect matching over candidate graph");
        return Err(GiftmatchError::NoValidAssignment { matched, total: n });
    }

    Ok(giver_of
        .iter()
        .enumerate()
        .filter_map(|(receiver, giver)| {
            giver.map(|g| (graph.participant(g), graph.participant(receiver)))
        })
        .collect())
}

/// Try to find an augmenting path starting at `giver`.
fn augment(
    graph: &CandidateGraph,
    giver: usize,
    visited: &mut [bool],
    giver_of: &mut [Option<usize>],
) -> bool {
    for &receiver in graph.adjacency(giver) {
        if visited[receiver] {
            continue;
        }
        visited[receiver] = true;
        let free = match giver_of[receiver] {
            None => true,
            Some(current) => augment(graph, current, visited, giver_of),
        };
        if free {
            giver_of[receiver] = Some(giver);
            return true;
        }
    }
    false
}
