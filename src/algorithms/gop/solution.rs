//! Building blocks of a GOP run: construction, 2-opt, path tightening and
//! perturbation.

use std::collections::BTreeSet;

use rand::seq::index;
use rand::Rng;
use tracing::trace;

use crate::geometry::F64Key;
use crate::graph::NodeId;
use crate::plan::{PlanProblem, RoutePlan};

use super::GopConfig;

/// Greedy randomized construction.
///
/// Starting from the start node, repeatedly samples `par_i` unused
/// candidates (with repeats) and appends the one with the cheapest
/// `d(last, c) + d(c, end)`. Once the end is no longer reachable within the
/// budget, the last appended node is swapped for the end node. If the
/// candidates run out first, the end is appended and the path is 2-opted.
pub(crate) fn construct<R: Rng + ?Sized>(
    problem: &PlanProblem<'_>,
    candidates: &[NodeId],
    par_i: usize,
    rng: &mut R,
) -> Vec<NodeId> {
    let end = problem.end();
    let draws = par_i.max(1);
    let mut unused: Vec<NodeId> = candidates.to_vec();
    let mut path = vec![problem.start()];
    let mut distance = 0.0;

    loop {
        let last = *path.last().unwrap_or(&end);
        if distance + problem.length(last, end) > problem.budget() {
            break;
        }
        if unused.is_empty() {
            path.push(end);
            two_opt(problem, &mut path);
            return path;
        }

        let sample: BTreeSet<NodeId> = (0..draws)
            .map(|_| unused[rng.gen_range(0..unused.len())])
            .collect();
        // ascending ids, so ties keep the lowest one
        let Some(next) = sample
            .into_iter()
            .min_by_key(|&c| F64Key::new(problem.length(last, c) + problem.length(c, end)))
        else {
            break;
        };

        distance += problem.length(last, next);
        path.push(next);
        unused.retain(|&n| n != next);
    }

    if path.len() > 1 {
        path.pop();
    }
    path.push(end);
    path
}

/// Reverses sub-sequences of the interior while that strictly shortens the
/// path. Costs may be asymmetric, so every move is measured on the whole
/// path.
pub(crate) fn two_opt(problem: &PlanProblem<'_>, path: &mut [NodeId]) {
    if path.len() < 4 {
        return;
    }
    let last_interior = path.len() - 2;
    let mut current = problem.path_length(path);

    let mut improved = true;
    while improved {
        improved = false;
        for i in 1..last_interior {
            for j in i + 1..=last_interior {
                path[i..=j].reverse();
                let length = problem.path_length(path);
                if length < current {
                    current = length;
                    improved = true;
                } else {
                    path[i..=j].reverse();
                }
            }
        }
    }
}

/// Candidates missing from `path`, most valuable first, ids ascending on
/// ties.
pub(crate) fn unused_candidates(
    problem: &PlanProblem<'_>,
    candidates: &[NodeId],
    path: &[NodeId],
) -> Vec<NodeId> {
    let visited: BTreeSet<NodeId> = path.iter().copied().collect();
    let mut unused: Vec<NodeId> = candidates
        .iter()
        .copied()
        .filter(|n| !visited.contains(n))
        .collect();
    unused.sort_by(|&a, &b| {
        problem
            .node_score(b)
            .total_cmp(&problem.node_score(a))
            .then(a.cmp(&b))
    });
    unused
}

/// Cheapest position to insert `node` into `path` without exceeding the
/// budget, as `(index, detour)`. Earlier positions win ties.
fn best_insertion(
    problem: &PlanProblem<'_>,
    path: &[NodeId],
    distance: f64,
    node: NodeId,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for pos in 1..path.len() {
        let (a, b) = (path[pos - 1], path[pos]);
        let detour = problem.length(a, node) + problem.length(node, b) - problem.length(a, b);
        if distance + detour > problem.budget() {
            continue;
        }
        if best.map_or(true, |(_, d)| detour < d) {
            best = Some((pos, detour));
        }
    }
    best
}

/// True if some unused node fits somewhere in `path`.
pub(crate) fn can_insert(problem: &PlanProblem<'_>, path: &[NodeId], unused: &[NodeId]) -> bool {
    let distance = problem.path_length(path);
    unused
        .iter()
        .any(|&n| best_insertion(problem, path, distance, n).is_some())
}

/// Greedily inserts unused nodes, in list order, each at its cheapest
/// feasible position. Inserted nodes leave `unused`.
pub(crate) fn tighten(problem: &PlanProblem<'_>, path: &mut Vec<NodeId>, unused: &mut Vec<NodeId>) {
    let mut distance = problem.path_length(path);
    loop {
        let found = unused.iter().enumerate().find_map(|(k, &n)| {
            best_insertion(problem, path, distance, n).map(|(pos, _)| (k, pos))
        });
        let Some((k, pos)) = found else {
            return;
        };
        let node = unused.remove(k);
        path.insert(pos, node);
        distance = problem.path_length(path);
    }
}

/// Removes up to `count` random interior nodes, returning them in removal
/// order.
fn remove_random<R: Rng + ?Sized>(path: &mut Vec<NodeId>, count: usize, rng: &mut R) -> Vec<NodeId> {
    let interior = path.len().saturating_sub(2);
    let count = count.min(interior);
    if count == 0 {
        return Vec::new();
    }
    let picks: Vec<usize> = index::sample(rng, interior, count).into_vec();
    let removed: Vec<NodeId> = picks.iter().map(|&k| path[k + 1]).collect();

    let mut positions: Vec<usize> = picks.iter().map(|&k| k + 1).collect();
    positions.sort_unstable_by(|a, b| b.cmp(a));
    for pos in positions {
        path.remove(pos);
    }
    removed
}

/// Perturbation phase of a run.
///
/// Each round removes random interior nodes, refills the path by tightening
/// and 2-opt, and keeps the result as the new best when it scores strictly
/// higher within the budget. Stops after `par_t` consecutive rounds without
/// improvement, or at once when the path is direct and nothing fits.
pub(crate) fn perturb<R: Rng + ?Sized>(
    problem: &PlanProblem<'_>,
    candidates: &[NodeId],
    mut path: Vec<NodeId>,
    config: &GopConfig,
    rng: &mut R,
) -> RoutePlan {
    let mut best = problem.plan_for(path.clone());
    let mut rounds = 0usize;
    let mut stale = 0usize;

    while stale <= config.par_t {
        rounds += 1;
        let mut unused = unused_candidates(problem, candidates, &path);
        if path.len() <= 2 && !can_insert(problem, &path, &unused) {
            break;
        }

        let removed = remove_random(&mut path, config.par_i, rng);
        unused.extend(removed);
        tighten(problem, &mut path, &mut unused);
        two_opt(problem, &mut path);

        let mut unused = unused_candidates(problem, candidates, &path);
        tighten(problem, &mut path, &mut unused);
        two_opt(problem, &mut path);

        let candidate = problem.plan_for(path.clone());
        if candidate.score() > best.score() && candidate.distance() <= problem.budget() {
            trace!(
                score = candidate.score(),
                distance = candidate.distance(),
                rounds,
                "perturbation improved plan"
            );
            best = candidate;
            stale = 0;
        } else {
            stale += 1;
        }
    }
    best
}
