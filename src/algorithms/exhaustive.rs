//! Exact planner for small instances.

use rand::Rng;
use tracing::debug;

use crate::graph::NodeId;
use crate::plan::{PlanProblem, RoutePlan};

use super::RoutePlanner;

const SCORE_TOLERANCE: f64 = 1e-9;

/// Depth-first enumeration of every feasible visiting order.
///
/// Returns the highest scoring plan, the shortest one among equal scores.
/// Exponential in the candidate count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustivePlanner;

struct Search<'p, 'a> {
    problem: &'p PlanProblem<'a>,
    candidates: Vec<NodeId>,
    used: Vec<bool>,
    path: Vec<NodeId>,
    best: Option<RoutePlan>,
}

impl Search<'_, '_> {
    fn visit(&mut self, distance: f64) {
        let problem = self.problem;
        let last = *self.path.last().unwrap_or(&problem.start());

        let closed = distance + problem.length(last, problem.end());
        if closed <= problem.budget() {
            let score: f64 = self.path[1..].iter().map(|&n| problem.node_score(n)).sum();
            let better = match &self.best {
                None => true,
                Some(best) => {
                    score > best.score() + SCORE_TOLERANCE
                        || ((score - best.score()).abs() <= SCORE_TOLERANCE
                            && closed < best.distance())
                }
            };
            if better {
                let mut nodes = self.path.clone();
                nodes.push(problem.end());
                self.best = Some(RoutePlan::new(nodes, closed, score));
            }
        }

        for k in 0..self.candidates.len() {
            if self.used[k] {
                continue;
            }
            let node = self.candidates[k];
            let next = distance + problem.length(last, node);
            if next > problem.budget() {
                continue;
            }
            self.used[k] = true;
            self.path.push(node);
            self.visit(next);
            self.path.pop();
            self.used[k] = false;
        }
    }
}

impl RoutePlanner for ExhaustivePlanner {
    fn plan<R: Rng + ?Sized>(&self, problem: &PlanProblem<'_>, _rng: &mut R) -> RoutePlan {
        let direct = problem.length(problem.start(), problem.end());
        if direct > problem.budget() {
            return problem.direct_plan();
        }

        let candidates = problem.candidates();
        let mut search = Search {
            problem,
            used: vec![false; candidates.len()],
            candidates,
            path: vec![problem.start()],
            best: None,
        };
        search.visit(0.0);

        let plan = search.best.unwrap_or_else(|| problem.direct_plan());
        debug!(score = plan.score(), distance = plan.distance(), "exhaustive plan ready");
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeSet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line() -> EdgeSet {
        let x: [f64; 7] = [0.0, 40.0, 0.0, 10.0, 20.0, 30.0, 40.0];
        EdgeSet::from_fn(x.len(), |i, j| (x[i] - x[j]).abs())
    }

    #[test]
    fn finds_every_poi_on_the_line() {
        let edges = line();
        let problem = PlanProblem::new(&edges, 0, 1, 2..7, 40.0, |_| 1.0);
        let plan = ExhaustivePlanner.plan(&problem, &mut StdRng::seed_from_u64(0));
        assert_eq!(plan.nodes(), &[0, 2, 3, 4, 5, 6, 1]);
        assert_eq!(plan.score(), 5.0);
        assert_eq!(plan.distance(), 40.0);
    }

    #[test]
    fn degenerate_when_exit_is_too_far() {
        let edges = line();
        let problem = PlanProblem::new(&edges, 0, 1, 2..7, 15.0, |_| 1.0);
        let plan = ExhaustivePlanner.plan(&problem, &mut StdRng::seed_from_u64(0));
        assert_eq!(plan.nodes(), &[0, 1]);
        assert_eq!(plan.score(), 0.0);
        assert_eq!(plan.distance(), 40.0);
    }

    #[test]
    fn prefers_value_over_count() {
        let edges = line();
        let scores = [0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 5.0];
        // Round trip from x = 0 with 80 to spend: the far POI beats the near pair
        let problem = PlanProblem::new(&edges, 0, 0, 2..7, 80.0, |n| scores[n]);
        let plan = ExhaustivePlanner.plan(&problem, &mut StdRng::seed_from_u64(0));
        assert!(plan.interior().contains(&6));
        assert_eq!(plan.score(), 7.0);
        assert!(plan.distance() <= 80.0);
    }

    #[test]
    fn optimum_grows_with_budget() {
        let edges = EdgeSet::from_fn(7, |i, j| ((i * 7 + j * 3) % 11) as f64 + 1.0);
        let mut last = 0.0;
        for budget in [0.0, 2.0, 5.0, 8.0, 12.0, 20.0, 40.0] {
            let problem = PlanProblem::new(&edges, 0, 1, 2..7, budget, |n| n as f64);
            let plan = ExhaustivePlanner.plan(&problem, &mut StdRng::seed_from_u64(0));
            assert!(plan.score() >= last, "budget {budget}");
            last = plan.score();
        }
    }
}
