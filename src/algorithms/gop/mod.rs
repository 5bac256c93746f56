//! Generalized orienteering (GOP) heuristic.
//!
//! A run builds a feasible path by randomized greedy construction, improves
//! it with 2-opt and path tightening, then alternates random removals with
//! refills until `par_t` consecutive perturbations bring no improvement. Runs are
//! repeated while each one beats the best found so far.
//!
//! # Module Structure
//!
//! - [`config`] - Planner parameters
//! - `solution` - Construction, 2-opt, tightening and perturbation

pub mod config;
mod solution;


pub use config::GopConfig;

use rand::Rng;
use tracing::{debug, info};

use crate::graph::NodeId;
use crate::plan::{PlanProblem, RoutePlan};

use super::RoutePlanner;

/// GOP route planner.
#[derive(Debug, Clone, Default)]
pub struct GopPlanner {
    config: GopConfig,
}

impl GopPlanner {
    pub fn new(config: GopConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GopConfig {
        &self.config
    }

    /// One full run: construction, 2-opt, tightening, then perturbation
    /// starting from the tightened path.
    fn run<R: Rng + ?Sized>(
        &self,
        problem: &PlanProblem<'_>,
        candidates: &[NodeId],
        rng: &mut R,
    ) -> RoutePlan {
        let mut path = solution::construct(problem, candidates, self.config.par_i, rng);
        solution::two_opt(problem, &mut path);
        let mut unused = solution::unused_candidates(problem, candidates, &path);
        solution::tighten(problem, &mut path, &mut unused);
        solution::two_opt(problem, &mut path);
        let plan = solution::perturb(problem, candidates, path, &self.config, rng);
        debug!(score = plan.score(), distance = plan.distance(), "GOP run finished");
        plan
    }
}

impl RoutePlanner for GopPlanner {
    fn plan<R: Rng + ?Sized>(&self, problem: &PlanProblem<'_>, rng: &mut R) -> RoutePlan {
        let direct = problem.length(problem.start(), problem.end());
        if direct > problem.budget() {
            debug!(direct, budget = problem.budget(), "exit out of reach, planning direct route");
            return problem.direct_plan();
        }

        let candidates = problem.candidates();
        let mut best = self.run(problem, &candidates, rng);
        let mut runs = 1usize;
        loop {
            let next = self.run(problem, &candidates, rng);
            runs += 1;
            if next.score() > best.score() {
                best = next;
            } else {
                break;
            }
        }

        info!(
            runs,
            score = best.score(),
            distance = best.distance(),
            visited = best.interior().len(),
            "GOP plan ready"
        );
        best
    }
}
