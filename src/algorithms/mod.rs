pub mod exhaustive;
pub mod gop;

pub use exhaustive::ExhaustivePlanner;
pub use gop::{GopConfig, GopPlanner};

use rand::Rng;

use crate::plan::{PlanProblem, RoutePlan};

/// Solver for the orienteering problem behind a [`PlanProblem`].
pub trait RoutePlanner {
    /// Chooses the POIs to visit and their order.
    ///
    /// # Arguments
    ///
    /// * `problem` - Terminals, candidates, budget and scores
    /// * `rng` - Source of every random draw the planner makes
    ///
    /// # Returns
    ///
    /// A [`RoutePlan`] from `problem.start()` to `problem.end()`. When the
    /// end cannot be reached within the budget the plan is the direct
    /// start-to-end hop with score 0, whatever its cost.
    fn plan<R: Rng + ?Sized>(&self, problem: &PlanProblem<'_>, rng: &mut R) -> RoutePlan;
}
