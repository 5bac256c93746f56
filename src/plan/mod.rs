//! Route planning requests and their results.

mod error;

pub use error::PlanError;

use std::fmt;
use std::ops::Range;

use crate::graph::{EdgeSet, NodeId};

/// Minimum score for a node to be worth visiting.
pub const MIN_CANDIDATE_SCORE: f64 = 1e-6;

/// An ordered visiting plan: spawn first, exit last, POIs in between.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePlan {
    nodes: Vec<NodeId>,
    distance: f64,
    score: f64,
}

impl RoutePlan {
    pub fn new(nodes: Vec<NodeId>, distance: f64, score: f64) -> Self {
        Self {
            nodes,
            distance,
            score,
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The visited POIs, without the start and end nodes.
    pub fn interior(&self) -> &[NodeId] {
        if self.nodes.len() <= 2 {
            return &[];
        }
        &self.nodes[1..self.nodes.len() - 1]
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Total cost of the plan, travel plus dwell.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// True for a plan that goes straight from start to end.
    pub fn is_direct(&self) -> bool {
        self.interior().is_empty()
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}

impl fmt::Display for RoutePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        write!(
            f,
            "[{}] distance {:.3} score {:.3}",
            nodes.join(" -> "),
            self.distance,
            self.score
        )
    }
}

/// One planning request: where to start and end, which nodes may be
/// visited, how far the agent may travel and how much each node is worth.
pub struct PlanProblem<'a> {
    edges: &'a EdgeSet,
    start: NodeId,
    end: NodeId,
    candidates: Range<NodeId>,
    budget: f64,
    score: Box<dyn Fn(NodeId) -> f64 + 'a>,
}

impl<'a> PlanProblem<'a> {
    /// # Arguments
    ///
    /// * `edges` - Directed cost between every pair of nodes
    /// * `start`, `end` - Terminal nodes of every plan
    /// * `candidates` - Node ids that may appear between the terminals
    /// * `budget` - Maximum total cost of a plan
    /// * `score` - Value of visiting a node
    pub fn new(
        edges: &'a EdgeSet,
        start: NodeId,
        end: NodeId,
        candidates: Range<NodeId>,
        budget: f64,
        score: impl Fn(NodeId) -> f64 + 'a,
    ) -> Self {
        Self {
            edges,
            start,
            end,
            candidates,
            budget,
            score: Box::new(score),
        }
    }

    pub fn edges(&self) -> &EdgeSet {
        self.edges
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn length(&self, from: NodeId, to: NodeId) -> f64 {
        self.edges.length(from, to)
    }

    pub fn node_score(&self, node: NodeId) -> f64 {
        (self.score)(node)
    }

    /// Nodes from the candidate range worth visiting, in id order.
    pub fn candidates(&self) -> Vec<NodeId> {
        self.candidates
            .clone()
            .filter(|&n| n != self.start && n != self.end)
            .filter(|&n| self.node_score(n) > MIN_CANDIDATE_SCORE)
            .collect()
    }

    /// Cost of walking `path` in order.
    pub fn path_length(&self, path: &[NodeId]) -> f64 {
        self.edges.path_length(path)
    }

    /// Summed score of the nodes between the first and the last one.
    pub fn path_score(&self, path: &[NodeId]) -> f64 {
        if path.len() <= 2 {
            return 0.0;
        }
        path[1..path.len() - 1]
            .iter()
            .map(|&n| self.node_score(n))
            .sum()
    }

    /// Plan that goes straight from start to end.
    pub fn direct_plan(&self) -> RoutePlan {
        RoutePlan::new(
            vec![self.start, self.end],
            self.length(self.start, self.end),
            0.0,
        )
    }

    /// Wraps a node sequence with its realized cost and score.
    pub fn plan_for(&self, path: Vec<NodeId>) -> RoutePlan {
        let distance = self.path_length(&path);
        let score = self.path_score(&path);
        RoutePlan::new(path, distance, score)
    }
}

impl fmt::Debug for PlanProblem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanProblem")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("candidates", &self.candidates)
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}
