//! Planning graph: spawn, exit and POI nodes joined by walking cost.

mod edges;
mod nodes;


pub use edges::EdgeSet;
pub use nodes::NodeSet;

use std::ops::Range;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::algorithms::RoutePlanner;
use crate::environment::{Environment, EnvironmentError};
use crate::geometry::{CorridorId, Point, Rect};
use crate::navmesh::NavMesh;
use crate::plan::{PlanError, PlanProblem, RoutePlan};

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Spawn,
    Exit,
    Poi,
}

/// Complete directed graph over the map's spawns, exits and POIs.
///
/// Nodes are numbered spawns first, then exits, then POIs, each group in
/// the order the environment lists them. The cost of `i -> j` is the
/// walking distance between the node centers plus the dwell time of `j`.
///
/// # Invariants
///
/// * `edges.length(i, i) == 0`
/// * `edges.length(i, j)` is `f64::INFINITY` when no walkable route exists
#[derive(Debug, Clone)]
pub struct PlanGraph<'m> {
    mesh: &'m NavMesh,
    nodes: NodeSet,
    edges: EdgeSet,
    exit_start: NodeId,
    poi_start: NodeId,
    borders: Vec<Rect>,
    positions: Vec<Point>,
    corridors: Vec<CorridorId>,
    dwell: Vec<f64>,
    spawn_weights: Vec<f64>,
    agent_path_width: f64,
}

impl<'m> PlanGraph<'m> {
    /// Builds the graph and fills the cost matrix.
    ///
    /// Every unordered node pair is routed once, in parallel, and both
    /// directions are written from that single route.
    ///
    /// # Errors
    ///
    /// * [`EnvironmentError::RelevanceLength`] if a POI does not carry one
    ///   relevance per topic
    /// * [`EnvironmentError::NoCorridor`] if a node center cannot be placed
    ///   on the mesh
    pub fn build(env: &Environment, mesh: &'m NavMesh) -> Result<Self, EnvironmentError> {
        let topics = env.topic_count();
        let exit_start = env.spawns().len();
        let poi_start = exit_start + env.exits().len();
        let node_count = poi_start + env.pois().len();

        let mut borders = Vec::with_capacity(node_count);
        let mut dwell = Vec::with_capacity(node_count);
        borders.extend(env.spawns().iter().map(|s| s.border));
        borders.extend(env.exits().iter().map(|e| e.border));
        dwell.resize(poi_start, 0.0);

        let mut nodes = NodeSet::new(node_count, topics);
        for (k, poi) in env.pois().iter().enumerate() {
            if poi.topic_relevance.len() != topics {
                return Err(EnvironmentError::RelevanceLength {
                    poi: k,
                    expected: topics,
                    found: poi.topic_relevance.len(),
                });
            }
            let node = poi_start + k;
            for (topic, &relevance) in poi.topic_relevance.iter().enumerate() {
                nodes.set_score(node, topic, relevance);
            }
            borders.push(poi.border);
            dwell.push(poi.dwell.value());
        }

        let positions: Vec<Point> = borders.iter().map(Rect::center).collect();
        let corridors = positions
            .iter()
            .enumerate()
            .map(|(node, p)| {
                mesh.find_corridor(p)
                    .ok_or(EnvironmentError::NoCorridor { node })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let width = env.agent_path_width;
        let pairs: Vec<(NodeId, NodeId)> = (0..node_count)
            .flat_map(|i| (i + 1..node_count).map(move |j| (i, j)))
            .collect();
        let distances: Vec<(NodeId, NodeId, Option<f64>)> = pairs
            .par_iter()
            .map(|&(i, j)| {
                let d = mesh.get_distance(
                    positions[i],
                    corridors[i],
                    positions[j],
                    corridors[j],
                    width,
                );
                (i, j, d)
            })
            .collect();

        let mut edges = EdgeSet::new(node_count);
        let mut unreachable = 0usize;
        for (i, j, d) in distances {
            match d {
                Some(d) => {
                    edges.set_length(i, j, d + dwell[j]);
                    edges.set_length(j, i, d + dwell[i]);
                }
                None => {
                    warn!(from = i, to = j, "no walkable route between nodes");
                    unreachable += 1;
                }
            }
        }

        info!(
            nodes = node_count,
            spawns = exit_start,
            exits = poi_start - exit_start,
            pois = node_count - poi_start,
            unreachable_pairs = unreachable,
            "plan graph built"
        );

        Ok(Self {
            mesh,
            nodes,
            edges,
            exit_start,
            poi_start,
            borders,
            positions,
            corridors,
            dwell,
            spawn_weights: env.spawns().iter().map(|s| s.weight).collect(),
            agent_path_width: width,
        })
    }

    pub fn node_count(&self) -> usize {
        self.borders.len()
    }

    pub fn spawn_range(&self) -> Range<NodeId> {
        0..self.exit_start
    }

    pub fn exit_range(&self) -> Range<NodeId> {
        self.exit_start..self.poi_start
    }

    pub fn poi_range(&self) -> Range<NodeId> {
        self.poi_start..self.node_count()
    }

    pub fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        if node < self.exit_start {
            Some(NodeKind::Spawn)
        } else if node < self.poi_start {
            Some(NodeKind::Exit)
        } else if node < self.node_count() {
            Some(NodeKind::Poi)
        } else {
            None
        }
    }

    /// Center of the node's area.
    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.positions.get(node).copied()
    }

    pub fn corridor(&self, node: NodeId) -> Option<CorridorId> {
        self.corridors.get(node).copied()
    }

    pub fn border(&self, node: NodeId) -> Option<&Rect> {
        self.borders.get(node)
    }

    /// Seconds spent at the node; zero for spawns and exits.
    pub fn dwell(&self, node: NodeId) -> Option<f64> {
        self.dwell.get(node).copied()
    }

    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn spawn_weights(&self) -> &[f64] {
        &self.spawn_weights
    }

    pub fn mesh(&self) -> &NavMesh {
        self.mesh
    }

    /// Uniform point inside the node's area.
    pub fn random_point<R: Rng + ?Sized>(&self, node: NodeId, rng: &mut R) -> Option<Point> {
        self.borders.get(node).map(|b| b.random_point(rng))
    }

    /// Walkable route from `from` to a random point of `to_node`.
    ///
    /// The returned list omits `from` and ends at the chosen point.
    pub fn next_route<R: Rng + ?Sized>(
        &self,
        from: Point,
        to_node: NodeId,
        rng: &mut R,
    ) -> Option<Vec<Point>> {
        let target = self.random_point(to_node, rng)?;
        self.route_between(from, target)
    }

    /// Walkable route between two points, without the start point.
    pub fn route_between(&self, from: Point, to: Point) -> Option<Vec<Point>> {
        let mut path = self.mesh.route(from, to, self.agent_path_width)?;
        if !path.is_empty() {
            path.remove(0);
        }
        Some(path)
    }

    /// Plans a visit for one agent.
    ///
    /// The start is drawn from the spawns by weight and the end uniformly
    /// from the exits. A POI is worth the dot product of its topic
    /// relevance with `interests`.
    ///
    /// # Arguments
    ///
    /// * `budget` - Maximum total cost, travel plus dwell
    /// * `interests` - One weight per topic
    /// * `planner` - Solver for the resulting orienteering problem
    /// * `rng` - Source of every random draw
    pub fn build_plan<P, R>(
        &self,
        budget: f64,
        interests: &[f64],
        planner: &P,
        rng: &mut R,
    ) -> Result<RoutePlan, PlanError>
    where
        P: RoutePlanner,
        R: Rng + ?Sized,
    {
        if self.exit_start == 0 {
            return Err(PlanError::NoSpawns);
        }
        if self.poi_start == self.exit_start {
            return Err(PlanError::NoExits);
        }
        if interests.len() != self.nodes.score_elements() {
            return Err(PlanError::InterestLengthMismatch {
                expected: self.nodes.score_elements(),
                found: interests.len(),
            });
        }

        let spawn_dist =
            WeightedIndex::new(&self.spawn_weights).map_err(|_| PlanError::InvalidSpawnWeights)?;
        let start = spawn_dist.sample(rng);
        let end = self.exit_start + rng.gen_range(0..self.poi_start - self.exit_start);

        let nodes = &self.nodes;
        let problem = PlanProblem::new(
            &self.edges,
            start,
            end,
            self.poi_range(),
            budget,
            move |node| nodes.projected_score(node, interests),
        );
        debug!(start, end, budget, "planning route");
        Ok(planner.plan(&problem, rng))
    }
}
