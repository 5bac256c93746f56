//! navplan - navigation meshes and interest-driven route planning
//!
//! Turns a 2D map with obstacles into a mesh of convex corridors, finds
//! taut walking paths across it, and plans which points of interest an
//! agent visits within a time budget.

pub mod algorithms;
pub mod environment;
pub mod geometry;
pub mod graph;
pub mod navmesh;
pub mod pathfinding;
pub mod plan;

pub use algorithms::{ExhaustivePlanner, GopConfig, GopPlanner, RoutePlanner};
pub use environment::{Environment, EnvironmentError};
pub use geometry::{Point, Polygon, Rect};
pub use graph::{NodeId, NodeKind, PlanGraph};
pub use navmesh::{CornerSmoothing, GeometryError, MeshConfig, NavMesh};
pub use plan::{PlanError, PlanProblem, RoutePlan};
