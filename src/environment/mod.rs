//! Static description of a map: walkable boundary, obstacles, and the
//! spawn, exit and point-of-interest areas agents move between.

mod error;

pub use error::EnvironmentError;

use std::collections::BTreeMap;
use std::fmt;

use qtty::{Quantity, Second};

use crate::geometry::{Polygon, Rect};
use crate::navmesh::{GeometryError, MeshConfig, NavMesh};

/// A point of interest agents may choose to visit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poi {
    pub name: String,
    /// Caller-defined activity category. Not used for planning; carried for
    /// the simulation that animates agents at the POI.
    pub activity_type: u32,
    /// Time spent at the POI once reached.
    pub dwell: Quantity<Second>,
    pub border: Rect,
    /// Relevance per topic, indexed by topic id.
    pub topic_relevance: Vec<f64>,
}

/// Area where agents enter the map.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnPoint {
    /// Relative arrival weight.
    pub weight: f64,
    pub border: Rect,
}

/// Area where agents leave the map.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExitPoint {
    /// Relative departure weight. Exits are drawn uniformly when planning;
    /// the weight is carried for the simulation.
    pub weight: f64,
    pub border: Rect,
}

/// Map description consumed by the mesh builder and the planner.
///
/// Topics are registered by name and receive dense ids in registration
/// order; every POI carries one relevance value per topic.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Environment {
    width: f64,
    height: f64,
    boundary: Polygon,
    obstacles: Vec<Polygon>,
    spawns: Vec<SpawnPoint>,
    exits: Vec<ExitPoint>,
    pois: Vec<Poi>,
    topics: BTreeMap<String, usize>,
    /// Agent width plus a safety margin, used when crossing portals.
    pub agent_path_width: f64,
}

impl Environment {
    pub const DEFAULT_AGENT_PATH_WIDTH: f64 = 3.0;

    /// Creates an empty rectangular map anchored at the origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_boundary(Polygon::new(Rect::new(0.0, 0.0, width, height).to_ccw_ring()))
    }

    /// Creates an empty map with an arbitrary outline.
    pub fn with_boundary(boundary: Polygon) -> Self {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in boundary.points() {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let (width, height) = if boundary.is_empty() {
            (0.0, 0.0)
        } else {
            (max_x - min_x, max_y - min_y)
        };
        Self {
            width,
            height,
            boundary,
            obstacles: Vec::new(),
            spawns: Vec::new(),
            exits: Vec::new(),
            pois: Vec::new(),
            topics: BTreeMap::new(),
            agent_path_width: Self::DEFAULT_AGENT_PATH_WIDTH,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn boundary(&self) -> &Polygon {
        &self.boundary
    }

    pub fn obstacles(&self) -> &[Polygon] {
        &self.obstacles
    }

    pub fn spawns(&self) -> &[SpawnPoint] {
        &self.spawns
    }

    pub fn exits(&self) -> &[ExitPoint] {
        &self.exits
    }

    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    /// Registers a topic, returning its id. Registering an existing name
    /// returns the existing id. Existing POIs get relevance 0 for new topics.
    pub fn add_topic(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(&id) = self.topics.get(&name) {
            return id;
        }
        let id = self.topics.len();
        self.topics.insert(name, id);
        for poi in &mut self.pois {
            poi.topic_relevance.push(0.0);
        }
        id
    }

    pub fn topic_id(&self, name: &str) -> Option<usize> {
        self.topics.get(name).copied()
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Topic names ordered by id.
    pub fn topic_names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, usize)> =
            self.topics.iter().map(|(n, &id)| (n.as_str(), id)).collect();
        names.sort_by_key(|&(_, id)| id);
        names.into_iter().map(|(n, _)| n).collect()
    }

    /// Adds a POI with zero relevance for every topic, returning its index.
    pub fn add_poi(
        &mut self,
        name: impl Into<String>,
        activity_type: u32,
        dwell: Quantity<Second>,
        border: Rect,
    ) -> usize {
        self.pois.push(Poi {
            name: name.into(),
            activity_type,
            dwell,
            border,
            topic_relevance: vec![0.0; self.topics.len()],
        });
        self.pois.len() - 1
    }

    pub fn set_topic_relevance(
        &mut self,
        poi: usize,
        topic: &str,
        relevance: f64,
    ) -> Result<(), EnvironmentError> {
        let topic_id = self
            .topic_id(topic)
            .ok_or_else(|| EnvironmentError::TopicNotFound(topic.to_string()))?;
        let entry = self
            .pois
            .get_mut(poi)
            .ok_or(EnvironmentError::UnknownPoi(poi))?;
        entry.topic_relevance[topic_id] = relevance;
        Ok(())
    }

    /// Replaces a POI's whole relevance vector.
    pub fn set_relevance(&mut self, poi: usize, relevance: Vec<f64>) -> Result<(), EnvironmentError> {
        let expected = self.topics.len();
        let entry = self
            .pois
            .get_mut(poi)
            .ok_or(EnvironmentError::UnknownPoi(poi))?;
        if relevance.len() != expected {
            return Err(EnvironmentError::RelevanceLength {
                poi,
                expected,
                found: relevance.len(),
            });
        }
        entry.topic_relevance = relevance;
        Ok(())
    }

    pub fn add_spawn(&mut self, weight: f64, border: Rect) -> usize {
        self.spawns.push(SpawnPoint { weight, border });
        self.spawns.len() - 1
    }

    pub fn add_exit(&mut self, weight: f64, border: Rect) -> usize {
        self.exits.push(ExitPoint { weight, border });
        self.exits.len() - 1
    }

    pub fn add_obstacle(&mut self, obstacle: Polygon) -> usize {
        self.obstacles.push(obstacle);
        self.obstacles.len() - 1
    }

    /// Builds the navigation mesh of this map.
    pub fn build_navmesh(&self, config: &MeshConfig) -> Result<NavMesh, GeometryError> {
        NavMesh::build(&self.boundary, &self.obstacles, config)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}x{:.1} map: {} obstacles, {} spawns, {} exits, {} POIs, {} topics",
            self.width,
            self.height,
            self.obstacles.len(),
            self.spawns.len(),
            self.exits.len(),
            self.pois.len(),
            self.topics.len()
        )
    }
}
