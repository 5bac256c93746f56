//! Navigation mesh: free space split into convex corridors linked by portals.

mod clipping;
mod config;
mod error;
mod linking;
mod partition;


pub use config::{CornerSmoothing, MeshConfig};
pub use error::GeometryError;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, info, warn};

use crate::geometry::{CorridorId, Point, Polygon};
use crate::pathfinding;

/// Convex (or triangular) decomposition of the walkable area.
///
/// # Invariants
///
/// - Corridor ids are the indices into [`corridors`](Self::corridors) and
///   never change after the mesh is built
/// - Every corridor is counter-clockwise
/// - Every portal `A → B` has a counterpart `B → A`; without lanes its
///   endpoints are exactly swapped
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavMesh {
    corridors: Vec<Polygon>,
    config: MeshConfig,
}

impl NavMesh {
    /// Builds the mesh for a map `boundary` with `obstacles` cut out.
    ///
    /// # Errors
    ///
    /// Fails if any ring is degenerate or self-intersecting, if clipping or
    /// triangulation fails, or if the obstacles cover the whole map.
    pub fn build(
        boundary: &Polygon,
        obstacles: &[Polygon],
        config: &MeshConfig,
    ) -> Result<Self, GeometryError> {
        clipping::validate_ring(0, boundary)?;
        for (k, obstacle) in obstacles.iter().enumerate() {
            clipping::validate_ring(k + 1, obstacle)?;
        }

        let regions = clipping::free_space(boundary, obstacles, config)?;
        let mut corridors = Vec::new();
        for region in &regions {
            corridors.extend(partition::decompose(region, config.triangulate)?);
        }
        Ok(Self::assemble(corridors, config))
    }

    /// Builds a mesh from an existing decomposition.
    ///
    /// Each ring becomes one corridor, in order. Rings are reoriented to
    /// counter-clockwise; neighbours must share whole edges.
    pub fn from_regions(regions: Vec<Vec<Point>>, config: &MeshConfig) -> Result<Self, GeometryError> {
        let mut corridors = Vec::with_capacity(regions.len());
        for (ring, points) in regions.into_iter().enumerate() {
            let mut polygon = Polygon::new(points);
            clipping::validate_ring(ring, &polygon)?;
            polygon.make_ccw();
            corridors.push(polygon);
        }
        Ok(Self::assemble(corridors, config))
    }

    fn assemble(mut corridors: Vec<Polygon>, config: &MeshConfig) -> Self {
        for (id, corridor) in corridors.iter_mut().enumerate() {
            corridor.id = id;
        }
        let links = linking::link_portals(&mut corridors);
        linking::adjust_portals(&mut corridors, config);

        let mesh = Self {
            corridors,
            config: config.clone(),
        };
        let components = mesh.component_count();
        info!(
            corridors = mesh.corridors.len(),
            portals = links * 2,
            "navigation mesh built"
        );
        if components > 1 {
            warn!(components, "navigation mesh is not connected");
        }
        mesh
    }

    pub fn corridors(&self) -> &[Polygon] {
        &self.corridors
    }

    pub fn corridor(&self, id: CorridorId) -> Option<&Polygon> {
        self.corridors.get(id)
    }

    pub fn len(&self) -> usize {
        self.corridors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corridors.is_empty()
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Number of directed portals.
    pub fn portal_count(&self) -> usize {
        self.corridors.iter().map(|c| c.portals().len()).sum()
    }

    /// Total walkable area.
    pub fn area(&self) -> f64 {
        self.corridors.iter().map(Polygon::area).sum()
    }

    /// Corridor containing `point`.
    ///
    /// Points outside every corridor (on a shared edge after rounding, or
    /// off the mesh) resolve to the corridor owning the closest vertex. This
    /// ignores edges and is only an approximation of the nearest corridor.
    /// Returns `None` only for an empty mesh.
    pub fn find_corridor(&self, point: &Point) -> Option<CorridorId> {
        if let Some(corridor) = self.corridors.iter().find(|c| c.contains(point)) {
            return Some(corridor.id());
        }

        let nearest = self
            .corridors
            .iter()
            .map(|c| (c.id(), c.nearest_vertex_square_distance(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);
        if let Some(id) = nearest {
            debug!(%point, corridor = id, "point outside mesh, using nearest vertex");
        }
        nearest
    }

    /// Walkable path between two points whose corridors are known.
    ///
    /// See [`pathfinding::find_path`].
    pub fn get_path(
        &self,
        start: Point,
        start_corridor: CorridorId,
        end: Point,
        end_corridor: CorridorId,
        agent_width: f64,
    ) -> Option<Vec<Point>> {
        pathfinding::find_path(
            &self.corridors,
            start,
            start_corridor,
            end,
            end_corridor,
            agent_width,
        )
    }

    /// Length of [`get_path`](Self::get_path), or `None` if unreachable.
    pub fn get_distance(
        &self,
        start: Point,
        start_corridor: CorridorId,
        end: Point,
        end_corridor: CorridorId,
        agent_width: f64,
    ) -> Option<f64> {
        self.get_path(start, start_corridor, end, end_corridor, agent_width)
            .map(|path| pathfinding::path_length(&path))
    }

    /// Walkable path between two arbitrary points, resolving their corridors
    /// with [`find_corridor`](Self::find_corridor).
    pub fn route(&self, start: Point, end: Point, agent_width: f64) -> Option<Vec<Point>> {
        let from = self.find_corridor(&start)?;
        let to = self.find_corridor(&end)?;
        self.get_path(start, from, end, to, agent_width)
    }

    /// Corridor adjacency with one node per corridor (node index equals
    /// corridor id) and one edge per portal pair, weighted by portal width.
    pub fn adjacency_graph(&self) -> UnGraph<CorridorId, f64> {
        let mut graph = UnGraph::with_capacity(self.corridors.len(), self.portal_count() / 2);
        for corridor in &self.corridors {
            graph.add_node(corridor.id());
        }
        for portal in self.corridors.iter().flat_map(|c| c.portals()) {
            if portal.from() < portal.to() {
                graph.add_edge(
                    NodeIndex::new(portal.from()),
                    NodeIndex::new(portal.to()),
                    portal.width(),
                );
            }
        }
        graph
    }

    /// Number of connected pieces of the mesh.
    pub fn component_count(&self) -> usize {
        connected_components(&self.adjacency_graph())
    }
}
