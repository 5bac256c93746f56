//! Point-to-point paths across a corridor decomposition.

pub mod astar;
pub mod funnel;


pub use astar::{corridor_route, NO_PREDECESSOR};
pub use funnel::{path_length, string_pull};

use crate::geometry::{CorridorId, Point, Polygon};

/// Shortest taut path from `start` to `end` along the corridor route chosen
/// by [`corridor_route`].
///
/// Points sharing a corridor are joined directly.
///
/// # Arguments
///
/// * `corridors` - Corridors indexed by their id, portals linked
/// * `start`, `start_corridor` - Start point and the corridor containing it
/// * `end`, `end_corridor` - End point and the corridor containing it
/// * `agent_width` - Portals narrower than this are not crossed
///
/// # Returns
///
/// The path including both endpoints, or `None` when the corridors are not
/// connected.
pub fn find_path(
    corridors: &[Polygon],
    start: Point,
    start_corridor: CorridorId,
    end: Point,
    end_corridor: CorridorId,
    agent_width: f64,
) -> Option<Vec<Point>> {
    if start_corridor == end_corridor {
        return Some(vec![start, end]);
    }
    let portals = corridor_route(corridors, start_corridor, end_corridor, agent_width)?;
    Some(string_pull(start, end, &portals))
}
