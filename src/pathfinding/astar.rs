//! A* over the corridor adjacency graph.

use tracing::trace;

use crate::geometry::{CorridorId, Polygon, Portal, PriorityQueue, EPSILON};

/// Predecessor marker for corridors not reached by the search.
pub const NO_PREDECESSOR: usize = usize::MAX;

/// Per-corridor search record.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g: f64,
    f: f64,
    closed: bool,
    /// Corridor the search arrived from.
    from: usize,
    /// Index of the crossed portal in the `from` corridor's portal list.
    via: usize,
}

impl Default for SearchNode {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            f: f64::INFINITY,
            closed: false,
            from: NO_PREDECESSOR,
            via: 0,
        }
    }
}

/// Finds the sequence of portals leading from `start` to `goal`.
///
/// Costs accumulate [`Portal::rough_distance`]; the priority adds the squared
/// centroid distance to the goal. Neither is a true path length, so the
/// route is not guaranteed to be the geometrically shortest one. Portals
/// whose shared edge is narrower than `agent_width` are skipped.
///
/// # Returns
///
/// The crossed portals in walking order (empty when `start == goal`), or
/// `None` if the goal cannot be reached or an id is out of range.
pub fn corridor_route(
    corridors: &[Polygon],
    start: CorridorId,
    goal: CorridorId,
    agent_width: f64,
) -> Option<Vec<&Portal>> {
    if start >= corridors.len() || goal >= corridors.len() {
        return None;
    }
    if start == goal {
        return Some(Vec::new());
    }

    let target = corridors[goal].centroid();
    let heuristic = |c: CorridorId| corridors[c].centroid().square_distance_to(&target);

    let mut nodes = vec![SearchNode::default(); corridors.len()];
    let mut open = PriorityQueue::new();
    nodes[start].g = 0.0;
    nodes[start].f = heuristic(start);
    open.push(nodes[start].f, start);

    while let Some((_, current)) = open.pop() {
        if current == goal {
            return Some(reconstruct(corridors, &nodes, goal));
        }
        nodes[current].closed = true;

        for (via, portal) in corridors[current].portals().iter().enumerate() {
            if portal.passable_width() + EPSILON < agent_width {
                continue;
            }
            let next = portal.to();
            if nodes[next].closed {
                continue;
            }
            let g = nodes[current].g + portal.rough_distance();
            if g >= nodes[next].g {
                continue;
            }

            let f = g + heuristic(next);
            if nodes[next].g.is_finite() {
                open.update(nodes[next].f, f, next);
            } else {
                open.push(f, next);
            }
            nodes[next] = SearchNode {
                g,
                f,
                closed: false,
                from: current,
                via,
            };
        }
    }

    trace!(start, goal, "open set exhausted");
    None
}

fn reconstruct<'a>(corridors: &'a [Polygon], nodes: &[SearchNode], goal: CorridorId) -> Vec<&'a Portal> {
    let mut portals = Vec::new();
    let mut current = goal;
    while nodes[current].from != NO_PREDECESSOR {
        let node = nodes[current];
        portals.push(&corridors[node.from].portals()[node.via]);
        current = node.from;
    }
    portals.reverse();
    portals
}
