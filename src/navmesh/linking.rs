//! Portal creation between adjacent corridors and portal post-processing.

use super::config::{CornerSmoothing, MeshConfig};
use crate::geometry::{Polygon, Portal};

/// Creates a mirrored portal pair for every pair of corridors sharing an edge.
///
/// Returns the number of corridor pairs linked.
pub(crate) fn link_portals(corridors: &mut [Polygon]) -> usize {
    let mut pairs = Vec::new();
    for i in 0..corridors.len() {
        for j in (i + 1)..corridors.len() {
            if let Some((right, left)) = corridors[i].shared_edge(&corridors[j]) {
                pairs.push((i, j, right, left));
            }
        }
    }

    for &(i, j, right, left) in &pairs {
        let (ci, cj) = (corridors[i].centroid(), corridors[j].centroid());
        corridors[i].add_portal(Portal::new(i, ci, j, cj, right, left));
        corridors[j].add_portal(Portal::new(j, cj, i, ci, left, right));
    }
    pairs.len()
}

/// Applies portal smoothing and lanes as requested by `config`.
pub(crate) fn adjust_portals(corridors: &mut [Polygon], config: &MeshConfig) {
    let smooth = config.smoothing == CornerSmoothing::Portal;
    if !smooth && !config.make_lane {
        return;
    }
    for portal in corridors.iter_mut().flat_map(|c| c.portals.iter_mut()) {
        if smooth {
            portal.shrink(config.portal_margin);
        }
        if config.make_lane {
            portal.shift_left_inward(config.lane_shift);
        }
    }
}
