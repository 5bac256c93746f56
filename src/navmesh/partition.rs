//! Decomposition of free space into triangles or convex regions.

use std::collections::HashMap;

use super::clipping::Region;
use super::error::GeometryError;
use crate::geometry::{cross, Point, Polygon, EPSILON};

/// Relative tolerance between the free-space area and the summed area of
/// the decomposition.
const AREA_TOLERANCE: f64 = 1e-6;

/// Splits a region into CCW corridors.
///
/// The region is ear-clipped first. Unless `triangulate` is set, the
/// triangles are then merged with the Hertel–Mehlhorn heuristic.
pub(crate) fn decompose(region: &Region, triangulate: bool) -> Result<Vec<Polygon>, GeometryError> {
    let (vertices, triangles) = triangulate_region(region)?;
    let rings = if triangulate {
        triangles
    } else {
        merge_convex(&vertices, triangles)
    };

    Ok(rings
        .into_iter()
        .map(|ring| {
            let mut polygon = Polygon::new(ring.into_iter().map(|i| vertices[i]).collect());
            polygon.make_ccw();
            polygon
        })
        .collect())
}

/// Ear-clips a region, returning its vertex table and CCW index triangles.
///
/// Coincident vertices (a hole touching the outer ring, for instance) share
/// one index so that the merge step sees the shared edge.
fn triangulate_region(region: &Region) -> Result<(Vec<Point>, Vec<Vec<usize>>), GeometryError> {
    let mut vertices: Vec<Point> = region.outer.points().to_vec();
    let mut hole_indices = Vec::with_capacity(region.holes.len());
    for hole in &region.holes {
        hole_indices.push(vertices.len());
        vertices.extend_from_slice(hole.points());
    }

    let coords: Vec<f64> = vertices.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|e| GeometryError::Triangulation(e.to_string()))?;

    let canonical: Vec<usize> = (0..vertices.len())
        .map(|i| (0..i).find(|&j| vertices[j] == vertices[i]).unwrap_or(i))
        .collect();

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    let mut covered = 0.0;
    for tri in indices.chunks_exact(3) {
        let mut t = vec![canonical[tri[0]], canonical[tri[1]], canonical[tri[2]]];
        let doubled = cross(&vertices[t[0]], &vertices[t[1]], &vertices[t[2]]);
        if doubled.abs() < EPSILON {
            continue;
        }
        if doubled < 0.0 {
            t.swap(1, 2);
        }
        covered += doubled.abs() / 2.0;
        triangles.push(t);
    }

    let expected = region.area();
    if triangles.is_empty() || (covered - expected).abs() > AREA_TOLERANCE * expected.max(1.0) {
        return Err(GeometryError::Triangulation(format!(
            "triangles cover {covered:.6} of {expected:.6}"
        )));
    }
    Ok((vertices, triangles))
}

/// Hertel–Mehlhorn: drop shared diagonals while the result stays convex.
fn merge_convex(vertices: &[Point], mut polygons: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    loop {
        let mut owner: HashMap<(usize, usize), usize> = HashMap::new();
        for (pi, ring) in polygons.iter().enumerate() {
            for k in 0..ring.len() {
                owner.insert((ring[k], ring[(k + 1) % ring.len()]), pi);
            }
        }

        let mut merge = None;
        'search: for (pi, ring) in polygons.iter().enumerate() {
            for k in 0..ring.len() {
                let (a, b) = (ring[k], ring[(k + 1) % ring.len()]);
                let Some(&qi) = owner.get(&(b, a)) else {
                    continue;
                };
                if qi == pi {
                    continue;
                }
                if let Some(merged) = try_merge(vertices, ring, &polygons[qi], a, b) {
                    merge = Some((pi, qi, merged));
                    break 'search;
                }
            }
        }

        match merge {
            Some((pi, qi, merged)) => {
                polygons[pi] = merged;
                polygons.swap_remove(qi);
            }
            None => return polygons,
        }
    }
}

/// Joins `p` (holding edge `a → b`) and `q` (holding `b → a`) if the angles
/// at `a` and `b` stay strictly convex.
fn try_merge(vertices: &[Point], p: &[usize], q: &[usize], a: usize, b: usize) -> Option<Vec<usize>> {
    let p_start = p.iter().position(|&v| v == b)?;
    let q_start = q.iter().position(|&v| v == a)?;
    // [b, .., a] and [a, .., b]
    let p_rot: Vec<usize> = (0..p.len()).map(|k| p[(p_start + k) % p.len()]).collect();
    let q_rot: Vec<usize> = (0..q.len()).map(|k| q[(q_start + k) % q.len()]).collect();

    let at_a = cross(
        &vertices[p_rot[p_rot.len() - 2]],
        &vertices[a],
        &vertices[q_rot[1]],
    );
    let at_b = cross(
        &vertices[q_rot[q_rot.len() - 2]],
        &vertices[b],
        &vertices[p_rot[1]],
    );
    if at_a <= EPSILON || at_b <= EPSILON {
        return None;
    }

    let mut merged = p_rot;
    merged.extend_from_slice(&q_rot[1..q_rot.len() - 1]);
    Some(merged)
}
