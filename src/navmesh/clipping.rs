//! Free-space extraction: boundary minus (optionally inflated) obstacles.

use clipper2::{difference, EndType, FillRule, JoinType, Paths, PointScaler};
use tracing::debug;

use super::config::{CornerSmoothing, MeshConfig};
use super::error::GeometryError;
use crate::geometry::{Point, Polygon, EPSILON};

/// A connected piece of free space: one CCW outer ring and its CW holes.
#[derive(Debug, Clone)]
pub(crate) struct Region {
    pub(crate) outer: Polygon,
    pub(crate) holes: Vec<Polygon>,
}

impl Region {
    pub(crate) fn area(&self) -> f64 {
        self.outer.area() - self.holes.iter().map(Polygon::area).sum::<f64>()
    }
}

/// Rejects rings that cannot be clipped or triangulated.
///
/// `ring` is the index reported in errors: 0 for the boundary, `k + 1` for
/// obstacle `k`.
pub(crate) fn validate_ring(ring: usize, polygon: &Polygon) -> Result<(), GeometryError> {
    if polygon.len() < 3 {
        return Err(GeometryError::Degenerate {
            ring,
            reason: format!("{} vertices", polygon.len()),
        });
    }
    if polygon.area() < EPSILON {
        return Err(GeometryError::Degenerate {
            ring,
            reason: "zero area".to_string(),
        });
    }
    if !polygon.is_simple() {
        return Err(GeometryError::SelfIntersecting { ring });
    }
    Ok(())
}

/// Fixed-point grid for clipping: one unit is a millionth of a map unit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Micro;

impl PointScaler for Micro {
    const MULTIPLIER: f64 = 1e6;
}

fn to_coords(points: &[Point]) -> Vec<(f64, f64)> {
    points.iter().map(|&p| p.into()).collect()
}

/// Subtracts the obstacles from the boundary.
///
/// Overlapping obstacles are merged by the non-zero fill of the difference.
/// With [`CornerSmoothing::PolyOffset`] every obstacle is first grown by the
/// obstacle margin using square joins.
pub(crate) fn free_space(
    boundary: &Polygon,
    obstacles: &[Polygon],
    config: &MeshConfig,
) -> Result<Vec<Region>, GeometryError> {
    let inflate =
        config.smoothing == CornerSmoothing::PolyOffset && config.obstacle_margin > 0.0;

    let mut clip: Vec<Vec<(f64, f64)>> = Vec::with_capacity(obstacles.len());
    for obstacle in obstacles {
        let mut ring = obstacle.clone();
        ring.make_ccw();
        if inflate {
            let paths: Paths<Micro> = vec![to_coords(ring.points())].into();
            let grown = paths.inflate(
                config.obstacle_margin,
                JoinType::Square,
                EndType::Polygon,
                2.0,
            );
            let grown: Vec<Vec<(f64, f64)>> = grown.into();
            clip.extend(grown);
        } else {
            clip.push(to_coords(ring.points()));
        }
    }

    let mut outline = boundary.clone();
    outline.make_ccw();
    let subject: Paths<Micro> = vec![to_coords(outline.points())].into();
    let clip: Paths<Micro> = clip.into();

    let result = difference(subject, clip, FillRule::NonZero)
        .map_err(|e| GeometryError::Clipping(format!("{e:?}")))?;
    let rings: Vec<Polygon> = Vec::<Vec<(f64, f64)>>::from(result)
        .into_iter()
        .filter(|path| path.len() >= 3)
        .map(|path| Polygon::from_coords(&path))
        .filter(|p| p.area() >= EPSILON)
        .collect();

    let regions = classify(rings);
    if regions.is_empty() {
        return Err(GeometryError::EmptyFreeSpace);
    }
    debug!(
        regions = regions.len(),
        holes = regions.iter().map(|r| r.holes.len()).sum::<usize>(),
        "free space extracted"
    );
    Ok(regions)
}

/// Groups clipper output into outer rings and holes by nesting depth.
fn classify(rings: Vec<Polygon>) -> Vec<Region> {
    let depth: Vec<usize> = rings
        .iter()
        .enumerate()
        .map(|(i, ring)| {
            let inside = ring.points()[0];
            rings
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && other.contains(&inside))
                .count()
        })
        .collect();

    let mut regions = Vec::new();
    let mut outer_of_ring = vec![None; rings.len()];
    for (i, ring) in rings.iter().enumerate() {
        if depth[i] % 2 == 0 {
            let mut outer = ring.clone();
            outer.make_ccw();
            outer_of_ring[i] = Some(regions.len());
            regions.push(Region {
                outer,
                holes: Vec::new(),
            });
        }
    }

    for (i, ring) in rings.iter().enumerate() {
        if depth[i] % 2 == 0 {
            continue;
        }
        let inside = ring.points()[0];
        let owner = rings
            .iter()
            .enumerate()
            .filter(|&(j, other)| depth[j] % 2 == 0 && other.contains(&inside))
            .min_by(|(_, a), (_, b)| a.area().total_cmp(&b.area()))
            .and_then(|(j, _)| outer_of_ring[j]);
        if let Some(region) = owner {
            let mut hole = ring.clone();
            hole.make_cw();
            regions[region].holes.push(hole);
        }
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Polygon {
        Polygon::new(Rect::new(x, y, w, h).to_ccw_ring())
    }

    #[test]
    fn single_obstacle_becomes_hole() {
        let regions = free_space(
            &rect(0.0, 0.0, 100.0, 100.0),
            &[rect(40.0, 40.0, 20.0, 20.0)],
            &MeshConfig::raw(),
        )
        .unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].holes.len(), 1);
        assert!(regions[0].outer.is_ccw());
        assert!(!regions[0].holes[0].is_ccw());
        assert!((regions[0].area() - 9600.0).abs() < 1e-6);
    }

    #[test]
    fn overlapping_obstacles_are_merged() {
        let regions = free_space(
            &rect(0.0, 0.0, 100.0, 100.0),
            &[rect(20.0, 20.0, 20.0, 20.0), rect(30.0, 30.0, 20.0, 20.0)],
            &MeshConfig::raw(),
        )
        .unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].holes.len(), 1);
        // 400 + 400 - 100 overlap
        assert!((regions[0].area() - (10000.0 - 700.0)).abs() < 1e-6);
    }

    #[test]
    fn clockwise_obstacles_are_accepted() {
        let obstacle = Polygon::new(Rect::new(40.0, 40.0, 20.0, 20.0).to_cw_ring());
        let regions = free_space(
            &rect(0.0, 0.0, 100.0, 100.0),
            &[obstacle],
            &MeshConfig::raw(),
        )
        .unwrap();
        assert!((regions[0].area() - 9600.0).abs() < 1e-6);
    }

    #[test]
    fn inflation_grows_obstacles() {
        let regions = free_space(
            &rect(0.0, 0.0, 100.0, 100.0),
            &[rect(40.0, 40.0, 20.0, 20.0)],
            &MeshConfig::default(),
        )
        .unwrap();
        let hole = 10000.0 - regions[0].area();
        // square joins cut the corners of the 23x23 square
        assert!(hole > 520.0 && hole <= 529.0 + 1e-6, "hole area {hole}");
    }

    #[test]
    fn wall_splits_free_space() {
        let regions = free_space(
            &rect(0.0, 0.0, 100.0, 100.0),
            &[rect(45.0, -10.0, 10.0, 120.0)],
            &MeshConfig::raw(),
        )
        .unwrap();
        assert_eq!(regions.len(), 2);
        assert!(regions.iter().all(|r| r.holes.is_empty()));
    }

    #[test]
    fn covering_obstacle_leaves_nothing() {
        let err = free_space(
            &rect(0.0, 0.0, 10.0, 10.0),
            &[rect(-1.0, -1.0, 12.0, 12.0)],
            &MeshConfig::raw(),
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::EmptyFreeSpace);
    }

    #[test]
    fn off_grid_vertices_survive_clipping() {
        let triangle = Polygon::from_coords(&[
            (30.123, 30.456),
            (60.789, 31.004),
            (45.333, 70.667),
        ]);
        let regions = free_space(
            &rect(0.0, 0.0, 100.0, 100.0),
            &[triangle.clone()],
            &MeshConfig::raw(),
        )
        .unwrap();
        let expected = 10000.0 - triangle.area();
        assert!((regions[0].area() - expected).abs() < 1e-3, "{}", regions[0].area());

        let hole = &regions[0].holes[0];
        for corner in triangle.points() {
            let nearest = hole
                .points()
                .iter()
                .map(|p| p.distance_to(corner))
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 1e-5, "{corner} moved by {nearest}");
        }
    }

    #[test]
    fn validation() {
        let line = Polygon::from_coords(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert!(matches!(
            validate_ring(3, &line),
            Err(GeometryError::Degenerate { ring: 3, .. })
        ));
        let two = Polygon::from_coords(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            validate_ring(0, &two),
            Err(GeometryError::Degenerate { ring: 0, .. })
        ));
        let bow = Polygon::from_coords(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 2.0)]);
        assert_eq!(
            validate_ring(1, &bow),
            Err(GeometryError::SelfIntersecting { ring: 1 })
        );
        assert!(validate_ring(0, &rect(0.0, 0.0, 1.0, 1.0)).is_ok());
    }
}
