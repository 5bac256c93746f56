//! Polygon rings and navigation corridors.

use std::fmt;

use super::point::{cross, Point, EPSILON};
use super::portal::Portal;

/// Stable index of a corridor inside its navigation mesh.
pub type CorridorId = usize;

/// Ordered ring of vertices with cached centroid and signed area.
///
/// Inside a [`NavMesh`](crate::navmesh::NavMesh) a polygon is a *corridor*:
/// it is counter-clockwise, convex (or a triangle) and carries the portals to
/// its neighbours. Outside of a mesh the same type describes boundaries and
/// obstacles, whose orientation is normalised by the mesh builder.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub(crate) id: CorridorId,
    points: Vec<Point>,
    pub(crate) portals: Vec<Portal>,
    centroid: Point,
    area: f64,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        let mut polygon = Self {
            id: 0,
            points,
            portals: Vec::new(),
            centroid: Point::default(),
            area: 0.0,
        };
        polygon.calc_centroid();
        polygon
    }

    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&c| Point::from(c)).collect())
    }

    pub fn id(&self) -> CorridorId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Portal leading to the corridor `to`, if the two are adjacent.
    pub fn portal_to(&self, to: CorridorId) -> Option<&Portal> {
        self.portals.iter().find(|p| p.to == to)
    }

    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Signed area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.area
    }

    pub fn area(&self) -> f64 {
        self.area.abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.area > 0.0
    }

    pub fn make_ccw(&mut self) {
        if self.area < 0.0 {
            self.reverse();
        }
    }

    pub fn make_cw(&mut self) {
        if self.area > 0.0 {
            self.reverse();
        }
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
        self.area = -self.area;
    }

    /// Recomputes the area-weighted centroid and the signed area.
    ///
    /// Rings with (near) zero area fall back to the vertex average.
    pub fn calc_centroid(&mut self) {
        self.area = signed_area(&self.points);
        let n = self.points.len();
        if n == 0 {
            self.centroid = Point::default();
            return;
        }

        if self.area.abs() < EPSILON {
            let sum = self
                .points
                .iter()
                .fold(Point::default(), |acc, p| acc + *p);
            self.centroid = sum * (1.0 / n as f64);
            return;
        }

        let (mut cx, mut cy) = (0.0, 0.0);
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let f = a.cross(&b);
            cx += (a.x + b.x) * f;
            cy += (a.y + b.y) * f;
        }
        let k = 1.0 / (6.0 * self.area);
        self.centroid = Point::new(cx * k, cy * k);
    }

    /// Point-in-polygon by ray crossing.
    ///
    /// Points exactly on an edge may be reported on either side.
    pub fn contains(&self, p: &Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.points[i];
            let vj = self.points[j];
            if (vi.y > p.y) != (vj.y > p.y)
                && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Squared distance from `p` to the closest vertex of the ring.
    pub fn nearest_vertex_square_distance(&self, p: &Point) -> f64 {
        self.points
            .iter()
            .map(|v| v.square_distance_to(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Returns true if no interior angle exceeds 180 degrees.
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let sign = if self.area >= 0.0 { 1.0 } else { -1.0 };
        (0..n).all(|i| {
            let prev = self.points[(i + n - 1) % n];
            let cur = self.points[i];
            let next = self.points[(i + 1) % n];
            sign * cross(&prev, &cur, &next) >= -EPSILON
        })
    }

    /// Returns true if the ring has no repeated vertices and no two
    /// non-adjacent edges touch.
    pub fn is_simple(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        for i in 0..n {
            if self.points[i] == self.points[(i + 1) % n] {
                return false;
            }
        }
        for i in 0..n {
            let (a1, a2) = (self.points[i], self.points[(i + 1) % n]);
            for j in (i + 2)..n {
                // first and last edge share vertex 0
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (b1, b2) = (self.points[j], self.points[(j + 1) % n]);
                if segments_intersect(&a1, &a2, &b1, &b2) {
                    return false;
                }
            }
        }
        true
    }

    /// Finds the edge shared with `other`.
    ///
    /// The rings must have exactly two vertices in common and those vertices
    /// must form an edge of `self`. The result is ordered `(right, left)` for
    /// an observer crossing from `self` into `other`, assuming `self` is
    /// counter-clockwise.
    pub fn shared_edge(&self, other: &Polygon) -> Option<(Point, Point)> {
        let n = self.points.len();
        let mut shared = Vec::with_capacity(2);
        for (i, p) in self.points.iter().enumerate() {
            if other.points.iter().any(|q| q == p) {
                shared.push(i);
                if shared.len() > 2 {
                    return None;
                }
            }
        }
        if shared.len() != 2 {
            return None;
        }

        let (i, j) = (shared[0], shared[1]);
        if j == i + 1 {
            Some((self.points[i], self.points[j]))
        } else if i == 0 && j == n - 1 {
            Some((self.points[j], self.points[i]))
        } else {
            None
        }
    }

    pub(crate) fn add_portal(&mut self, portal: Portal) {
        self.portals.push(portal);
    }
}

/// Signed area of a ring (shoelace formula).
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        sum += points[i].cross(&points[(i + 1) % n]);
    }
    sum / 2.0
}

/// Inclusive segment intersection test (touching and collinear overlap count).
pub fn segments_intersect(p1: &Point, p2: &Point, q1: &Point, q2: &Point) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if ((d1 > EPSILON && d2 < -EPSILON) || (d1 < -EPSILON && d2 > EPSILON))
        && ((d3 > EPSILON && d4 < -EPSILON) || (d3 < -EPSILON && d4 > EPSILON))
    {
        return true;
    }

    (d1.abs() <= EPSILON && on_segment(q1, q2, p1))
        || (d2.abs() <= EPSILON && on_segment(q1, q2, p2))
        || (d3.abs() <= EPSILON && on_segment(p1, p2, q1))
        || (d4.abs() <= EPSILON && on_segment(p1, p2, q2))
}

fn on_segment(a: &Point, b: &Point, p: &Point) -> bool {
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [", self.id)?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "]")
    }
}
