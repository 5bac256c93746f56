//! Axis-aligned rectangles used for map bounds and node footprints.

use std::fmt;

use rand::Rng;

use super::point::Point;

/// Axis-aligned rectangle anchored at its minimum corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pos: Point,
    width: f64,
    height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            width,
            height,
        }
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn center(&self) -> Point {
        Point::new(self.pos.x + self.width / 2.0, self.pos.y + self.height / 2.0)
    }

    /// Corner ring in counter-clockwise order (y axis pointing up).
    pub fn to_ccw_ring(&self) -> Vec<Point> {
        let (x, y, w, h) = (self.pos.x, self.pos.y, self.width, self.height);
        vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ]
    }

    /// Corner ring in clockwise order, the orientation expected for holes.
    pub fn to_cw_ring(&self) -> Vec<Point> {
        let mut ring = self.to_ccw_ring();
        ring.reverse();
        ring
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.pos.x
            && p.x <= self.pos.x + self.width
            && p.y >= self.pos.y
            && p.y <= self.pos.y + self.height
    }

    /// Uniformly distributed point inside the rectangle.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let u: f64 = rng.gen();
        let v: f64 = rng.gen();
        Point::new(self.pos.x + u * self.width, self.pos.y + v * self.height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {:.3}x{:.3}]",
            self.pos, self.width, self.height
        )
    }
}
