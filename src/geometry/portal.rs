//! Directed adjacency records between neighbouring corridors.

use super::point::{Point, EPSILON};
use super::polygon::CorridorId;

/// The shared edge between two corridors, seen from the `from` side.
///
/// `right` and `left` are named for an observer walking from `from` into
/// `to`. The funnel pass depends on this ordering. Portals always exist in
/// mirrored pairs: the portal `B → A` has the endpoints of `A → B` swapped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Portal {
    pub(crate) from: CorridorId,
    pub(crate) to: CorridorId,
    pub(crate) right: Point,
    pub(crate) left: Point,
    pub(crate) center: Point,
    pub(crate) direction: Point,
    pub(crate) width: f64,
    pub(crate) passable_width: f64,
    pub(crate) rough_distance: f64,
}

impl Portal {
    /// Creates a portal and derives its midpoint, direction, width and the
    /// search cost between the two corridor centroids.
    pub fn new(
        from: CorridorId,
        from_centroid: Point,
        to: CorridorId,
        to_centroid: Point,
        right: Point,
        left: Point,
    ) -> Self {
        let center = Point::midpoint(&right, &left);
        let width = right.distance_to(&left);
        let rough_distance =
            from_centroid.square_distance_to(&center) + to_centroid.square_distance_to(&center);
        Self {
            from,
            to,
            right,
            left,
            center,
            direction: (left - right).normalized(),
            width,
            passable_width: width,
            rough_distance,
        }
    }

    pub fn from(&self) -> CorridorId {
        self.from
    }

    pub fn to(&self) -> CorridorId {
        self.to
    }

    pub fn right(&self) -> Point {
        self.right
    }

    pub fn left(&self) -> Point {
        self.left
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Unit vector pointing from `right` to `left`.
    pub fn direction(&self) -> Point {
        self.direction
    }

    /// Distance between the current endpoints, after smoothing and lanes.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Length of the shared edge itself. Smoothing and lanes only move the
    /// crossing point, so this is what decides whether an agent fits.
    pub fn passable_width(&self) -> f64 {
        self.passable_width
    }

    /// Search-ordering cost of crossing this portal. Not a distance.
    pub fn rough_distance(&self) -> f64 {
        self.rough_distance
    }

    /// Returns true if `other` is the mirrored counterpart of this portal.
    pub fn mirrors(&self, other: &Portal) -> bool {
        self.from == other.to
            && self.to == other.from
            && self.right == other.left
            && self.left == other.right
    }

    /// Pulls both endpoints towards each other by `margin`.
    ///
    /// A portal narrower than `2 * margin` collapses onto its midpoint.
    pub(crate) fn shrink(&mut self, margin: f64) {
        if self.width <= 2.0 * margin {
            self.right = self.center;
            self.left = self.center;
            self.width = 0.0;
            return;
        }
        self.right = self.right + self.direction * margin;
        self.left = self.left - self.direction * margin;
        self.width -= 2.0 * margin;
    }

    /// Moves only the left endpoint towards the right one, so that traffic
    /// crossing in this direction keeps to the right half of the edge.
    pub(crate) fn shift_left_inward(&mut self, lane_shift: f64) {
        if self.width < EPSILON {
            return;
        }
        let shift = if self.width / 2.0 < lane_shift {
            self.width / 3.0
        } else {
            lane_shift
        };
        self.left = self.left - self.direction * shift;
        self.width -= shift;
        self.center = Point::midpoint(&self.right, &self.left);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_portal() -> Portal {
        Portal::new(
            0,
            Point::new(-5.0, 5.0),
            1,
            Point::new(5.0, 5.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
        )
    }

    #[test]
    fn derived_fields() {
        let p = vertical_portal();
        assert_eq!(p.center(), Point::new(0.0, 5.0));
        assert_eq!(p.direction(), Point::new(0.0, 1.0));
        assert!((p.width() - 10.0).abs() < 1e-12);
        assert!((p.rough_distance() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn shrink_keeps_center() {
        let mut p = vertical_portal();
        p.shrink(3.0);
        assert_eq!(p.right(), Point::new(0.0, 3.0));
        assert_eq!(p.left(), Point::new(0.0, 7.0));
        assert!((p.width() - 4.0).abs() < 1e-12);
        assert_eq!(p.center(), Point::new(0.0, 5.0));
    }

    #[test]
    fn shrink_collapses_narrow_portal() {
        let mut p = vertical_portal();
        p.shrink(6.0);
        assert_eq!(p.right(), p.left());
        assert_eq!(p.width(), 0.0);
    }

    #[test]
    fn lane_shift_only_moves_left_endpoint() {
        let mut p = vertical_portal();
        p.shift_left_inward(3.0);
        assert_eq!(p.right(), Point::new(0.0, 0.0));
        assert_eq!(p.left(), Point::new(0.0, 7.0));

        let mut narrow = vertical_portal();
        narrow.shift_left_inward(6.0);
        assert!((narrow.left().y - (10.0 - 10.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn adjustments_keep_passable_width() {
        let mut p = vertical_portal();
        p.shrink(3.0);
        p.shift_left_inward(3.0);
        assert!(p.width() < 4.0);
        assert!((p.passable_width() - 10.0).abs() < 1e-12);
    }
}
