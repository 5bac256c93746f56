//! Funnel string-pulling over a portal sequence.

use crate::geometry::{cross, Point, Portal};

/// Collapses a portal sequence into the shortest path from `start` to `end`
/// that crosses every portal in order.
///
/// `start` and `end` act as zero-width portals at both ends of the sequence.
/// Whenever a new portal endpoint would cross the opposite side of the
/// funnel, that side's point becomes a path vertex and the scan restarts
/// from it.
pub fn string_pull(start: Point, end: Point, portals: &[&Portal]) -> Vec<Point> {
    let mut gates: Vec<(Point, Point)> = Vec::with_capacity(portals.len() + 2);
    gates.push((start, start));
    gates.extend(portals.iter().map(|p| (p.right(), p.left())));
    gates.push((end, end));

    let mut path = vec![start];
    let (mut apex, mut right, mut left) = (start, start, start);
    let (mut right_index, mut left_index) = (0, 0);

    let mut i = 1;
    while i < gates.len() {
        let (r, l) = gates[i];

        if cross(&apex, &right, &r) >= 0.0 {
            if apex == right || cross(&apex, &left, &r) < 0.0 {
                right = r;
                right_index = i;
            } else {
                path.push(left);
                apex = left;
                right = apex;
                right_index = left_index;
                i = left_index + 1;
                continue;
            }
        }

        if cross(&apex, &left, &l) <= 0.0 {
            if apex == left || cross(&apex, &right, &l) > 0.0 {
                left = l;
                left_index = i;
            } else {
                path.push(right);
                apex = right;
                left = apex;
                left_index = right_index;
                i = right_index + 1;
                continue;
            }
        }

        i += 1;
    }

    if path.last() != Some(&end) {
        path.push(end);
    }
    path
}

/// Summed Euclidean length of a polyline.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}
