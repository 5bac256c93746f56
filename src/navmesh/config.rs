//! Build options for the navigation mesh.

/// How corridors keep agents away from obstacle corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CornerSmoothing {
    /// Corridors follow the raw obstacle outlines.
    None,
    /// Obstacles are inflated by [`MeshConfig::obstacle_margin`] before the
    /// free space is decomposed.
    #[default]
    PolyOffset,
    /// Portal endpoints are pulled inwards by [`MeshConfig::portal_margin`].
    Portal,
}

/// Configuration for [`NavMesh::build`](super::NavMesh::build).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshConfig {
    /// Keep the raw triangulation instead of merging it into convex regions.
    pub triangulate: bool,
    pub smoothing: CornerSmoothing,
    /// Offset each directed portal so opposite flows use different halves.
    pub make_lane: bool,
    /// Outward offset applied to obstacles with [`CornerSmoothing::PolyOffset`].
    pub obstacle_margin: f64,
    /// Inward shift of portal endpoints with [`CornerSmoothing::Portal`].
    pub portal_margin: f64,
    /// Shift of the left portal endpoint when building lanes.
    pub lane_shift: f64,
}

impl MeshConfig {
    pub const DEFAULT_OBSTACLE_MARGIN: f64 = 1.5;
    pub const DEFAULT_PORTAL_MARGIN: f64 = 3.0;
    pub const DEFAULT_LANE_SHIFT: f64 = 3.0;

    /// Plain convex decomposition: no clearance, no lanes.
    pub fn raw() -> Self {
        Self {
            smoothing: CornerSmoothing::None,
            make_lane: false,
            ..Self::default()
        }
    }

    pub fn with_triangulation(mut self, triangulate: bool) -> Self {
        self.triangulate = triangulate;
        self
    }

    pub fn with_smoothing(mut self, smoothing: CornerSmoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_lanes(mut self, make_lane: bool) -> Self {
        self.make_lane = make_lane;
        self
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            triangulate: false,
            smoothing: CornerSmoothing::default(),
            make_lane: true,
            obstacle_margin: Self::DEFAULT_OBSTACLE_MARGIN,
            portal_margin: Self::DEFAULT_PORTAL_MARGIN,
            lane_shift: Self::DEFAULT_LANE_SHIFT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = MeshConfig::default();
        assert!(!c.triangulate);
        assert!(c.make_lane);
        assert_eq!(c.smoothing, CornerSmoothing::PolyOffset);
        assert_eq!(c.obstacle_margin, 1.5);
        assert_eq!(c.portal_margin, 3.0);
        assert_eq!(c.lane_shift, 3.0);
    }

    #[test]
    fn raw_disables_clearance_and_lanes() {
        let c = MeshConfig::raw().with_triangulation(true);
        assert!(c.triangulate);
        assert!(!c.make_lane);
        assert_eq!(c.smoothing, CornerSmoothing::None);
    }
}
