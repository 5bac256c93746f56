use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Degenerate ring #{ring}: {reason}")]
    Degenerate { ring: usize, reason: String },

    #[error("Ring #{ring} is self-intersecting")]
    SelfIntersecting { ring: usize },

    #[error("Polygon clipping failed: {0}")]
    Clipping(String),

    #[error("Triangulation failed: {0}")]
    Triangulation(String),

    #[error("Obstacles leave no free space inside the boundary")]
    EmptyFreeSpace,
}
