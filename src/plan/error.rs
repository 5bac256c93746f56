use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Cannot plan: the map has no spawn points")]
    NoSpawns,

    #[error("Cannot plan: the map has no exit points")]
    NoExits,

    #[error("Spawn weights must be non-negative with a positive sum")]
    InvalidSpawnWeights,

    #[error("Interest vector has {found} entries, expected {expected}")]
    InterestLengthMismatch { expected: usize, found: usize },
}
