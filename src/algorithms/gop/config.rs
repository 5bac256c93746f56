//! Tuning knobs of the GOP planner.

/// Parameters of [`GopPlanner`](super::GopPlanner).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GopConfig {
    /// Candidates sampled per construction step, and the most nodes removed
    /// per perturbation.
    pub par_i: usize,
    /// Perturbations without improvement before a run stops.
    pub par_t: usize,
}

impl GopConfig {
    pub const DEFAULT_PAR_I: usize = 4;
    pub const DEFAULT_PAR_T: usize = 2000;

    pub fn new(par_i: usize, par_t: usize) -> Self {
        Self { par_i, par_t }
    }
}

impl Default for GopConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAR_I, Self::DEFAULT_PAR_T)
    }
}
