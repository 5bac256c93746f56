/// Dense directed cost matrix.
///
/// Pairs that were never set cost `f64::INFINITY`; the diagonal is zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSet {
    lengths: Vec<f64>,
    node_count: usize,
}

impl EdgeSet {
    pub fn new(node_count: usize) -> Self {
        let mut lengths = vec![f64::INFINITY; node_count * node_count];
        for i in 0..node_count {
            lengths[i * node_count + i] = 0.0;
        }
        Self {
            lengths,
            node_count,
        }
    }

    /// Fills every off-diagonal entry from `length(from, to)`.
    pub fn from_fn(node_count: usize, length: impl Fn(usize, usize) -> f64) -> Self {
        let mut edges = Self::new(node_count);
        for i in 0..node_count {
            for j in 0..node_count {
                if i != j {
                    edges.set_length(i, j, length(i, j));
                }
            }
        }
        edges
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn length(&self, from: usize, to: usize) -> f64 {
        self.lengths[from * self.node_count + to]
    }

    pub fn set_length(&mut self, from: usize, to: usize, length: f64) {
        self.lengths[from * self.node_count + to] = length;
    }

    pub fn set_symmetric(&mut self, a: usize, b: usize, length: f64) {
        self.set_length(a, b, length);
        self.set_length(b, a, length);
    }

    /// Summed cost of walking `path` in order.
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.length(w[0], w[1])).sum()
    }
}
