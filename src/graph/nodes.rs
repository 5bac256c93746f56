/// Per-node topic relevance table, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSet {
    scores: Vec<f64>,
    node_count: usize,
    score_elements: usize,
}

impl NodeSet {
    /// Creates a table of `node_count` rows of `score_elements` zeros.
    pub fn new(node_count: usize, score_elements: usize) -> Self {
        Self {
            scores: vec![0.0; node_count * score_elements],
            node_count,
            score_elements,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of topics per node.
    pub fn score_elements(&self) -> usize {
        self.score_elements
    }

    pub fn score_element(&self, node: usize, element: usize) -> f64 {
        self.scores[node * self.score_elements + element]
    }

    pub fn set_score(&mut self, node: usize, element: usize, score: f64) {
        self.scores[node * self.score_elements + element] = score;
    }

    /// All topic relevances of `node`.
    pub fn relevance(&self, node: usize) -> &[f64] {
        let start = node * self.score_elements;
        &self.scores[start..start + self.score_elements]
    }

    /// Average relevance over all topics.
    pub fn mean_score(&self, node: usize) -> f64 {
        if self.score_elements == 0 {
            return 0.0;
        }
        self.relevance(node).iter().sum::<f64>() / self.score_elements as f64
    }

    /// Dot product of the node's relevance with an interest vector.
    pub fn projected_score(&self, node: usize, interests: &[f64]) -> f64 {
        self.relevance(node)
            .iter()
            .zip(interests)
            .map(|(r, w)| r * w)
            .sum()
    }
}
