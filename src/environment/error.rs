use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("Unknown topic: {0}")]
    TopicNotFound(String),

    #[error("Unknown POI index: {0}")]
    UnknownPoi(usize),

    #[error("POI {poi} has {found} topic relevances, expected {expected}")]
    RelevanceLength {
        poi: usize,
        expected: usize,
        found: usize,
    },

    #[error("Node {node} does not resolve to any corridor")]
    NoCorridor { node: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_not_found_display() {
        let e = EnvironmentError::TopicNotFound("art".to_string());
        assert_eq!(e.to_string(), "Unknown topic: art");
    }

    #[test]
    fn unknown_poi_display() {
        assert_eq!(EnvironmentError::UnknownPoi(4).to_string(), "Unknown POI index: 4");
    }

    #[test]
    fn relevance_length_display() {
        let e = EnvironmentError::RelevanceLength {
            poi: 1,
            expected: 3,
            found: 2,
        };
        assert_eq!(e.to_string(), "POI 1 has 2 topic relevances, expected 3");
    }

    #[test]
    fn no_corridor_display() {
        let e = EnvironmentError::NoCorridor { node: 7 };
        assert!(e.to_string().contains("Node 7"));
    }
}
