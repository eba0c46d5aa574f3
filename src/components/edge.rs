//! Edge components

use serde::{Deserialize, Serialize};

use crate::value_objects::{EdgeId, NodeId};

/// A directed connection between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    /// Create a new edge
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { id, source, target }
    }

    /// Whether either endpoint is `node_id`
    pub fn touches(&self, node_id: NodeId) -> bool {
        self.source == node_id || self.target == node_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches() {
        let edge = Edge::new(EdgeId::new(1), NodeId::new(1), NodeId::new(2));
        assert!(edge.touches(NodeId::new(1)));
        assert!(edge.touches(NodeId::new(2)));
        assert!(!edge.touches(NodeId::new(3)));
    }
}
