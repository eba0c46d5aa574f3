//! Visibility projection
//!
//! Derives which nodes and edges are rendered from the graph and the set of
//! collapsed nodes.

use std::collections::VecDeque;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::aggregate::GraphStore;
use crate::config::CollapsePolicy;
use crate::value_objects::{EdgeId, NodeId};

/// The rendered subset of the graph, in storage order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleGraph {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
    pub hidden: IndexSet<NodeId>,
}

impl VisibleGraph {
    /// Whether `id` is rendered
    pub fn is_visible(&self, id: NodeId) -> bool {
        !self.hidden.contains(&id) && self.nodes.contains(&id)
    }
}

/// Pure derivation of the visible graph
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityFilter {
    policy: CollapsePolicy,
}

impl VisibilityFilter {
    pub fn new(policy: CollapsePolicy) -> Self {
        Self { policy }
    }

    /// Compute the visible nodes and edges.
    ///
    /// Under [`CollapsePolicy::Shallow`] a node is hidden iff some collapsed
    /// node has a direct edge to it. Under [`CollapsePolicy::Subtree`] hiding
    /// also follows outgoing edges of hidden nodes, but never reaches a
    /// collapsed node, so every collapsed node stays clickable even inside a
    /// cycle. An edge is visible iff both endpoints are.
    pub fn compute(&self, store: &GraphStore, collapsed: &IndexSet<NodeId>) -> VisibleGraph {
        let hidden = match self.policy {
            CollapsePolicy::Shallow => direct_children(store, collapsed),
            CollapsePolicy::Subtree => descendants(store, collapsed),
        };

        let nodes: Vec<NodeId> = store.node_ids().filter(|id| !hidden.contains(id)).collect();
        let edges = store
            .edges()
            .filter(|edge| !hidden.contains(&edge.source) && !hidden.contains(&edge.target))
            .map(|edge| edge.id)
            .collect();

        VisibleGraph {
            nodes,
            edges,
            hidden,
        }
    }
}

fn direct_children(store: &GraphStore, collapsed: &IndexSet<NodeId>) -> IndexSet<NodeId> {
    store
        .edges()
        .filter(|edge| collapsed.contains(&edge.source))
        .map(|edge| edge.target)
        .collect()
}

/// Everything reachable from a collapsed node, collapsed nodes excluded.
/// A collapsed node inside the subtree hides its own part of it.
fn descendants(store: &GraphStore, collapsed: &IndexSet<NodeId>) -> IndexSet<NodeId> {
    let mut hidden: IndexSet<NodeId> = direct_children(store, collapsed)
        .into_iter()
        .filter(|id| !collapsed.contains(id))
        .collect();
    let mut queue: VecDeque<NodeId> = hidden.iter().copied().collect();

    while let Some(node_id) = queue.pop_front() {
        for edge in store.outgoing_edges(node_id) {
            if !collapsed.contains(&edge.target) && hidden.insert(edge.target) {
                queue.push_back(edge.target);
            }
        }
    }

    hidden
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    /// Test Coverage
    ///
    /// ```mermaid
    /// graph TD
    ///     VF[VisibilityFilter] --> SH[Shallow Policy]
    ///     VF --> ST[Subtree Policy]
    ///     SH --> HN[Hidden Nodes]
    ///     SH --> VE[Visible Edges]
    /// ```

    /// Chain 1 -> 2 -> 3
    fn chain() -> GraphStore {
        let mut store = GraphStore::new(&EditorConfig::default().with_seed(3));
        store.create_node(Some(NodeId::new(1))).unwrap();
        store.create_node(Some(NodeId::new(2))).unwrap();
        store
    }

    fn ids(raw: &[u64]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::new).collect()
    }

    #[test]
    fn test_nothing_collapsed_everything_visible() {
        let store = chain();
        let visible = VisibilityFilter::default().compute(&store, &IndexSet::new());

        assert_eq!(visible.nodes, ids(&[1, 2, 3]));
        assert_eq!(visible.edges.len(), 2);
        assert!(visible.hidden.is_empty());
    }

    #[test]
    fn test_shallow_collapse_hides_direct_children_only() {
        let store = chain();
        let collapsed: IndexSet<NodeId> = [NodeId::new(1)].into_iter().collect();
        let visible = VisibilityFilter::new(CollapsePolicy::Shallow).compute(&store, &collapsed);

        assert_eq!(visible.nodes, ids(&[1, 3]));
        assert!(visible.edges.is_empty());
        assert!(visible.is_visible(NodeId::new(3)));
        assert!(!visible.is_visible(NodeId::new(2)));
    }

    #[test]
    fn test_subtree_collapse_hides_descendants() {
        let store = chain();
        let collapsed: IndexSet<NodeId> = [NodeId::new(1)].into_iter().collect();
        let visible = VisibilityFilter::new(CollapsePolicy::Subtree).compute(&store, &collapsed);

        assert_eq!(visible.nodes, ids(&[1]));
        assert!(visible.edges.is_empty());
    }

    #[test]
    fn test_subtree_collapse_survives_cycles() {
        let mut store = chain();
        store.connect(NodeId::new(3), NodeId::new(1)).unwrap();
        let collapsed: IndexSet<NodeId> = [NodeId::new(2)].into_iter().collect();
        let visible = VisibilityFilter::new(CollapsePolicy::Subtree).compute(&store, &collapsed);

        // 3 is hidden, and through the back edge so is 1, but never 2 itself
        assert_eq!(visible.nodes, ids(&[2]));
        assert!(visible.is_visible(NodeId::new(2)));
        assert!(visible.edges.is_empty());
    }

    #[test]
    fn test_subtree_collapse_keeps_nested_collapsed_node() {
        let mut store = chain();
        store.create_node(Some(NodeId::new(3))).unwrap();
        let collapsed: IndexSet<NodeId> = [NodeId::new(1), NodeId::new(3)].into_iter().collect();
        let visible = VisibilityFilter::new(CollapsePolicy::Subtree).compute(&store, &collapsed);

        // 2 is under 1; 3 stays as the handle of its own collapsed subtree
        assert_eq!(visible.nodes, ids(&[1, 3]));
        assert!(!visible.is_visible(NodeId::new(4)));
    }

    #[test]
    fn test_subtree_collapse_mutual_cycle_keeps_both() {
        let mut store = chain();
        store.connect(NodeId::new(3), NodeId::new(1)).unwrap();
        let collapsed: IndexSet<NodeId> = [NodeId::new(1), NodeId::new(2)].into_iter().collect();
        let visible = VisibilityFilter::new(CollapsePolicy::Subtree).compute(&store, &collapsed);

        assert_eq!(visible.nodes, ids(&[1, 2]));
        assert_eq!(visible.edges.len(), 1);
    }

    #[test]
    fn test_collapsed_leaf_changes_nothing() {
        let store = chain();
        let collapsed: IndexSet<NodeId> = [NodeId::new(3)].into_iter().collect();
        let visible = VisibilityFilter::default().compute(&store, &collapsed);

        assert_eq!(visible.nodes, ids(&[1, 2, 3]));
        assert_eq!(visible.edges.len(), 2);
    }
}
