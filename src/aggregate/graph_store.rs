//! Graph Store
//!
//! Owns the canonical node and edge collections of a mind map. Nodes are kept
//! in creation order, which doubles as the storage order used by selection
//! navigation and by stack-like removal.

use indexmap::{IndexMap, IndexSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::commands::{MindMapError, MindMapResult};
use crate::components::{Edge, Node, VisualState};
use crate::config::EditorConfig;
use crate::value_objects::{ConnectionSides, EdgeId, NodeId, Position2D, Size};

/// Result of removing a node
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedNode {
    /// The node that was removed
    pub node: Node,
    /// Edges pruned together with it, in storage order
    pub pruned_edges: Vec<EdgeId>,
}

/// Canonical node and edge storage
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// All nodes, in creation order
    nodes: IndexMap<NodeId, Node>,
    /// All edges, in creation order
    edges: IndexMap<EdgeId, Edge>,
    /// Next node id to hand out; only ever grows
    next_node_id: u64,
    /// Next edge id to hand out; only ever grows
    next_edge_id: u64,
    /// Prefix of generated labels
    label_prefix: String,
    /// Extent of randomized spawn positions
    spawn_area: Size,
    rng: StdRng,
}

impl GraphStore {
    /// Create a store seeded with a single root node
    pub fn new(config: &EditorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut store = Self {
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            next_node_id: 1,
            next_edge_id: 1,
            label_prefix: config.label_prefix.clone(),
            spawn_area: config.spawn_area,
            rng,
        };

        let root_id = store.allocate_node_id();
        let position = store.spawn_position();
        store
            .nodes
            .insert(root_id, Node::new(root_id, config.root_label.clone(), position));
        debug!(node_id = %root_id, "seeded root node");

        store
    }

    /// Create a node, optionally as a child of `parent`.
    ///
    /// The new node gets a fresh id, a generated label and a random position
    /// inside the spawn area. When `parent` is given an edge `parent -> node`
    /// is created as well.
    pub fn create_node(&mut self, parent: Option<NodeId>) -> MindMapResult<(Node, Option<Edge>)> {
        if let Some(parent) = parent {
            self.require_node(parent)?;
        }

        let id = self.allocate_node_id();
        let position = self.spawn_position();
        let node = Node::new(id, format!("{} {}", self.label_prefix, id), position);
        self.nodes.insert(id, node.clone());

        let edge = parent.map(|parent| self.insert_edge(parent, id));

        debug!(node_id = %id, parent = ?parent, "node created");
        Ok((node, edge))
    }

    /// Remove the most recently created node that still exists.
    ///
    /// Refused when only one node remains. Every edge touching the removed
    /// node is pruned in the same step.
    pub fn remove_node(&mut self) -> MindMapResult<RemovedNode> {
        if self.nodes.len() <= 1 {
            return Err(MindMapError::LastNodeRemaining);
        }
        let (node_id, node) = self.nodes.pop().ok_or(MindMapError::LastNodeRemaining)?;

        let pruned_edges: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|edge| edge.touches(node_id))
            .map(|edge| edge.id)
            .collect();
        self.edges.retain(|_, edge| !edge.touches(node_id));

        debug!(node_id = %node_id, pruned = pruned_edges.len(), "node removed");
        Ok(RemovedNode { node, pruned_edges })
    }

    /// Connect two existing nodes. Duplicate connections are allowed.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> MindMapResult<Edge> {
        self.require_node(source)?;
        self.require_node(target)?;

        let edge = self.insert_edge(source, target);

        debug!(edge_id = %edge.id, %source, %target, "edge connected");
        Ok(edge)
    }

    /// Replace a node's label
    pub fn update_label(&mut self, id: NodeId, label: impl Into<String>) -> MindMapResult<()> {
        let node = self.node_mut(id)?;
        node.label = label.into();
        Ok(())
    }

    /// Move a node, after a drag or a layout run
    pub fn set_position(&mut self, id: NodeId, position: Position2D) -> MindMapResult<()> {
        let node = self.node_mut(id)?;
        node.position = position;
        Ok(())
    }

    /// Set the sides a node's edges attach to
    pub fn set_connection_sides(&mut self, id: NodeId, sides: ConnectionSides) -> MindMapResult<()> {
        self.node_mut(id)?.sides = sides;
        Ok(())
    }

    /// Mirror the selection and the collapsed set into every node's visual
    /// flags
    pub fn sync_visual_states(&mut self, selected: Option<NodeId>, collapsed: &IndexSet<NodeId>) {
        for node in self.nodes.values_mut() {
            node.visual_state = VisualState {
                selected: selected == Some(node.id),
                collapsed: collapsed.contains(&node.id),
            };
        }
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Check whether a node exists
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes in storage order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All node ids in storage order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// All edges in storage order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Get an edge by id
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Position of a node in storage order
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    /// Node id at a storage position
    pub fn id_at(&self, index: usize) -> Option<NodeId> {
        self.nodes.get_index(index).map(|(id, _)| *id)
    }

    /// Get incoming edges for a node
    pub fn incoming_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(move |edge| edge.target == id)
    }

    /// Get outgoing edges for a node
    pub fn outgoing_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(move |edge| edge.source == id)
    }

    /// Source of the oldest edge pointing at `id`
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.incoming_edges(id).next().map(|edge| edge.source)
    }

    /// Target of the oldest edge leaving `id`
    pub fn first_child_of(&self, id: NodeId) -> Option<NodeId> {
        self.outgoing_edges(id).next().map(|edge| edge.target)
    }

    fn require_node(&self, id: NodeId) -> MindMapResult<()> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(MindMapError::NodeNotFound(id))
        }
    }

    fn node_mut(&mut self, id: NodeId) -> MindMapResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(MindMapError::NodeNotFound(id))
    }

    fn allocate_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId) -> Edge {
        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        let edge = Edge::new(id, source, target);
        self.edges.insert(id, edge);
        edge
    }

    fn spawn_position(&mut self) -> Position2D {
        Position2D::new(
            self.rng.gen::<f64>() * self.spawn_area.width,
            self.rng.gen::<f64>() * self.spawn_area.height,
        )
    }
}
