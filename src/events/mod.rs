//! Mind map domain events
//!
//! Every state change the reducer applies is reported as one of these.
//! Rejected input produces no event.

use serde::{Deserialize, Serialize};

use crate::value_objects::{EdgeId, LayoutDirection, NodeId, Position2D};

/// Facts emitted by [`MindMap`](crate::aggregate::MindMap)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MindMapEvent {
    /// A node was created, linked to `parent` through `edge_id` when present
    NodeCreated {
        node_id: NodeId,
        parent: Option<NodeId>,
        edge_id: Option<EdgeId>,
    },
    /// The most recently stored node was removed together with its edges
    NodeRemoved {
        node_id: NodeId,
        pruned_edges: Vec<EdgeId>,
    },
    /// An edge was drawn between two existing nodes
    EdgeConnected {
        edge_id: EdgeId,
        source: NodeId,
        target: NodeId,
    },
    /// A node's label changed
    LabelUpdated { node_id: NodeId, label: String },
    /// A node was dragged to a new position
    NodeMoved { node_id: NodeId, position: Position2D },
    /// The selection moved
    SelectionChanged {
        from: Option<NodeId>,
        to: Option<NodeId>,
    },
    /// A node entered or left the collapsed set
    CollapseToggled { node_id: NodeId, collapsed: bool },
    /// A node entered label edit mode
    EditStarted { node_id: NodeId },
    /// A node left label edit mode
    EditEnded { node_id: NodeId },
    /// All nodes were repositioned by the hierarchical layout
    LayoutApplied {
        direction: LayoutDirection,
        node_count: usize,
        reversed_edges: Vec<EdgeId>,
    },
    /// Pan and zoom went back to the origin
    ViewportReset,
}

impl MindMapEvent {
    /// Stable name of the event kind
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::NodeCreated { .. } => "NodeCreated",
            Self::NodeRemoved { .. } => "NodeRemoved",
            Self::EdgeConnected { .. } => "EdgeConnected",
            Self::LabelUpdated { .. } => "LabelUpdated",
            Self::NodeMoved { .. } => "NodeMoved",
            Self::SelectionChanged { .. } => "SelectionChanged",
            Self::CollapseToggled { .. } => "CollapseToggled",
            Self::EditStarted { .. } => "EditStarted",
            Self::EditEnded { .. } => "EditEnded",
            Self::LayoutApplied { .. } => "LayoutApplied",
            Self::ViewportReset => "ViewportReset",
        }
    }

    /// The node the event is about, if it concerns a single node
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::NodeCreated { node_id, .. }
            | Self::NodeRemoved { node_id, .. }
            | Self::LabelUpdated { node_id, .. }
            | Self::NodeMoved { node_id, .. }
            | Self::CollapseToggled { node_id, .. }
            | Self::EditStarted { node_id }
            | Self::EditEnded { node_id } => Some(*node_id),
            Self::SelectionChanged { to, .. } => *to,
            Self::EdgeConnected { .. } | Self::LayoutApplied { .. } | Self::ViewportReset => None,
        }
    }
}
