//! Node components

use serde::{Deserialize, Serialize};

use crate::value_objects::{ConnectionSides, NodeId, Position2D};

/// Visual flags mirrored from the selection and the collapsed set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualState {
    pub selected: bool,
    pub collapsed: bool,
}

/// A labeled, positioned vertex of the mind map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier, never reused within a session
    pub id: NodeId,
    /// Text shown inside the node
    pub label: String,
    /// Top-left corner of the node's bounding box
    pub position: Position2D,
    /// Selection / collapse flags for rendering
    pub visual_state: VisualState,
    /// Sides incoming and outgoing edges attach to
    pub sides: ConnectionSides,
}

impl Node {
    /// Create a node with default visual state and top-to-bottom connection sides
    pub fn new(id: NodeId, label: impl Into<String>, position: Position2D) -> Self {
        Self {
            id,
            label: label.into(),
            position,
            visual_state: VisualState::default(),
            sides: ConnectionSides::default(),
        }
    }
}
