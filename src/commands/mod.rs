//! Mind map commands
//!
//! Input events represent intent coming from the rendering surface. They are
//! processed by the [`MindMap`](crate::aggregate::MindMap) reducer, which
//! validates preconditions and emits the corresponding events.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::handlers::Key;
use crate::value_objects::{LayoutDirection, NodeId, Position2D};

/// Raw input forwarded by the rendering collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A key was pressed on the canvas (or in the active label editor)
    KeyPressed(Key),

    /// Single click on a node: toggles its collapse state and selects it
    NodeClicked(NodeId),

    /// Double click on a node: enters label edit mode
    NodeDoubleClicked(NodeId),

    /// Click on empty canvas
    PaneClicked,

    /// A drag finished and the node settled at `position`
    NodeDragged {
        /// The dragged node
        node_id: NodeId,
        /// Final top-left position
        position: Position2D,
    },

    /// The user drew a connection between two nodes
    Connect {
        /// Node the edge leaves from
        source: NodeId,
        /// Node the edge points to
        target: NodeId,
    },

    /// The label editor's text changed
    EditInput {
        /// Node whose editor changed
        node_id: NodeId,
        /// Full current text of the editor
        text: String,
    },

    /// The label editor lost focus
    EditBlurred,

    /// "Remove last node" button
    RemoveLastNode,

    /// "Layout" buttons
    Layout(LayoutDirection),

    /// "Fit view" button
    FitView,
}

/// Result type for mind map operations
pub type MindMapResult<T> = Result<T, MindMapError>;

/// Precondition failures. The reducer turns every one of them into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MindMapError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
    /// Removal would leave the graph empty
    #[error("Cannot remove the last remaining node")]
    LastNodeRemaining,
    /// A keyboard command arrived with nothing selected
    #[error("No node is selected")]
    NoSelection,
    /// Navigation past the first or last node
    #[error("Selection is already at the boundary")]
    AtBoundary,
    /// An edit operation arrived outside edit mode
    #[error("No node is being edited")]
    NotEditing,
}
