//! Mind map domain for the Composable Information Machine
//!
//! An interactive mind map core: a directed graph of labeled nodes with a
//! single selection, inline label editing, shallow or subtree collapse and a
//! deterministic layered layout. Rendering is left to a collaborator that
//! feeds [`InputEvent`]s into [`MindMap::handle`] and draws the resulting
//! [`RenderView`].

pub mod aggregate;
pub mod commands;
pub mod components;
pub mod config;
pub mod events;
pub mod handlers;
pub mod layout;
pub mod projections;
pub mod systems;
pub mod value_objects;

// Re-export main types
pub use aggregate::{GraphStore, MindMap, RemovedNode};
pub use commands::{InputEvent, MindMapError, MindMapResult};
pub use components::{Edge, Node, NodeStyle, StyleDescriptor, VisualState};
pub use config::{CollapsePolicy, ConfigError, EditorConfig, EnterBehavior, LayoutConfig};
pub use events::MindMapEvent;
pub use handlers::{Key, KeyCommand, KeyboardCommandDispatcher};
pub use layout::{HierarchicalLayout, LayoutResult, PositionedNode};
pub use projections::{NodeContent, RenderNode, RenderView, Viewport, VisibilityFilter, VisibleGraph};
pub use systems::{InlineEditController, SelectionController};

// Re-export value objects
pub use value_objects::{
    Color, ConnectionSides, EdgeId, GraphId, LayoutDirection, NodeId, Position2D, Side, Size,
};
