//! Components of the mind map domain
//!
//! This module contains the data carried by nodes and edges and the visual
//! descriptors derived from them. Components hold state only; behavior lives
//! in the aggregate, systems and handlers.

pub mod edge;
pub mod node;
pub mod visual;

// Re-export commonly used types
pub use edge::Edge;
pub use node::{Node, VisualState};
pub use visual::{style_for, NodeStyle, StyleDescriptor};

// Type aliases for common types
pub use crate::value_objects::{EdgeId, NodeId};
