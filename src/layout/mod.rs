//! Graph layout
//!
//! Layered (Sugiyama-style) layout of the mind map along a rank direction.

pub mod hierarchical;

pub use hierarchical::{layout, HierarchicalLayout, LayoutResult, PositionedNode};
