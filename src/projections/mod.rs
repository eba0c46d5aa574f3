//! Mind map projections
//!
//! Read models derived from the aggregate: the visible subset of the graph
//! and the render view built on top of it.

pub mod render_view;
pub mod visibility;

pub use render_view::{NodeContent, RenderNode, RenderView, Viewport};
pub use visibility::{VisibilityFilter, VisibleGraph};
