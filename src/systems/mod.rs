//! Interaction systems
//!
//! Small state machines that own one piece of interaction state each and
//! change the graph only through [`GraphStore`](crate::aggregate::GraphStore)
//! operations.

pub mod editing;
pub mod selection;

pub use editing::InlineEditController;
pub use selection::SelectionController;
