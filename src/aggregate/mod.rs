//! Mind map aggregates

pub mod graph_store;
pub mod mind_map;

pub use graph_store::{GraphStore, RemovedNode};
pub use mind_map::MindMap;
