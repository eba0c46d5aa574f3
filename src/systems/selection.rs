//! Selection controller
//!
//! Tracks at most one selected node. `move_up`/`move_down` walk the graph
//! store's storage order (creation order), not the tree. Tree-shaped moves
//! are the separate `move_to_parent`/`move_to_first_child` traversal.

use tracing::debug;

use crate::aggregate::GraphStore;
use crate::commands::{MindMapError, MindMapResult};
use crate::value_objects::NodeId;

/// Holds the single active selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<NodeId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected node, if any
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Select `id`, which must exist
    pub fn select(&mut self, id: NodeId, store: &GraphStore) -> MindMapResult<NodeId> {
        if !store.contains_node(id) {
            return Err(MindMapError::NodeNotFound(id));
        }
        self.selected = Some(id);
        Ok(id)
    }

    /// Drop the selection. Returns what was selected.
    pub fn clear(&mut self) -> Option<NodeId> {
        self.selected.take()
    }

    /// Clear the selection if it points at `id`
    pub fn forget(&mut self, id: NodeId) -> bool {
        if self.selected == Some(id) {
            self.selected = None;
            true
        } else {
            false
        }
    }

    /// Select the previous node in storage order
    pub fn move_up(&mut self, store: &GraphStore) -> MindMapResult<NodeId> {
        let index = self.current_index(store)?;
        let previous = index
            .checked_sub(1)
            .and_then(|i| store.id_at(i))
            .ok_or(MindMapError::AtBoundary)?;
        self.selected = Some(previous);
        Ok(previous)
    }

    /// Select the next node in storage order
    pub fn move_down(&mut self, store: &GraphStore) -> MindMapResult<NodeId> {
        let index = self.current_index(store)?;
        let next = store.id_at(index + 1).ok_or(MindMapError::AtBoundary)?;
        self.selected = Some(next);
        Ok(next)
    }

    /// Select the parent of the selected node
    pub fn move_to_parent(&mut self, store: &GraphStore) -> MindMapResult<NodeId> {
        let current = self.current(store)?;
        let parent = store.parent_of(current).ok_or(MindMapError::AtBoundary)?;
        self.selected = Some(parent);
        Ok(parent)
    }

    /// Select the first child of the selected node
    pub fn move_to_first_child(&mut self, store: &GraphStore) -> MindMapResult<NodeId> {
        let current = self.current(store)?;
        let child = store.first_child_of(current).ok_or(MindMapError::AtBoundary)?;
        self.selected = Some(child);
        Ok(child)
    }

    /// The selection, validated against the store. A stale selection is
    /// cleared and reported as `NodeNotFound`.
    fn current(&mut self, store: &GraphStore) -> MindMapResult<NodeId> {
        let id = self.selected.ok_or(MindMapError::NoSelection)?;
        if store.contains_node(id) {
            Ok(id)
        } else {
            debug!(node_id = %id, "clearing stale selection");
            self.selected = None;
            Err(MindMapError::NodeNotFound(id))
        }
    }

    fn current_index(&mut self, store: &GraphStore) -> MindMapResult<usize> {
        let id = self.current(store)?;
        store.index_of(id).ok_or(MindMapError::NodeNotFound(id))
    }
}
