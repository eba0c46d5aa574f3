//! Inline label editing
//!
//! At most one node is in edit mode. Every keystroke commits straight into
//! the graph store; leaving edit mode never rolls anything back.

use crate::aggregate::GraphStore;
use crate::commands::{MindMapError, MindMapResult};
use crate::value_objects::NodeId;

/// Tracks the node whose label is being edited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineEditController {
    target: Option<NodeId>,
}

impl InlineEditController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node in edit mode, if any
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Put `id` into edit mode. Returns the node that was being edited
    /// before, which implicitly leaves edit mode.
    pub fn begin_edit(&mut self, id: NodeId, store: &GraphStore) -> MindMapResult<Option<NodeId>> {
        if !store.contains_node(id) {
            return Err(MindMapError::NodeNotFound(id));
        }
        Ok(self.target.replace(id).filter(|previous| *previous != id))
    }

    /// Write the editor's current text into the node's label
    pub fn commit_label(&self, id: NodeId, text: &str, store: &mut GraphStore) -> MindMapResult<()> {
        if self.target != Some(id) {
            return Err(MindMapError::NotEditing);
        }
        store.update_label(id, text)
    }

    /// Leave edit mode. Returns the node that was being edited.
    pub fn end_edit(&mut self) -> MindMapResult<NodeId> {
        self.target.take().ok_or(MindMapError::NotEditing)
    }

    /// Leave edit mode if `id` is the node being edited
    pub fn forget(&mut self, id: NodeId) -> bool {
        if self.target == Some(id) {
            self.target = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    /// Test Coverage
    ///
    /// ```mermaid
    /// graph TD
    ///     IE[InlineEditController] --> B[begin_edit]
    ///     IE --> C[commit_label]
    ///     IE --> E[end_edit]
    ///     B --> SW[Target Switch]
    ///     C --> NE[Not Editing Refusal]
    /// ```

    fn store() -> GraphStore {
        let mut store = GraphStore::new(&EditorConfig::default().with_seed(2));
        store.create_node(Some(NodeId::new(1))).unwrap();
        store
    }

    #[test]
    fn test_edit_cycle() {
        let mut store = store();
        let mut editor = InlineEditController::new();
        let node = NodeId::new(2);

        assert_eq!(editor.begin_edit(node, &store), Ok(None));
        editor.commit_label(node, "He", &mut store).unwrap();
        editor.commit_label(node, "Hello", &mut store).unwrap();
        assert_eq!(store.node(node).unwrap().label, "Hello");

        assert_eq!(editor.end_edit(), Ok(node));
        assert_eq!(editor.target(), None);
        assert_eq!(store.node(node).unwrap().label, "Hello");
    }

    #[test]
    fn test_switching_target_replaces_previous() {
        let store = store();
        let mut editor = InlineEditController::new();

        editor.begin_edit(NodeId::new(1), &store).unwrap();
        assert_eq!(editor.begin_edit(NodeId::new(2), &store), Ok(Some(NodeId::new(1))));
        assert_eq!(editor.target(), Some(NodeId::new(2)));

        // re-entering the same node is not a switch
        assert_eq!(editor.begin_edit(NodeId::new(2), &store), Ok(None));
    }

    #[test]
    fn test_commit_outside_edit_mode_is_refused() {
        let mut store = store();
        let mut editor = InlineEditController::new();

        assert_eq!(
            editor.commit_label(NodeId::new(2), "x", &mut store),
            Err(MindMapError::NotEditing)
        );
        editor.begin_edit(NodeId::new(1), &store).unwrap();
        assert_eq!(
            editor.commit_label(NodeId::new(2), "x", &mut store),
            Err(MindMapError::NotEditing)
        );
        assert_eq!(store.node(NodeId::new(2)).unwrap().label, "Node 2");
    }

    #[test]
    fn test_missing_node_and_double_end() {
        let store = store();
        let mut editor = InlineEditController::new();

        assert!(editor.begin_edit(NodeId::new(7), &store).is_err());
        assert_eq!(editor.end_edit(), Err(MindMapError::NotEditing));
    }
}
