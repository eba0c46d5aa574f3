//! Render view projection
//!
//! The output surface handed to the rendering collaborator after every
//! mutation.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::VisibleGraph;
use crate::aggregate::GraphStore;
use crate::components::{style_for, Edge, StyleDescriptor};
use crate::value_objects::{ConnectionSides, NodeId, Position2D};

/// What a node shows inside its box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeContent {
    /// Plain label text
    Label(String),
    /// A live text input seeded with the current label
    Editor { value: String },
}

/// One node as the renderer should draw it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub position: Position2D,
    pub content: NodeContent,
    pub style: StyleDescriptor,
    pub sides: ConnectionSides,
}

/// Pan and zoom of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Viewport {
    /// Origin at 1x zoom
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderView {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<Edge>,
    pub viewport: Viewport,
}

impl RenderView {
    /// Assemble the view from the visible graph and the interaction state
    pub fn build(
        store: &GraphStore,
        visible: &VisibleGraph,
        selection: Option<NodeId>,
        editing: Option<NodeId>,
        collapsed: &IndexSet<NodeId>,
        viewport: Viewport,
    ) -> Self {
        let nodes = visible
            .nodes
            .iter()
            .filter_map(|id| store.node(*id))
            .map(|node| {
                let content = if editing == Some(node.id) {
                    NodeContent::Editor {
                        value: node.label.clone(),
                    }
                } else {
                    NodeContent::Label(node.label.clone())
                };
                RenderNode {
                    id: node.id,
                    position: node.position,
                    content,
                    style: style_for(node.id, selection, collapsed),
                    sides: node.sides,
                }
            })
            .collect();

        let edges = visible
            .edges
            .iter()
            .filter_map(|id| store.edge(*id))
            .copied()
            .collect();

        Self {
            nodes,
            edges,
            viewport,
        }
    }

    /// Look up a rendered node
    pub fn node(&self, id: NodeId) -> Option<&RenderNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::NodeStyle;
    use crate::config::EditorConfig;
    use crate::projections::VisibilityFilter;

    /// Test Coverage
    ///
    /// ```mermaid
    /// graph TD
    ///     RV[RenderView] --> NC[NodeContent Label / Editor]
    ///     RV --> ST[Style Descriptors]
    ///     RV --> VE[Visible Edges]
    ///     RV --> VP[Viewport Reset]
    /// ```

    #[test]
    fn test_build_marks_editor_and_styles() {
        let mut store = GraphStore::new(&EditorConfig::default().with_seed(5));
        let root = NodeId::new(1);
        let (child, _) = store.create_node(Some(root)).unwrap();
        let collapsed = IndexSet::new();
        let visible = VisibilityFilter::default().compute(&store, &collapsed);

        let view = RenderView::build(
            &store,
            &visible,
            Some(root),
            Some(child.id),
            &collapsed,
            Viewport::default(),
        );

        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.edges.len(), 1);
        assert_eq!(view.node(root).unwrap().style.style, NodeStyle::Selected);
        assert_eq!(view.node(root).unwrap().content, NodeContent::Label("Root".into()));
        assert_eq!(
            view.node(child.id).unwrap().content,
            NodeContent::Editor {
                value: "Node 2".into()
            }
        );
    }

    #[test]
    fn test_viewport_reset() {
        let mut viewport = Viewport {
            x: 120.0,
            y: -40.0,
            zoom: 2.5,
        };
        viewport.reset();
        assert_eq!(viewport, Viewport::default());
        assert_eq!(viewport.zoom, 1.0);
    }
}
