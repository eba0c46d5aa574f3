//! Mind map aggregate
//!
//! Owns the graph store together with the interaction state layered on top
//! of it: selection, collapsed set, edit target and viewport. All input goes
//! through [`MindMap::handle`], which runs to completion and leaves the
//! derived visible graph and every node's visual flags up to date.
//!
//! Refused input is logged at debug level and leaves state unchanged. The
//! only exception is a stale selection, which is cleared when detected.

use indexmap::IndexSet;
use tracing::{debug, debug_span, trace};

use crate::commands::{InputEvent, MindMapError, MindMapResult};
use crate::components::Edge;
use crate::config::EditorConfig;
use crate::events::MindMapEvent;
use crate::handlers::{Key, KeyCommand, KeyboardCommandDispatcher};
use crate::layout::HierarchicalLayout;
use crate::projections::{RenderView, Viewport, VisibilityFilter, VisibleGraph};
use crate::systems::{InlineEditController, SelectionController};
use crate::value_objects::{GraphId, LayoutDirection, NodeId};

use super::GraphStore;

/// The mind map editor state
#[derive(Debug, Clone)]
pub struct MindMap {
    id: GraphId,
    config: EditorConfig,
    store: GraphStore,
    collapsed: IndexSet<NodeId>,
    selection: SelectionController,
    editor: InlineEditController,
    dispatcher: KeyboardCommandDispatcher,
    filter: VisibilityFilter,
    layout: HierarchicalLayout,
    viewport: Viewport,
    /// Derived from `store` and `collapsed` after every input
    visible: VisibleGraph,
}

impl MindMap {
    /// A map holding only the root node, with nothing selected
    pub fn new(config: EditorConfig) -> Self {
        let store = GraphStore::new(&config);
        let mut map = Self {
            id: GraphId::new(),
            dispatcher: KeyboardCommandDispatcher::new(config.enter_behavior),
            filter: VisibilityFilter::new(config.collapse_policy),
            layout: HierarchicalLayout::new(config.layout.clone()),
            config,
            store,
            collapsed: IndexSet::new(),
            selection: SelectionController::new(),
            editor: InlineEditController::new(),
            viewport: Viewport::default(),
            visible: VisibleGraph::default(),
        };
        map.refresh();
        map
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selection.selected()
    }

    pub fn edit_target(&self) -> Option<NodeId> {
        self.editor.target()
    }

    pub fn collapsed(&self) -> &IndexSet<NodeId> {
        &self.collapsed
    }

    pub fn visible(&self) -> &VisibleGraph {
        &self.visible
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The frame to hand to the renderer
    pub fn view(&self) -> RenderView {
        RenderView::build(
            &self.store,
            &self.visible,
            self.selection.selected(),
            self.editor.target(),
            &self.collapsed,
            self.viewport,
        )
    }

    /// Apply one input and return the events it produced
    pub fn handle(&mut self, input: InputEvent) -> Vec<MindMapEvent> {
        let span = debug_span!("mind_map", graph_id = %self.id);
        let _entered = span.enter();

        let selected_before = self.selection.selected();
        let editing_before = self.editor.target();
        let mut events = Vec::new();

        if let Err(error) = self.apply(input, &mut events) {
            debug!(%error, "input ignored");
        }

        let selected_after = self.selection.selected();
        if selected_after != selected_before {
            events.push(MindMapEvent::SelectionChanged {
                from: selected_before,
                to: selected_after,
            });
        }

        let editing_after = self.editor.target();
        if editing_after != editing_before {
            if let Some(node_id) = editing_before {
                events.push(MindMapEvent::EditEnded { node_id });
            }
            if let Some(node_id) = editing_after {
                events.push(MindMapEvent::EditStarted { node_id });
            }
        }

        self.refresh();
        for event in &events {
            trace!(event = event.event_type(), node_id = ?event.node_id(), "event emitted");
        }
        events
    }

    /// Owned form of [`handle`](Self::handle): consume the current state and
    /// return the next one
    pub fn reduce(mut self, input: InputEvent) -> (Self, Vec<MindMapEvent>) {
        let events = self.handle(input);
        (self, events)
    }

    /// Apply a whole input sequence in order
    pub fn replay(self, inputs: impl IntoIterator<Item = InputEvent>) -> (Self, Vec<MindMapEvent>) {
        inputs
            .into_iter()
            .fold((self, Vec::new()), |(map, mut all), input| {
                let (map, events) = map.reduce(input);
                all.extend(events);
                (map, all)
            })
    }

    fn apply(&mut self, input: InputEvent, events: &mut Vec<MindMapEvent>) -> MindMapResult<()> {
        match input {
            InputEvent::KeyPressed(key) => self.key_pressed(key, events),
            InputEvent::NodeClicked(node_id) => {
                if !self.store.contains_node(node_id) {
                    return Err(MindMapError::NodeNotFound(node_id));
                }
                let collapsed = !self.collapsed.shift_remove(&node_id);
                if collapsed {
                    self.collapsed.insert(node_id);
                }
                events.push(MindMapEvent::CollapseToggled { node_id, collapsed });
                self.selection.select(node_id, &self.store)?;
                Ok(())
            }
            InputEvent::NodeDoubleClicked(node_id) => {
                self.editor.begin_edit(node_id, &self.store)?;
                Ok(())
            }
            InputEvent::PaneClicked => {
                self.selection.clear();
                Ok(())
            }
            InputEvent::NodeDragged { node_id, position } => {
                self.store.set_position(node_id, position)?;
                events.push(MindMapEvent::NodeMoved { node_id, position });
                Ok(())
            }
            InputEvent::Connect { source, target } => {
                let edge = self.store.connect(source, target)?;
                events.push(MindMapEvent::EdgeConnected {
                    edge_id: edge.id,
                    source,
                    target,
                });
                Ok(())
            }
            InputEvent::EditInput { node_id, text } => {
                self.editor.commit_label(node_id, &text, &mut self.store)?;
                events.push(MindMapEvent::LabelUpdated {
                    node_id,
                    label: text,
                });
                Ok(())
            }
            InputEvent::EditBlurred => {
                self.editor.end_edit()?;
                Ok(())
            }
            InputEvent::RemoveLastNode => {
                let removed = self.store.remove_node()?;
                let node_id = removed.node.id;
                self.collapsed.shift_remove(&node_id);
                self.selection.forget(node_id);
                self.editor.forget(node_id);
                events.push(MindMapEvent::NodeRemoved {
                    node_id,
                    pruned_edges: removed.pruned_edges,
                });
                Ok(())
            }
            InputEvent::Layout(direction) => self.apply_layout(direction, events),
            InputEvent::FitView => {
                self.viewport.reset();
                events.push(MindMapEvent::ViewportReset);
                Ok(())
            }
        }
    }

    fn key_pressed(&mut self, key: Key, events: &mut Vec<MindMapEvent>) -> MindMapResult<()> {
        if self.editor.target().is_some() {
            match key {
                Key::Enter | Key::Escape => {
                    self.editor.end_edit()?;
                }
                other => trace!(key = ?other, "key consumed by label editor"),
            }
            return Ok(());
        }

        let Some(command) = self.dispatcher.dispatch(&key, self.selection.selected()) else {
            return match self.selection.selected() {
                Some(_) => Ok(()),
                None => Err(MindMapError::NoSelection),
            };
        };
        self.execute(command, events)
    }

    fn execute(&mut self, command: KeyCommand, events: &mut Vec<MindMapEvent>) -> MindMapResult<()> {
        match command {
            KeyCommand::CreateChild { parent } => self.create_under(parent, events),
            KeyCommand::CreateSibling { of } => {
                self.require_selected(of)?;
                let parent = self.store.parent_of(of).unwrap_or(of);
                self.create_under(parent, events)
            }
            KeyCommand::SelectPrevious => self.selection.move_up(&self.store).map(drop),
            KeyCommand::SelectNext => self.selection.move_down(&self.store).map(drop),
            KeyCommand::SelectParent => self.selection.move_to_parent(&self.store).map(drop),
            KeyCommand::SelectFirstChild => self.selection.move_to_first_child(&self.store).map(drop),
            KeyCommand::BeginEdit { node } => {
                self.require_selected(node)?;
                self.editor.begin_edit(node, &self.store)?;
                Ok(())
            }
        }
    }

    /// Create a child of `parent`. Selection stays where it is.
    fn create_under(&mut self, parent: NodeId, events: &mut Vec<MindMapEvent>) -> MindMapResult<()> {
        self.require_selected(parent)?;
        let (node, edge) = self.store.create_node(Some(parent))?;
        events.push(MindMapEvent::NodeCreated {
            node_id: node.id,
            parent: Some(parent),
            edge_id: edge.map(|edge| edge.id),
        });
        Ok(())
    }

    /// Fail on a node that no longer exists, dropping it from the selection
    fn require_selected(&mut self, id: NodeId) -> MindMapResult<()> {
        if self.store.contains_node(id) {
            Ok(())
        } else {
            self.selection.forget(id);
            Err(MindMapError::NodeNotFound(id))
        }
    }

    fn apply_layout(&mut self, direction: LayoutDirection, events: &mut Vec<MindMapEvent>) -> MindMapResult<()> {
        let ids: Vec<NodeId> = self.store.node_ids().collect();
        let edges: Vec<Edge> = self.store.edges().copied().collect();
        let result = self.layout.compute(&ids, &edges, direction);

        for placed in &result.nodes {
            self.store.set_position(placed.id, placed.position)?;
            self.store.set_connection_sides(placed.id, placed.sides)?;
        }

        events.push(MindMapEvent::LayoutApplied {
            direction,
            node_count: result.nodes.len(),
            reversed_edges: result.reversed_edges,
        });
        Ok(())
    }

    fn refresh(&mut self) {
        self.visible = self.filter.compute(&self.store, &self.collapsed);
        self.store
            .sync_visual_states(self.selection.selected(), &self.collapsed);
    }
}

impl Default for MindMap {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
