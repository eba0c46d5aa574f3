//! Mind Map Integration Tests

use cim_domain_mindmap::{
    EditorConfig, InputEvent, Key, LayoutDirection, MindMap, MindMapEvent, NodeContent, NodeId,
    NodeStyle,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn n(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    fn key(name: &str) -> InputEvent {
        InputEvent::KeyPressed(Key::from(name))
    }

    fn fresh() -> MindMap {
        MindMap::new(EditorConfig::default().with_seed(7))
    }

    /// Select `id` and leave its collapse state unchanged
    fn select(map: &mut MindMap, id: NodeId) {
        map.handle(InputEvent::NodeClicked(id));
        map.handle(InputEvent::NodeClicked(id));
    }

    /// Root 1 -> 2 -> 3, with nothing collapsed and 1 selected
    fn chain() -> MindMap {
        let mut map = fresh();
        select(&mut map, n(1));
        map.handle(key("Enter"));
        map.handle(key("ArrowDown"));
        map.handle(key("Enter"));
        map.handle(key("ArrowUp"));
        map
    }

    #[test]
    fn test_enter_on_root_creates_child() {
        let mut map = fresh();
        select(&mut map, n(1));

        map.handle(key("Enter"));

        let ids: Vec<NodeId> = map.store().node_ids().collect();
        assert_eq!(ids, vec![n(1), n(2)]);
        let edge = map.store().edges().next().unwrap();
        assert_eq!((edge.source, edge.target), (n(1), n(2)));
        assert_eq!(map.selected(), Some(n(1)));
    }

    #[test]
    fn test_collapse_hides_direct_children_only() {
        let mut map = chain();
        assert_eq!(map.store().parent_of(n(3)), Some(n(2)));

        map.handle(InputEvent::NodeClicked(n(1)));

        assert_eq!(map.visible().nodes, vec![n(1), n(3)]);
        assert!(map.visible().edges.is_empty());

        let view = map.view();
        assert_eq!(view.nodes.len(), 2);
        assert!(view.edges.is_empty());
        assert_eq!(view.node(n(1)).unwrap().style.style, NodeStyle::SelectedCollapsed);
        assert_eq!(view.node(n(3)).unwrap().style.style, NodeStyle::Default);
    }

    #[test]
    fn test_edit_label_then_blur() {
        let mut map = chain();

        map.handle(InputEvent::NodeDoubleClicked(n(2)));
        for text in ["H", "He", "Hel", "Hell", "Hello"] {
            map.handle(InputEvent::EditInput {
                node_id: n(2),
                text: text.into(),
            });
        }
        assert_eq!(
            map.view().node(n(2)).unwrap().content,
            NodeContent::Editor {
                value: "Hello".into()
            }
        );

        let events = map.handle(InputEvent::EditBlurred);
        assert_eq!(events, vec![MindMapEvent::EditEnded { node_id: n(2) }]);
        assert_eq!(map.store().node(n(2)).unwrap().label, "Hello");
        assert_eq!(map.edit_target(), None);
    }

    #[test]
    fn test_remove_in_two_node_graph() {
        let mut map = fresh();
        select(&mut map, n(1));
        map.handle(key("Enter"));
        assert_eq!(map.store().edge_count(), 1);

        map.handle(InputEvent::RemoveLastNode);
        assert_eq!(map.store().node_count(), 1);
        assert_eq!(map.store().edge_count(), 0);

        let events = map.handle(InputEvent::RemoveLastNode);
        assert!(events.is_empty());
        assert_eq!(map.store().node_count(), 1);
        assert!(map.store().contains_node(n(1)));
    }

    #[test]
    fn test_ids_stay_unique_across_remove_and_create() {
        let mut map = fresh();
        select(&mut map, n(1));
        map.handle(key("Enter"));
        map.handle(key("Enter"));
        map.handle(InputEvent::RemoveLastNode);
        map.handle(key("Enter"));

        let ids: Vec<NodeId> = map.store().node_ids().collect();
        assert_eq!(ids, vec![n(1), n(2), n(4)]);
    }

    #[test]
    fn test_layout_then_fit_view() {
        let mut map = chain();
        map.handle(InputEvent::Layout(LayoutDirection::TopToBottom));

        let y = |id| map.store().node(id).unwrap().position.y;
        assert!(y(n(1)) < y(n(2)));
        assert!(y(n(2)) < y(n(3)));

        assert_eq!(map.handle(InputEvent::FitView), vec![MindMapEvent::ViewportReset]);
        assert_eq!(map.view().viewport.zoom, 1.0);
    }

    #[test]
    fn test_script_from_json() {
        let script = r#"[
            {"NodeClicked": 1},
            {"NodeClicked": 1},
            {"KeyPressed": "Enter"},
            {"KeyPressed": "Tab"},
            {"Layout": "LeftToRight"},
            "FitView"
        ]"#;
        let inputs: Vec<InputEvent> = serde_json::from_str(script).unwrap();

        let (map, events) = fresh().replay(inputs);
        assert_eq!(map.store().node_count(), 3);
        assert!(events.iter().any(|e| e.event_type() == "LayoutApplied"));

        let view = serde_json::to_value(map.view()).unwrap();
        assert_eq!(view["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(view["edges"].as_array().unwrap().len(), 2);
    }
}
