//! Visual descriptors for node rendering

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Color, NodeId};

/// Every combination of the selected and collapsed flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStyle {
    Default,
    Selected,
    Collapsed,
    SelectedCollapsed,
}

impl NodeStyle {
    /// Classify a node from its two flags
    pub fn from_flags(selected: bool, collapsed: bool) -> Self {
        match (selected, collapsed) {
            (false, false) => Self::Default,
            (true, false) => Self::Selected,
            (false, true) => Self::Collapsed,
            (true, true) => Self::SelectedCollapsed,
        }
    }

    /// Fixed descriptor for this style
    pub fn descriptor(self) -> StyleDescriptor {
        let (background, border, border_width) = match self {
            Self::Default => (Color::WHITE, Color::BLACK, 1.0),
            Self::Selected => (Color::SKY, Color::BLUE, 2.0),
            Self::Collapsed => (Color::SLATE, Color::GRAY, 1.0),
            Self::SelectedCollapsed => (Color::SLATE, Color::BLUE, 2.0),
        };
        StyleDescriptor {
            style: self,
            background,
            border,
            border_width,
        }
    }
}

/// What the renderer needs to draw a node's box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    pub style: NodeStyle,
    pub background: Color,
    pub border: Color,
    pub border_width: f64,
}

/// Style for `node_id` given the current selection and collapsed set
pub fn style_for(
    node_id: NodeId,
    selection: Option<NodeId>,
    collapsed: &IndexSet<NodeId>,
) -> StyleDescriptor {
    NodeStyle::from_flags(selection == Some(node_id), collapsed.contains(&node_id)).descriptor()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test Coverage
    ///
    /// ```mermaid
    /// graph TD
    ///     SF[style_for] --> D[Default]
    ///     SF --> S[Selected]
    ///     SF --> C[Collapsed]
    ///     SF --> SC[SelectedCollapsed]
    /// ```

    #[test]
    fn test_style_is_total_over_flags() {
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        let mut collapsed = IndexSet::new();

        assert_eq!(style_for(a, None, &collapsed).style, NodeStyle::Default);
        assert_eq!(style_for(a, Some(a), &collapsed).style, NodeStyle::Selected);
        assert_eq!(style_for(a, Some(b), &collapsed).style, NodeStyle::Default);

        collapsed.insert(a);
        assert_eq!(style_for(a, None, &collapsed).style, NodeStyle::Collapsed);
        assert_eq!(
            style_for(a, Some(a), &collapsed).style,
            NodeStyle::SelectedCollapsed
        );
    }

    #[test]
    fn test_selected_styles_are_highlighted() {
        let selected = NodeStyle::Selected.descriptor();
        let default = NodeStyle::Default.descriptor();
        assert_ne!(selected.border, default.border);
        assert!(selected.border_width > default.border_width);
        assert_eq!(
            NodeStyle::SelectedCollapsed.descriptor().border,
            selected.border
        );
    }
}
