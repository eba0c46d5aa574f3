//! Keyboard command dispatch
//!
//! Maps a key press plus the current selection onto a mind map command.
//! Keys that arrive while nothing is selected, or keys without a binding,
//! produce no command.

use serde::{Deserialize, Serialize};

use crate::config::EnterBehavior;
use crate::value_objects::NodeId;

/// Keys the canvas reacts to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    F2,
    Escape,
    /// Any other key, by its DOM key name
    Other(String),
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "F2" => Self::F2,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Command resolved from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCommand {
    /// Create a child under `parent`
    CreateChild { parent: NodeId },
    /// Create a sibling of `of` (a child of its parent)
    CreateSibling { of: NodeId },
    /// Select the previous node in storage order
    SelectPrevious,
    /// Select the next node in storage order
    SelectNext,
    /// Select the parent of the selected node
    SelectParent,
    /// Select the first child of the selected node
    SelectFirstChild,
    /// Put `node` into label edit mode
    BeginEdit { node: NodeId },
}

/// Resolves key presses against the current selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardCommandDispatcher {
    enter_behavior: EnterBehavior,
}

impl KeyboardCommandDispatcher {
    pub fn new(enter_behavior: EnterBehavior) -> Self {
        Self { enter_behavior }
    }

    pub fn enter_behavior(&self) -> EnterBehavior {
        self.enter_behavior
    }

    /// Command bound to `key`, if any applies with `selection`
    pub fn dispatch(&self, key: &Key, selection: Option<NodeId>) -> Option<KeyCommand> {
        let selected = selection?;
        let command = match key {
            Key::Enter => match self.enter_behavior {
                EnterBehavior::CreateChild => KeyCommand::CreateChild { parent: selected },
                EnterBehavior::CreateSibling => KeyCommand::CreateSibling { of: selected },
            },
            Key::Tab => KeyCommand::CreateChild { parent: selected },
            Key::ArrowUp => KeyCommand::SelectPrevious,
            Key::ArrowDown => KeyCommand::SelectNext,
            Key::ArrowLeft => KeyCommand::SelectParent,
            Key::ArrowRight => KeyCommand::SelectFirstChild,
            Key::F2 => KeyCommand::BeginEdit { node: selected },
            Key::Escape | Key::Other(_) => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test Coverage
    ///
    /// ```mermaid
    /// graph TD
    ///     KD[KeyboardCommandDispatcher] --> C[Create Keys]
    ///     KD --> N[Navigation Keys]
    ///     KD --> E[F2 Edit]
    ///     KD --> U[Unbound / No Selection]
    /// ```

    const SELECTED: NodeId = NodeId::new(3);

    #[test]
    fn test_create_keys() {
        let dispatcher = KeyboardCommandDispatcher::default();
        assert_eq!(
            dispatcher.dispatch(&Key::Enter, Some(SELECTED)),
            Some(KeyCommand::CreateChild { parent: SELECTED })
        );
        assert_eq!(
            dispatcher.dispatch(&Key::Tab, Some(SELECTED)),
            Some(KeyCommand::CreateChild { parent: SELECTED })
        );

        let sibling = KeyboardCommandDispatcher::new(EnterBehavior::CreateSibling);
        assert_eq!(
            sibling.dispatch(&Key::Enter, Some(SELECTED)),
            Some(KeyCommand::CreateSibling { of: SELECTED })
        );
        assert_eq!(
            sibling.dispatch(&Key::Tab, Some(SELECTED)),
            Some(KeyCommand::CreateChild { parent: SELECTED })
        );
    }

    #[test]
    fn test_navigation_and_edit_keys() {
        let dispatcher = KeyboardCommandDispatcher::default();
        let cases = [
            (Key::ArrowUp, KeyCommand::SelectPrevious),
            (Key::ArrowDown, KeyCommand::SelectNext),
            (Key::ArrowLeft, KeyCommand::SelectParent),
            (Key::ArrowRight, KeyCommand::SelectFirstChild),
            (Key::F2, KeyCommand::BeginEdit { node: SELECTED }),
        ];
        for (key, expected) in cases {
            assert_eq!(dispatcher.dispatch(&key, Some(SELECTED)), Some(expected));
        }
    }

    #[test]
    fn test_no_command_without_selection_or_binding() {
        let dispatcher = KeyboardCommandDispatcher::default();
        assert_eq!(dispatcher.dispatch(&Key::Enter, None), None);
        assert_eq!(dispatcher.dispatch(&Key::F2, None), None);
        assert_eq!(dispatcher.dispatch(&Key::Escape, Some(SELECTED)), None);
        assert_eq!(dispatcher.dispatch(&Key::from("a"), Some(SELECTED)), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from("Esc"), Key::Escape);
        assert_eq!(Key::from("q"), Key::Other("q".into()));
        assert_eq!(serde_json::to_string(&Key::Enter).unwrap(), "\"Enter\"");
    }
}
