//! Input handlers
//!
//! Handlers translate raw input from the rendering surface into mind map
//! commands. The aggregate decides whether a command applies.

mod keyboard;

pub use keyboard::{Key, KeyCommand, KeyboardCommandDispatcher};
