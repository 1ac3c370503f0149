//! State Module - runtime state systems behind the field
//!
//! The reactive state systems the control is wired through:
//!
//! - **Focus** - focused-index signal, per-slot focus/blur callbacks
//! - **Keyboard** - event types, focused dispatch, handler registry
//! - **Clipboard** - internal paste buffer for the Ctrl+V fallback
//! - **Input** - crossterm bridge: polling, conversion, routing

pub mod clipboard;
pub mod focus;
pub mod input;
pub mod keyboard;

pub use focus::FocusCallbacks;
pub use input::InputEvent;
pub use keyboard::{KeyState, KeyboardEvent, Modifiers};
