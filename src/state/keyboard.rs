//! Keyboard Module - keyboard event state and the focused-handler registry
//!
//! State and handler registry for keyboard events. Does NOT own stdin (the
//! input module bridges the terminal); it receives already-converted events
//! and routes them to whichever component currently holds focus.
//!
//! # API
//!
//! - `last_event` - Get last keyboard event
//! - `last_key` - Get last key pressed
//! - `on_focused(i, fn)` - Subscribe when component i has focus
//! - `dispatch(event)` - Route one event to the focused component
//!
//! # Example
//!
//! ```ignore
//! use otp_field::state::keyboard;
//!
//! // Subscribe to events when a slot has focus
//! let cleanup = keyboard::on_focused(slot_index, |event| {
//!     println!("focused slot got: {}", event.key);
//!     false // Don't consume
//! });
//! ```

use crate::state::focus;
use spark_signals::{Signal, signal};
use std::cell::RefCell;
use std::collections::HashMap;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Press,
    Repeat,
    Release,
}

impl Default for KeyState {
    fn default() -> Self {
        Self::Press
    }
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Backspace", "ArrowLeft")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get the last key pressed
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    focused_handlers: HashMap<usize, Vec<(usize, KeyHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            focused_handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a keyboard event to the currently focused component.
/// Returns true if a handler consumed the event.
pub fn dispatch(event: KeyboardEvent) -> bool {
    // Always update reactive state
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    // Only press events reach handlers
    if event.state != KeyState::Press {
        return false;
    }

    let focused = focus::get_focused_index();
    log::trace!("key {:?} -> index {focused}", event.key);
    dispatch_focused(focused, &event)
}

/// Dispatch to the handlers registered for a specific focused index.
/// Returns true if consumed.
pub fn dispatch_focused(focused_index: i32, event: &KeyboardEvent) -> bool {
    if focused_index < 0 {
        return false;
    }
    if event.state != KeyState::Press {
        return false;
    }

    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        if let Some(handlers) = reg.focused_handlers.get(&(focused_index as usize)) {
            for (_, handler) in handlers {
                if handler(event) {
                    return true;
                }
            }
        }
        false
    })
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to events when a specific component has focus.
/// Return true from handler to consume the event.
/// Returns cleanup function.
pub fn on_focused<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.focused_handlers
            .entry(index)
            .or_default()
            .push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.focused_handlers.get_mut(&index) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.focused_handlers.remove(&index);
                }
            }
        });
    }
}

/// Clean up all handlers for a component index.
/// Called when the component is released to prevent leaks.
pub fn cleanup_index(index: usize) {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.focused_handlers.remove(&index);
    });
}

/// Clear all state and handlers.
pub fn cleanup() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.focused_handlers.clear();
    });
    LAST_EVENT.with(|s| s.set(None));
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    cleanup();
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, reset_registry};
    use crate::engine::cells;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_registry();
        focus::reset_focus_state();
        reset_keyboard_state();
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert!(last_event().is_none());
        assert_eq!(last_key(), "");
    }

    #[test]
    fn test_dispatch_updates_state() {
        setup();

        dispatch(KeyboardEvent::new("a"));
        assert_eq!(last_key(), "a");

        dispatch(KeyboardEvent::new("Backspace"));
        assert_eq!(last_key(), "Backspace");
    }

    #[test]
    fn test_focused_handler() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = on_focused(5, move |_event| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        let event = KeyboardEvent::new("a");

        // Wrong index - not called
        dispatch_focused(3, &event);
        assert_eq!(count.get(), 0);

        // Correct index - called
        dispatch_focused(5, &event);
        assert_eq!(count.get(), 1);

        cleanup();

        dispatch_focused(5, &event);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_dispatch_routes_to_focused_component() {
        setup();

        let index = allocate_index(None);
        cells::set_focusable(index, true);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _cleanup = on_focused(index, move |event| {
            seen_clone.borrow_mut().push(event.key.clone());
            true
        });

        // Nothing focused yet - the event goes nowhere
        assert!(!dispatch(KeyboardEvent::new("1")));
        assert!(seen.borrow().is_empty());

        focus::focus(index);
        assert!(dispatch(KeyboardEvent::new("2")));
        assert_eq!(*seen.borrow(), vec!["2".to_string()]);
    }

    #[test]
    fn test_handler_consumption_stops_chain() {
        setup();

        let reached = Rc::new(Cell::new(false));
        let reached_clone = reached.clone();

        let _c1 = on_focused(0, |_| true);
        let _c2 = on_focused(0, move |_| {
            reached_clone.set(true);
            false
        });

        let result = dispatch_focused(0, &KeyboardEvent::new("x"));
        assert!(result);
        assert!(!reached.get());
    }

    #[test]
    fn test_only_press_dispatched() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let _cleanup = on_focused(0, move |_| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        let mut event = KeyboardEvent::new("a");
        dispatch_focused(0, &event);
        assert_eq!(count.get(), 1);

        event.state = KeyState::Repeat;
        dispatch_focused(0, &event);
        assert_eq!(count.get(), 1);

        event.state = KeyState::Release;
        dispatch_focused(0, &event);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_modifiers() {
        setup();

        let ctrl_v = Rc::new(Cell::new(false));
        let ctrl_clone = ctrl_v.clone();

        let _cleanup = on_focused(0, move |event| {
            if event.modifiers.ctrl && event.key == "v" {
                ctrl_clone.set(true);
            }
            false
        });

        dispatch_focused(0, &KeyboardEvent::with_modifiers("v", Modifiers::ctrl()));
        assert!(ctrl_v.get());
    }

    #[test]
    fn test_cleanup_index_drops_handlers() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let _cleanup = on_focused(2, move |_| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        dispatch_focused(2, &KeyboardEvent::new("a"));
        assert_eq!(count.get(), 1);

        cleanup_index(2);
        dispatch_focused(2, &KeyboardEvent::new("a"));
        assert_eq!(count.get(), 1);
    }
}
