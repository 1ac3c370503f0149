//! Focus System - which slot currently owns the keyboard
//!
//! Manages the focused component index and the callbacks slots hang off
//! focus transitions:
//! - `focused_index` signal (-1 = nothing focused)
//! - Per-index focus/blur callbacks, fired at the transition source
//! - Focus requests honor the focusable and disabled cell flags
//!
//! # Example
//!
//! ```ignore
//! use otp_field::state::focus;
//!
//! // Focus a specific slot's component index
//! focus::focus(slot_index);
//!
//! // Register callbacks
//! let cleanup = focus::register_callbacks(slot_index, FocusCallbacks {
//!     on_focus: Some(Box::new(|| println!("focused"))),
//!     on_blur: Some(Box::new(|| println!("blurred"))),
//! });
//! ```

use crate::engine::cells;
use spark_signals::{Signal, signal};
use std::cell::RefCell;
use std::collections::HashMap;

// =============================================================================
// FOCUSED INDEX SIGNAL
// =============================================================================

thread_local! {
    static FOCUSED_INDEX: Signal<i32> = signal(-1);
}

/// Get the currently focused component index (-1 if none)
pub fn get_focused_index() -> i32 {
    FOCUSED_INDEX.with(|s| s.get())
}

/// Check if any component is focused
pub fn has_focus() -> bool {
    get_focused_index() >= 0
}

/// Check if specific component is focused
pub fn is_focused(index: usize) -> bool {
    get_focused_index() == index as i32
}

// =============================================================================
// FOCUS CALLBACKS
// =============================================================================

/// Callbacks fired when focus changes.
///
/// A slot uses `on_focus` to sync the field's active index and to issue its
/// focus/select requests to the host; `on_blur` handles focus leaving.
#[derive(Default)]
pub struct FocusCallbacks {
    pub on_focus: Option<Box<dyn Fn()>>,
    pub on_blur: Option<Box<dyn Fn()>>,
}

thread_local! {
    // Multiple callbacks per index supported (slot sync + user callback)
    static FOCUS_CALLBACK_REGISTRY: RefCell<HashMap<usize, Vec<FocusCallbacks>>> = RefCell::new(HashMap::new());
}

/// Register focus callbacks for a component.
/// Returns cleanup function to unregister.
pub fn register_callbacks(index: usize, callbacks: FocusCallbacks) -> impl FnOnce() {
    let callback_id = FOCUS_CALLBACK_REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let list = reg.entry(index).or_default();
        let id = list.len();
        list.push(callbacks);
        id
    });

    move || {
        FOCUS_CALLBACK_REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(list) = reg.get_mut(&index) {
                if callback_id < list.len() {
                    // Slot is tombstoned so later IDs stay valid
                    list[callback_id].on_focus = None;
                    list[callback_id].on_blur = None;
                }
                if list
                    .iter()
                    .all(|cb| cb.on_focus.is_none() && cb.on_blur.is_none())
                {
                    reg.remove(&index);
                }
            }
        });
    }
}

/// Internal: set focus and fire callbacks at the source.
/// Blur callbacks of the old index run first, then the signal updates, then
/// focus callbacks of the new index.
fn set_focus_with_callbacks(new_index: i32) {
    let old_index = get_focused_index();

    if old_index == new_index {
        return;
    }
    log::trace!("focus change {old_index} -> {new_index}");

    if old_index >= 0 {
        FOCUS_CALLBACK_REGISTRY.with(|reg| {
            let reg = reg.borrow();
            if let Some(callbacks) = reg.get(&(old_index as usize)) {
                for cb in callbacks {
                    if let Some(ref on_blur) = cb.on_blur {
                        on_blur();
                    }
                }
            }
        });
    }

    FOCUSED_INDEX.with(|s| s.set(new_index));

    if new_index >= 0 {
        FOCUS_CALLBACK_REGISTRY.with(|reg| {
            let reg = reg.borrow();
            if let Some(callbacks) = reg.get(&(new_index as usize)) {
                for cb in callbacks {
                    if let Some(ref on_focus) = cb.on_focus {
                        on_focus();
                    }
                }
            }
        });
    }
}

// =============================================================================
// FOCUS REQUESTS
// =============================================================================

/// Focus a specific component by index.
///
/// Refused (returns false) when the index is not focusable or is disabled -
/// a disabled field suppresses focus requests entirely.
pub fn focus(index: usize) -> bool {
    if cells::get_focusable(index) && !cells::get_cell_disabled(index) {
        set_focus_with_callbacks(index as i32);
        return true;
    }
    false
}

/// Clear focus (no component focused)
pub fn blur() {
    if get_focused_index() >= 0 {
        set_focus_with_callbacks(-1);
    }
}

// =============================================================================
// RESET (for testing)
// =============================================================================

/// Reset all focus state (for testing)
pub fn reset_focus_state() {
    set_focus_with_callbacks(-1);
    FOCUS_CALLBACK_REGISTRY.with(|reg| reg.borrow_mut().clear());
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, reset_registry};
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_registry();
        reset_focus_state();
    }

    fn focusable_component() -> usize {
        let index = allocate_index(None);
        cells::set_focusable(index, true);
        index
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert_eq!(get_focused_index(), -1);
        assert!(!has_focus());
    }

    #[test]
    fn test_focus_single_component() {
        setup();

        let index = focusable_component();

        assert!(focus(index));
        assert_eq!(get_focused_index(), index as i32);
        assert!(has_focus());
        assert!(is_focused(index));
    }

    #[test]
    fn test_focus_non_focusable_refused() {
        setup();

        let index = allocate_index(None);

        assert!(!focus(index));
        assert_eq!(get_focused_index(), -1);
    }

    #[test]
    fn test_focus_disabled_refused() {
        setup();

        let index = focusable_component();
        cells::set_cell_disabled(index, true);

        assert!(!focus(index));
        assert!(!has_focus());
    }

    #[test]
    fn test_focus_callbacks() {
        setup();

        let focus_count = Rc::new(Cell::new(0));
        let blur_count = Rc::new(Cell::new(0));

        let first = focusable_component();
        let second = focusable_component();

        let focus_count_clone = focus_count.clone();
        let blur_count_clone = blur_count.clone();

        let _cleanup = register_callbacks(
            first,
            FocusCallbacks {
                on_focus: Some(Box::new(move || {
                    focus_count_clone.set(focus_count_clone.get() + 1);
                })),
                on_blur: Some(Box::new(move || {
                    blur_count_clone.set(blur_count_clone.get() + 1);
                })),
            },
        );

        focus(first);
        assert_eq!(focus_count.get(), 1);
        assert_eq!(blur_count.get(), 0);

        // Moving focus away blurs the first component
        focus(second);
        assert_eq!(focus_count.get(), 1);
        assert_eq!(blur_count.get(), 1);

        focus(first);
        assert_eq!(focus_count.get(), 2);
        assert_eq!(blur_count.get(), 1);
    }

    #[test]
    fn test_refocus_same_index_fires_nothing() {
        setup();

        let count = Rc::new(Cell::new(0));
        let index = focusable_component();

        let count_clone = count.clone();
        let _cleanup = register_callbacks(
            index,
            FocusCallbacks {
                on_focus: Some(Box::new(move || {
                    count_clone.set(count_clone.get() + 1);
                })),
                on_blur: None,
            },
        );

        focus(index);
        focus(index);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_blur() {
        setup();

        let index = focusable_component();

        focus(index);
        assert!(has_focus());

        blur();
        assert!(!has_focus());
        assert_eq!(get_focused_index(), -1);
    }

    #[test]
    fn test_callback_cleanup_unregisters() {
        setup();

        let count = Rc::new(Cell::new(0));
        let first = focusable_component();
        let second = focusable_component();

        let count_clone = count.clone();
        let cleanup = register_callbacks(
            first,
            FocusCallbacks {
                on_focus: Some(Box::new(move || {
                    count_clone.set(count_clone.get() + 1);
                })),
                on_blur: None,
            },
        );

        focus(first);
        assert_eq!(count.get(), 1);

        cleanup();
        focus(second);
        focus(first);
        assert_eq!(count.get(), 1);
    }
}
