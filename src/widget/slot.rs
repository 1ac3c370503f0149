//! Slot - Single-character display cell.
//!
//! A slot shows exactly one character of the field value and forwards raw
//! input events upward while focused. It keeps no value state of its own:
//! which character it displays, whether it is active, and what happens on a
//! keystroke are all decided by whoever mounted it.
//!
//! # Features
//!
//! - Reactive character/active/disabled/errored bindings
//! - Placeholder character for empty cells
//! - Optional separator content rendered after the cell
//! - Key and paste events forwarded only while focused
//! - Focus implies select: the focus callback and the select callback fire
//!   on the same transition, so the next keystroke replaces the content
//!
//! # Example
//!
//! ```ignore
//! use otp_field::widget::{slot, SlotProps, PropValue};
//! use spark_signals::signal;
//!
//! let ch = signal("7".to_string());
//!
//! let cleanup = slot(SlotProps {
//!     ch: Some(PropValue::Signal(ch.clone())),
//!     placeholder: Some('_'),
//!     ..Default::default()
//! });
//!
//! ch.set("9".to_string()); // cell updates automatically
//! ```

use crate::engine::cells;
use crate::engine::{allocate_index, release_index};
use crate::state::focus::{self, FocusCallbacks};
use crate::state::{input, keyboard};

use super::types::{Cleanup, PropValue, SlotProps};

/// Create a single-character slot.
///
/// The slot is always focusable. Focusing it fires `on_focus` then
/// `on_select`; blurring fires `on_blur`. While focused, keyboard events go
/// to `on_key` and paste events to `on_paste`, both unmodified.
///
/// Returns a cleanup function that releases the slot when called.
pub fn slot(props: SlotProps) -> Cleanup {
    // 1. ALLOCATE INDEX
    let index = allocate_index(props.id.as_deref());

    // 2. DISPLAY CHARACTER
    if let Some(ch) = props.ch {
        match ch {
            PropValue::Static(v) => cells::set_cell_char(index, v),
            PropValue::Signal(s) => cells::set_cell_char_getter(index, move || s.get()),
            PropValue::Getter(g) => cells::set_cell_char_getter(index, move || g()),
        }
    }

    // 3. STATE FLAGS
    if let Some(active) = props.is_active {
        match active {
            PropValue::Static(v) => cells::set_cell_active(index, v),
            PropValue::Signal(s) => cells::set_cell_active_getter(index, move || s.get()),
            PropValue::Getter(g) => cells::set_cell_active_getter(index, move || g()),
        }
    }
    if let Some(disabled) = props.is_disabled {
        match disabled {
            PropValue::Static(v) => cells::set_cell_disabled(index, v),
            PropValue::Signal(s) => cells::set_cell_disabled_getter(index, move || s.get()),
            PropValue::Getter(g) => cells::set_cell_disabled_getter(index, move || g()),
        }
    }
    if let Some(errored) = props.has_errored {
        match errored {
            PropValue::Static(v) => cells::set_cell_errored(index, v),
            PropValue::Signal(s) => cells::set_cell_errored_getter(index, move || s.get()),
            PropValue::Getter(g) => cells::set_cell_errored_getter(index, move || g()),
        }
    }

    // 4. PRESENTATION
    if let Some(placeholder) = props.placeholder {
        cells::set_cell_placeholder(index, placeholder.to_string());
    }
    if let Some(separator) = props.separator_after {
        cells::set_separator_after(index, separator);
    }

    // 5. FOCUS - Slots are always focusable; select rides the focus transition
    cells::set_focusable(index, true);

    let on_focus = props.on_focus;
    let on_select = props.on_select;
    let focus_callback: Option<Box<dyn Fn()>> = if on_focus.is_some() || on_select.is_some() {
        Some(Box::new(move || {
            if let Some(ref cb) = on_focus {
                cb();
            }
            if let Some(ref cb) = on_select {
                cb();
            }
        }))
    } else {
        None
    };
    let blur_callback: Option<Box<dyn Fn()>> = props
        .on_blur
        .map(|cb| Box::new(move || cb()) as Box<dyn Fn()>);

    let focus_cleanup = focus::register_callbacks(
        index,
        FocusCallbacks {
            on_focus: focus_callback,
            on_blur: blur_callback,
        },
    );

    // 6. EVENT FORWARDING
    let key_cleanup = props
        .on_key
        .map(|cb| keyboard::on_focused(index, move |event| cb(event)));
    let paste_cleanup = props
        .on_paste
        .map(|cb| input::on_paste_focused(index, move |text| cb(text)));

    // ==========================================================================
    // CLEANUP
    // ==========================================================================

    Box::new(move || {
        if let Some(cleanup) = key_cleanup {
            cleanup();
        }
        keyboard::cleanup_index(index);

        if let Some(cleanup) = paste_cleanup {
            cleanup();
        }
        input::cleanup_paste_index(index);

        focus_cleanup();
        release_index(index);
    })
}

// =============================================================================
// Tests
// =============================================================================
