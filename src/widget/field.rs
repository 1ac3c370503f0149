//! OTP Field - Fixed-length one-time-passcode entry.
//!
//! The field mounts N single-character slots that act as one logical value.
//! All value and focus transitions run through the pure state machine in
//! [`crate::machine`]; this component is the adapter that feeds it keyboard
//! and paste events and mirrors the resulting state into the cell arrays.
//!
//! # Features
//!
//! - Controlled value via `Signal<String>` (the caller owns the value)
//! - Typed entry fills the active slot and advances focus
//! - Backspace clears and retreats, Delete clears in place
//! - Paste distributes characters from the active slot forward
//! - Arrow / Home / End navigation, clamped to the slot range
//! - Numeric mode restricts typed entry to ASCII digits
//! - Disabled fields refuse focus and ignore input
//! - Per-variant styling (base, focused, disabled, errored, container)
//!
//! # Example
//!
//! ```ignore
//! use otp_field::widget::{otp_field, OtpFieldProps};
//! use spark_signals::signal;
//!
//! let code = signal(String::new());
//!
//! let cleanup = otp_field(OtpFieldProps {
//!     id: Some("login-otp".to_string()),
//!     num_inputs: 6,
//!     value: Some(code.clone()),
//!     is_input_num: true,
//!     should_auto_focus: true,
//!     separator: Some("-".to_string()),
//!     ..Default::default()
//! });
//!
//! // ... route terminal events; `code` fills as the user types ...
//!
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, signal};
use unicode_segmentation::UnicodeSegmentation;

use crate::engine::cells;
use crate::engine::{
    allocate_index, get_id, get_index, pop_parent_context, push_parent_context, release_index,
};
use crate::machine::{
    self, ClearMode, EMPTY_SLOT, FieldEvent, FieldState, NavDirection, Outcome,
};
use crate::render::RowInput;
use crate::state::keyboard::KeyboardEvent;
use crate::state::{clipboard, focus};
use crate::style::SlotStyles;

use super::slot::slot;
use super::types::{ChangeCallback, Cleanup, OtpFieldProps, PropValue, SlotProps};

// =============================================================================
// Entry Filter
// =============================================================================

/// Map a printable key payload to its machine event.
///
/// A single-grapheme key becomes `CharEntered` (subject to the space,
/// control, and numeric filters). A multi-grapheme payload can only come
/// from a host-synthesized event, such as an IME commit delivered as one
/// key string; it maps to the length guard, which advances focus without
/// writing. Rejected keys map to `None` and are left for other handlers.
fn entry_event(key: &str, numeric_only: bool) -> Option<FieldEvent> {
    let mut graphemes = key.graphemes(true);
    let first = graphemes.next()?;
    if graphemes.next().is_some() {
        return Some(FieldEvent::LengthGuard(key.graphemes(true).count()));
    }

    let ch = first.chars().next()?;
    if ch == EMPTY_SLOT || ch.is_control() {
        return None;
    }
    if numeric_only && !ch.is_ascii_digit() {
        return None;
    }
    Some(FieldEvent::CharEntered(ch))
}

// =============================================================================
// Commit Helpers
// =============================================================================

/// Write a transition result back to the value signal and notify.
///
/// The signal is only touched when the value actually changed; the change
/// callback fires whenever the machine says so, which for paste includes
/// transitions that leave the value as it was.
fn commit(
    value: &Signal<String>,
    on_change: &Option<ChangeCallback>,
    before: &FieldState,
    outcome: &Outcome,
) {
    if outcome.state.value != before.value {
        value.set(outcome.state.value.clone());
    }
    if outcome.emitted {
        emit_change(on_change, &outcome.state.value);
    }
}

fn emit_change(on_change: &Option<ChangeCallback>, value: &str) {
    match on_change {
        Some(cb) => cb(value),
        None => log::debug!("otp_field: value changed to {value:?}"),
    }
}

/// Drive terminal focus to match the machine's active index.
///
/// The focused slot's callbacks own the active signal, so this is the only
/// place the key path touches focus directly.
fn sync_focus(slot_indices: &RefCell<Vec<usize>>, target: i32) {
    if target < 0 {
        focus::blur();
        return;
    }
    let slot_index = slot_indices.borrow().get(target as usize).copied();
    if let Some(slot_index) = slot_index {
        focus::focus(slot_index);
    }
}

// =============================================================================
// OTP Field Component
// =============================================================================

/// Create an OTP entry field with `props.num_inputs` slots.
///
/// The field allocates one registry index for itself and one per slot;
/// slots register as `"{field_id}-slot-{i}"` so renderers can resolve them.
/// Style variants are stored on the field's own index.
///
/// Returns a cleanup function that tears down the field and all slots.
pub fn otp_field(props: OtpFieldProps) -> Cleanup {
    // 1. ALLOCATE INDEX
    let field_index = allocate_index(props.id.as_deref());
    let field_id = get_id(field_index).unwrap_or_else(|| format!("field-{field_index}"));

    // 2. SLOT COUNT - zero is silently unusable, clamp with a trace
    let num_inputs = if props.num_inputs == 0 {
        log::warn!("otp_field {field_id:?}: num_inputs 0 clamped to 1");
        1
    } else {
        props.num_inputs
    };

    // 3. SHARED STATE
    let value = props.value.unwrap_or_else(|| signal(String::new()));
    let active = signal(0i32);
    let disabled = props.is_disabled.unwrap_or_default();
    let errored = props.has_errored.unwrap_or_default();
    let on_change = props.on_change;
    let separator = props.separator;
    let is_input_num = props.is_input_num;

    // 4. FIELD-LEVEL PRESENTATION - style variants live on the field index
    cells::set_slot_styles(
        field_index,
        SlotStyles {
            base: props.input_style,
            focused: props.focus_style,
            disabled: props.disabled_style,
            errored: props.error_style,
        },
    );
    cells::set_container_style(field_index, props.container_style);

    // Slot registry indices, resolved after mounting. Handlers capture the
    // cell now and read it lazily.
    let slot_indices: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));

    // 5. SHARED EVENT HANDLERS - one keyboard/paste closure for every slot
    let handle_key = {
        let value = value.clone();
        let active = active.clone();
        let disabled = disabled.clone();
        let on_change = on_change.clone();
        let slot_indices = slot_indices.clone();

        Rc::new(move |event: &KeyboardEvent| -> bool {
            if disabled.get() {
                return false;
            }

            // Clipboard fallback for terminals without bracketed paste
            if event.modifiers.ctrl {
                return match event.key.as_str() {
                    "v" | "V" => {
                        if let Some(text) = clipboard::paste() {
                            let before = FieldState {
                                value: value.get(),
                                active: active.get(),
                            };
                            let outcome =
                                machine::apply(&before, num_inputs, &FieldEvent::Pasted(text));
                            commit(&value, &on_change, &before, &outcome);
                        }
                        true
                    }
                    _ => false,
                };
            }
            if event.modifiers.alt || event.modifiers.meta {
                return false;
            }

            let machine_event = match event.key.as_str() {
                "Backspace" => FieldEvent::Cleared(ClearMode::Backspace),
                "Delete" => FieldEvent::Cleared(ClearMode::Delete),
                "ArrowLeft" => FieldEvent::Navigate(NavDirection::Left),
                "ArrowRight" => FieldEvent::Navigate(NavDirection::Right),
                "Home" => FieldEvent::FocusSlot(0),
                "End" => FieldEvent::FocusSlot(num_inputs - 1),
                // Left for the host: form submission, tab order, dismissal
                "Enter" | "Tab" | "Escape" | "ArrowUp" | "ArrowDown" => return false,
                key => match entry_event(key, is_input_num) {
                    Some(ev) => ev,
                    None => return false,
                },
            };

            let before = FieldState {
                value: value.get(),
                active: active.get(),
            };
            let outcome = machine::apply(&before, num_inputs, &machine_event);
            commit(&value, &on_change, &before, &outcome);
            if outcome.state.active != before.active {
                sync_focus(&slot_indices, outcome.state.active);
            }
            true
        })
    };

    let handle_paste = {
        let value = value.clone();
        let active = active.clone();
        let disabled = disabled.clone();
        let on_change = on_change.clone();

        Rc::new(move |text: &str| -> bool {
            if disabled.get() {
                return false;
            }
            let before = FieldState {
                value: value.get(),
                active: active.get(),
            };
            let outcome = machine::apply(&before, num_inputs, &FieldEvent::Pasted(text.to_string()));
            // Distribution never moves focus, so no sync here
            commit(&value, &on_change, &before, &outcome);
            true
        })
    };

    // 6. MOUNT SLOTS
    push_parent_context(field_index);

    let mut slot_cleanups: Vec<Cleanup> = Vec::with_capacity(num_inputs);
    for i in 0..num_inputs {
        let value_for_char = value.clone();
        let active_for_flag = active.clone();
        let disabled_for_flag = disabled.clone();
        let errored_for_flag = errored.clone();

        let value_for_focus = value.clone();
        let active_for_focus = active.clone();
        let value_for_blur = value.clone();
        let active_for_blur = active.clone();

        slot_cleanups.push(slot(SlotProps {
            id: Some(format!("{field_id}-slot-{i}")),
            ch: Some(PropValue::Getter(Rc::new(move || {
                machine::slot_char(&value_for_char.get(), i)
                    .map(String::from)
                    .unwrap_or_default()
            }))),
            is_active: Some(PropValue::Getter(Rc::new(move || {
                active_for_flag.get() == i as i32
            }))),
            is_disabled: Some(PropValue::Getter(Rc::new(move || disabled_for_flag.get()))),
            has_errored: Some(PropValue::Getter(Rc::new(move || errored_for_flag.get()))),
            placeholder: props.placeholder,
            separator_after: if i + 1 < num_inputs {
                separator.clone()
            } else {
                None
            },
            on_key: Some(handle_key.clone()),
            on_paste: Some(handle_paste.clone()),
            // The focused slot owns the active index
            on_focus: Some(Rc::new(move || {
                let state = FieldState {
                    value: value_for_focus.get(),
                    active: active_for_focus.get(),
                };
                let outcome = machine::apply(&state, num_inputs, &FieldEvent::FocusSlot(i));
                active_for_focus.set(outcome.state.active);
            })),
            on_blur: Some(Rc::new(move || {
                let state = FieldState {
                    value: value_for_blur.get(),
                    active: active_for_blur.get(),
                };
                let outcome = machine::apply(&state, num_inputs, &FieldEvent::Blur);
                active_for_blur.set(outcome.state.active);
            })),
            on_select: None,
        }));
    }

    pop_parent_context();

    // 7. RESOLVE SLOT INDICES
    {
        let mut indices = slot_indices.borrow_mut();
        for i in 0..num_inputs {
            if let Some(slot_index) = get_index(&format!("{field_id}-slot-{i}")) {
                indices.push(slot_index);
            }
        }
    }

    // 8. AUTO FOCUS - the initial active slot is 0
    if props.should_auto_focus {
        let first = slot_indices.borrow().first().copied();
        if let Some(slot_index) = first {
            focus::focus(slot_index);
        }
    }

    // ==========================================================================
    // CLEANUP
    // ==========================================================================

    Box::new(move || {
        for cleanup in slot_cleanups {
            cleanup();
        }
        release_index(field_index);
    })
}

// =============================================================================
// Render Bridge
// =============================================================================

/// Assemble the render-ready description of a mounted field's row.
///
/// Walks the field's slots through the registry and snapshots the cell
/// arrays: per-slot characters, the active position, and the field-wide
/// presentation props. Pass the result to [`crate::render::render_row`].
pub fn field_row_input(field_index: usize) -> RowInput {
    let field_id = get_id(field_index).unwrap_or_default();

    let mut projection = Vec::new();
    let mut active = -1i32;
    let mut disabled = false;
    let mut errored = false;
    let mut placeholder = None;
    let mut separator = String::new();

    let mut i = 0usize;
    while let Some(slot_index) = get_index(&format!("{field_id}-slot-{i}")) {
        projection.push(cells::get_cell_char(slot_index).chars().next());
        if cells::get_cell_active(slot_index) {
            active = i as i32;
        }
        if i == 0 {
            disabled = cells::get_cell_disabled(slot_index);
            errored = cells::get_cell_errored(slot_index);
            placeholder = cells::get_cell_placeholder(slot_index).chars().next();
            separator = cells::get_separator_after(slot_index);
        }
        i += 1;
    }

    RowInput {
        projection,
        active,
        placeholder,
        separator,
        disabled,
        errored,
        styles: cells::get_slot_styles(field_index),
        container: cells::get_container_style(field_index),
    }
}

// =============================================================================
// Tests
// =============================================================================
