//! # otp-field
//!
//! Reactive one-time-passcode entry for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! N single-character slots behave as one logical field: typing fills the
//! active slot and advances, Backspace clears and retreats, paste
//! distributes characters across slots from the active position. Every
//! transition runs through a pure state machine; the components are thin
//! adapters that feed it terminal events and mirror the result into
//! reactive cell arrays.
//!
//! ## Architecture
//!
//! Components are indices into parallel arrays rather than objects. Each
//! array cell is a reactive slot that can be bound to signals, getters, or
//! static values.
//!
//! ```text
//! terminal event → keyboard/paste dispatch → machine::apply → value signal
//!                                                                  ↓
//!                      cell arrays (char / active / flags, via getters)
//!                                                                  ↓
//!                            field_row_input → render_row → styled cells
//! ```
//!
//! ## Modules
//!
//! - [`machine`] - Pure state machine: value distribution, active index
//! - [`widget`] - The [`otp_field`](widget::otp_field) and
//!   [`slot`](widget::slot) components
//! - [`engine`] - Component registry and parallel cell arrays
//! - [`state`] - Focus, keyboard, clipboard, and terminal input dispatch
//! - [`style`] - Variant styling (base, focused, disabled, errored)
//! - [`render`] - Row projection to styled terminal cells
//! - [`types`] - Core types (Rgba, Attr, Cell)

pub mod engine;
pub mod machine;
pub mod render;
pub mod state;
pub mod style;
pub mod types;
pub mod widget;

// Re-export commonly used items
pub use types::*;

pub use engine::{
    allocate_index, get_allocated_count, get_current_parent_index, get_id, get_index,
    is_allocated, on_destroy, pop_parent_context, push_parent_context, release_index,
    reset_registry,
};

pub use machine::{ClearMode, EMPTY_SLOT, FieldEvent, FieldState, NavDirection, Outcome};

pub use render::{
    RowInput, RowPainter, SlotRow, SlotSpan, char_width, paint_row, render_row, slot_at_column,
};

pub use style::{ResolvedStyle, SlotStyle, SlotStyles, StyleProps};

pub use widget::{
    BlurCallback, ChangeCallback, Cleanup, FocusCallback, KeyCallback, OtpFieldProps,
    PasteCallback, PropValue, SelectCallback, SlotProps, field_row_input, otp_field, slot,
};

pub use state::focus::{blur, focus, get_focused_index, has_focus, is_focused};
pub use state::input::{
    disable_paste_capture, enable_paste_capture, poll_event, read_event, route_event,
};
pub use state::{FocusCallbacks, InputEvent, KeyState, KeyboardEvent, Modifiers};
