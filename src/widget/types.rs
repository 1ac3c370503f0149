//! Widget types - Props and cleanup.
//!
//! These types define the interface for component props.
//! Props support static values, signals, and getters for reactivity.

use std::rc::Rc;

use spark_signals::Signal;

use crate::state::keyboard::KeyboardEvent;
use crate::style::SlotStyle;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Keyboard event callback.
///
/// Return true to indicate the event was consumed and should not
/// propagate to other handlers.
pub type KeyCallback = Rc<dyn Fn(&KeyboardEvent) -> bool>;

/// Paste callback, receiving the pasted text.
///
/// Return true to indicate the paste was consumed.
pub type PasteCallback = Rc<dyn Fn(&str) -> bool>;

/// Value change callback, receiving the joined logical value.
pub type ChangeCallback = Rc<dyn Fn(&str)>;

/// Focus callback (called when a slot gains focus).
pub type FocusCallback = Rc<dyn Fn()>;

/// Blur callback (called when a slot loses focus).
pub type BlurCallback = Rc<dyn Fn()>;

/// Select-request callback.
///
/// Fired alongside focus so the underlying cell can select its content;
/// with single-character cells this means the next keystroke replaces the
/// current character.
pub type SelectCallback = Rc<dyn Fn()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// This enables reactive props while maintaining type safety.
/// When binding to cell arrays, the reactive connection is preserved.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// =============================================================================
// OTP Field Props
// =============================================================================

/// Properties for the OTP field component.
///
/// The field owns the active-slot state and mounts one slot child per
/// position. The logical value is controlled: pass a `Signal<String>` to
/// read and write it from outside; the field never keeps a private copy.
///
/// # Example
///
/// ```ignore
/// use otp_field::widget::{otp_field, OtpFieldProps};
/// use spark_signals::signal;
///
/// let code = signal(String::new());
///
/// let cleanup = otp_field(OtpFieldProps {
///     num_inputs: 6,
///     value: Some(code.clone()),
///     is_input_num: true,
///     should_auto_focus: true,
///     ..Default::default()
/// });
///
/// // The host reads the entered code at any time
/// let entered = code.get();
/// ```
pub struct OtpFieldProps {
    /// Optional component ID for registry lookup. Slots register as
    /// `"{id}-slot-{i}"`.
    pub id: Option<String>,

    /// Number of slots (default: 4). Zero is clamped to 1 with a warning.
    pub num_inputs: usize,

    /// Controlled logical value. When absent the field creates its own
    /// empty signal.
    pub value: Option<Signal<String>>,

    /// Called with the joined value after every entry, clear, or paste.
    /// Defaults to a debug-log sink.
    pub on_change: Option<ChangeCallback>,

    /// Disables all slots: focus requests are refused and input is ignored.
    pub is_disabled: Option<PropValue<bool>>,

    /// Focus the initial active slot at mount.
    pub should_auto_focus: bool,

    /// Restrict typed entry to ASCII digits.
    pub is_input_num: bool,

    /// Content rendered between non-last slots.
    pub separator: Option<String>,

    /// Character shown dimmed in empty cells.
    pub placeholder: Option<char>,

    /// Styling beneath every cell, separators included.
    pub container_style: Option<SlotStyle>,

    /// Base slot styling.
    pub input_style: Option<SlotStyle>,

    /// Styling for the active slot.
    pub focus_style: Option<SlotStyle>,

    /// Styling when the field is disabled.
    pub disabled_style: Option<SlotStyle>,

    /// Styling when the field is errored.
    pub error_style: Option<SlotStyle>,

    /// Errored presentation flag; typically signal-bound.
    pub has_errored: Option<PropValue<bool>>,
}

impl Default for OtpFieldProps {
    fn default() -> Self {
        Self {
            id: None,
            num_inputs: 4,
            value: None,
            on_change: None,
            is_disabled: None,
            should_auto_focus: false,
            is_input_num: false,
            separator: None,
            placeholder: None,
            container_style: None,
            input_style: None,
            focus_style: None,
            disabled_style: None,
            error_style: None,
            has_errored: None,
        }
    }
}

// =============================================================================
// Slot Props
// =============================================================================

/// Properties for a single slot.
///
/// A slot is stateless with respect to the logical value: it displays the
/// one character bound to it and forwards raw events upward unmodified.
/// The field constructs these; direct use is for hosts composing their own
/// controller.
#[derive(Default)]
pub struct SlotProps {
    /// Optional component ID for registry lookup.
    pub id: Option<String>,

    /// Displayed character ("" = empty cell).
    pub ch: Option<PropValue<String>>,

    /// Whether this slot is the currently active one.
    pub is_active: Option<PropValue<bool>>,

    /// Whether this slot is disabled.
    pub is_disabled: Option<PropValue<bool>>,

    /// Whether this slot renders the errored variant.
    pub has_errored: Option<PropValue<bool>>,

    /// Placeholder character shown dimmed when empty.
    pub placeholder: Option<char>,

    /// Separator content rendered after this slot.
    pub separator_after: Option<String>,

    /// Keyboard events, forwarded while this slot is focused.
    pub on_key: Option<KeyCallback>,

    /// Paste events, forwarded while this slot is focused.
    pub on_paste: Option<PasteCallback>,

    /// Fired when the slot gains focus.
    pub on_focus: Option<FocusCallback>,

    /// Fired when the slot loses focus.
    pub on_blur: Option<BlurCallback>,

    /// Fired with focus so the cell content is selected for replacement.
    pub on_select: Option<SelectCallback>,
}
