//! Per-Slot Cell Arrays
//!
//! Parallel reactive arrays holding the display state of every component
//! index: the projected character, the active/disabled/errored flags, the
//! separator rendered after a slot, and the structural parent link.
//!
//! Display fields are bound with getters so the projection stays derived -
//! reading a cell re-evaluates it from the value and focus signals, nothing
//! is copied forward on mutation.
//!
//! Uses `TrackedSlotArray` for stable reactive cells with fine-grained
//! tracking.

use spark_signals::{TrackedSlotArray, dirty_set, tracked_slot_array};

use crate::style::{SlotStyle, SlotStyles};

/// Trait to add clear_all functionality to TrackedSlotArray.
/// This restores behavior that was removed from spark-signals v0.1.2.
trait ClearAll {
    fn clear_all(&self);
}

impl<T: Clone + PartialEq + 'static> ClearAll for TrackedSlotArray<T> {
    fn clear_all(&self) {
        for i in 0..self.len() {
            self.clear(i);
        }
    }
}

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Structural parent index (-1 = root).
    static PARENT_INDEX: TrackedSlotArray<i32> = tracked_slot_array(Some(-1), dirty_set());

    /// Projected character for this cell ("" = empty slot).
    static CELL_CHAR: TrackedSlotArray<String> = tracked_slot_array(Some(String::new()), dirty_set());

    /// Placeholder shown dimmed when the cell is empty ("" = none).
    static CELL_PLACEHOLDER: TrackedSlotArray<String> = tracked_slot_array(Some(String::new()), dirty_set());

    /// Whether this cell is the currently active slot.
    static CELL_ACTIVE: TrackedSlotArray<bool> = tracked_slot_array(Some(false), dirty_set());

    /// Whether this cell is disabled.
    static CELL_DISABLED: TrackedSlotArray<bool> = tracked_slot_array(Some(false), dirty_set());

    /// Whether this cell is in the errored presentation state.
    static CELL_ERRORED: TrackedSlotArray<bool> = tracked_slot_array(Some(false), dirty_set());

    /// Whether this index participates in focus.
    static FOCUSABLE: TrackedSlotArray<bool> = tracked_slot_array(Some(false), dirty_set());

    /// Separator content rendered after this cell ("" = none).
    static SEPARATOR_AFTER: TrackedSlotArray<String> = tracked_slot_array(Some(String::new()), dirty_set());

    /// Style variants configured for a field (held on the field's index).
    static SLOT_STYLES: TrackedSlotArray<SlotStyles> = tracked_slot_array(Some(SlotStyles::default()), dirty_set());

    /// Container styling for a field (held on the field's index).
    static CONTAINER_STYLE: TrackedSlotArray<Option<SlotStyle>> = tracked_slot_array(Some(None), dirty_set());
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    PARENT_INDEX.with(|arr| { let _ = arr.peek(index); });
    CELL_CHAR.with(|arr| { let _ = arr.peek(index); });
    CELL_PLACEHOLDER.with(|arr| { let _ = arr.peek(index); });
    CELL_ACTIVE.with(|arr| { let _ = arr.peek(index); });
    CELL_DISABLED.with(|arr| { let _ = arr.peek(index); });
    CELL_ERRORED.with(|arr| { let _ = arr.peek(index); });
    FOCUSABLE.with(|arr| { let _ = arr.peek(index); });
    SEPARATOR_AFTER.with(|arr| { let _ = arr.peek(index); });
    SLOT_STYLES.with(|arr| { let _ = arr.peek(index); });
    CONTAINER_STYLE.with(|arr| { let _ = arr.peek(index); });
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    PARENT_INDEX.with(|arr| arr.clear(index));
    CELL_CHAR.with(|arr| arr.clear(index));
    CELL_PLACEHOLDER.with(|arr| arr.clear(index));
    CELL_ACTIVE.with(|arr| arr.clear(index));
    CELL_DISABLED.with(|arr| arr.clear(index));
    CELL_ERRORED.with(|arr| arr.clear(index));
    FOCUSABLE.with(|arr| arr.clear(index));
    SEPARATOR_AFTER.with(|arr| arr.clear(index));
    SLOT_STYLES.with(|arr| arr.clear(index));
    CONTAINER_STYLE.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    PARENT_INDEX.with(|arr| arr.clear_all());
    CELL_CHAR.with(|arr| arr.clear_all());
    CELL_PLACEHOLDER.with(|arr| arr.clear_all());
    CELL_ACTIVE.with(|arr| arr.clear_all());
    CELL_DISABLED.with(|arr| arr.clear_all());
    CELL_ERRORED.with(|arr| arr.clear_all());
    FOCUSABLE.with(|arr| arr.clear_all());
    SEPARATOR_AFTER.with(|arr| arr.clear_all());
    SLOT_STYLES.with(|arr| arr.clear_all());
    CONTAINER_STYLE.with(|arr| arr.clear_all());
}

// =============================================================================
// Parent Link
// =============================================================================

/// Get the parent index, if any.
pub fn parent_of(index: usize) -> Option<usize> {
    let parent = PARENT_INDEX.with(|arr| arr.peek(index)).unwrap_or(-1);
    if parent < 0 { None } else { Some(parent as usize) }
}

/// Set the parent index.
pub fn set_parent_index(index: usize, parent: Option<usize>) {
    let value = parent.map_or(-1, |p| p as i32);
    PARENT_INDEX.with(|arr| arr.set_value(index, value));
}

// =============================================================================
// Cell Character
// =============================================================================

/// Get the projected character at index (reactive). Empty string means an
/// empty slot.
pub fn get_cell_char(index: usize) -> String {
    CELL_CHAR.with(|arr| arr.get(index)).unwrap_or_default()
}

/// Set the projected character at index.
pub fn set_cell_char(index: usize, ch: String) {
    CELL_CHAR.with(|arr| arr.set_value(index, ch));
}

/// Bind the projected character from a getter function.
pub fn set_cell_char_getter<F>(index: usize, getter: F)
where
    F: Fn() -> String + 'static,
{
    CELL_CHAR.with(|arr| arr.set_getter(index, getter));
}

// =============================================================================
// Placeholder
// =============================================================================

/// Get the placeholder at index (reactive).
pub fn get_cell_placeholder(index: usize) -> String {
    CELL_PLACEHOLDER.with(|arr| arr.get(index)).unwrap_or_default()
}

/// Set the placeholder at index.
pub fn set_cell_placeholder(index: usize, placeholder: String) {
    CELL_PLACEHOLDER.with(|arr| arr.set_value(index, placeholder));
}

// =============================================================================
// Flags
// =============================================================================

/// Whether the cell at index is the active slot (reactive).
pub fn get_cell_active(index: usize) -> bool {
    CELL_ACTIVE.with(|arr| arr.get(index)).unwrap_or(false)
}

/// Set the active flag at index.
pub fn set_cell_active(index: usize, active: bool) {
    CELL_ACTIVE.with(|arr| arr.set_value(index, active));
}

/// Bind the active flag from a getter function.
pub fn set_cell_active_getter<F>(index: usize, getter: F)
where
    F: Fn() -> bool + 'static,
{
    CELL_ACTIVE.with(|arr| arr.set_getter(index, getter));
}

/// Whether the cell at index is disabled (reactive).
pub fn get_cell_disabled(index: usize) -> bool {
    CELL_DISABLED.with(|arr| arr.get(index)).unwrap_or(false)
}

/// Set the disabled flag at index.
pub fn set_cell_disabled(index: usize, disabled: bool) {
    CELL_DISABLED.with(|arr| arr.set_value(index, disabled));
}

/// Bind the disabled flag from a getter function.
pub fn set_cell_disabled_getter<F>(index: usize, getter: F)
where
    F: Fn() -> bool + 'static,
{
    CELL_DISABLED.with(|arr| arr.set_getter(index, getter));
}

/// Whether the cell at index is errored (reactive).
pub fn get_cell_errored(index: usize) -> bool {
    CELL_ERRORED.with(|arr| arr.get(index)).unwrap_or(false)
}

/// Set the errored flag at index.
pub fn set_cell_errored(index: usize, errored: bool) {
    CELL_ERRORED.with(|arr| arr.set_value(index, errored));
}

/// Bind the errored flag from a getter function.
pub fn set_cell_errored_getter<F>(index: usize, getter: F)
where
    F: Fn() -> bool + 'static,
{
    CELL_ERRORED.with(|arr| arr.set_getter(index, getter));
}

/// Whether the index participates in focus.
pub fn get_focusable(index: usize) -> bool {
    FOCUSABLE.with(|arr| arr.get(index)).unwrap_or(false)
}

/// Mark the index as focusable (or not).
pub fn set_focusable(index: usize, focusable: bool) {
    FOCUSABLE.with(|arr| arr.set_value(index, focusable));
}

// =============================================================================
// Separator
// =============================================================================

/// Separator content rendered after this cell (reactive). Empty = none.
pub fn get_separator_after(index: usize) -> String {
    SEPARATOR_AFTER.with(|arr| arr.get(index)).unwrap_or_default()
}

/// Set the separator content rendered after this cell.
pub fn set_separator_after(index: usize, separator: String) {
    SEPARATOR_AFTER.with(|arr| arr.set_value(index, separator));
}

// =============================================================================
// Styles
// =============================================================================

/// Style variants for the field at index (reactive).
pub fn get_slot_styles(index: usize) -> SlotStyles {
    SLOT_STYLES.with(|arr| arr.get(index))
}

/// Set the style variants for the field at index.
pub fn set_slot_styles(index: usize, styles: SlotStyles) {
    SLOT_STYLES.with(|arr| arr.set_value(index, styles));
}

/// Container styling for the field at index (reactive).
pub fn get_container_style(index: usize) -> Option<SlotStyle> {
    CONTAINER_STYLE.with(|arr| arr.get(index))
}

/// Set the container styling for the field at index.
pub fn set_container_style(index: usize, style: Option<SlotStyle>) {
    CONTAINER_STYLE.with(|arr| arr.set_value(index, style));
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    #[test]
    fn test_parent_link_round_trip() {
        reset();
        set_parent_index(3, Some(1));
        assert_eq!(parent_of(3), Some(1));
        set_parent_index(3, None);
        assert_eq!(parent_of(3), None);
    }

    #[test]
    fn test_cell_char_getter_is_derived() {
        reset();
        let value = signal("7".to_string());
        let bound = value.clone();
        set_cell_char_getter(0, move || bound.get());
        assert_eq!(get_cell_char(0), "7");

        value.set("9".to_string());
        assert_eq!(get_cell_char(0), "9");
    }

    #[test]
    fn test_flags_default_false() {
        reset();
        ensure_capacity(5);
        assert!(!get_cell_active(5));
        assert!(!get_cell_disabled(5));
        assert!(!get_cell_errored(5));
        assert!(!get_focusable(5));
    }

    #[test]
    fn test_clear_at_index_restores_defaults() {
        reset();
        set_focusable(2, true);
        set_separator_after(2, "-".to_string());
        clear_at_index(2);
        assert!(!get_focusable(2));
        assert_eq!(get_separator_after(2), "");
    }
}
