//! Field State Machine - pure value/focus transitions
//!
//! The behavioral core of the control: one pure function that takes the
//! current field state and one input event and produces the next state.
//! No signals, no I/O, no host types - the widget layer owns those and
//! feeds events through here.
//!
//! # State
//!
//! - `value`: the logical string the N slots collectively represent.
//!   Interior empty slots are encoded as `' '`; trailing empties are
//!   trimmed, so sequentially-typed codes stay plain ("123", never "123 ").
//! - `active`: the focused slot index, `-1` when no slot has focus.
//!
//! # Events
//!
//! Exactly one event per physical keystroke. A printable key becomes
//! `CharEntered` and nothing else; the length guard is a separate operation
//! for hosts whose input primitive reports raw multi-character content out
//! of band, and it only moves focus - it never touches the value.

use std::collections::VecDeque;

/// Character that encodes an empty slot inside the occupied range.
///
/// Typed entry never accepts a space, so the encoding is unambiguous for
/// keyboard input; a pasted space simply renders that cell empty.
pub const EMPTY_SLOT: char = ' ';

/// Direction for arrow-key navigation between slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Left,
    Right,
}

/// How a clear was requested. Backspace retreats after clearing,
/// Delete clears in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    Backspace,
    Delete,
}

/// The field's complete logical state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    /// Logical value. May be longer than the slot count; slots beyond the
    /// count are never displayed but survive mutations untouched.
    pub value: String,
    /// Active slot index, `-1` when blurred.
    pub active: i32,
}

impl FieldState {
    /// Initial state: the given value with slot 0 active.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            active: 0,
        }
    }
}

impl Default for FieldState {
    fn default() -> Self {
        Self::new("")
    }
}

/// One input event against the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The focused slot received exactly one character.
    CharEntered(char),
    /// Backspace or Delete on the focused slot.
    Cleared(ClearMode),
    /// Clipboard text arrived while a slot was focused.
    Pasted(String),
    /// Arrow-key movement between slots.
    Navigate(NavDirection),
    /// A slot received focus directly (pointer interaction or host call).
    FocusSlot(usize),
    /// Focus left the field entirely.
    Blur,
    /// The input primitive reported this many raw characters in one slot.
    /// Advances focus when more than one landed; never alters the value.
    LengthGuard(usize),
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The next state.
    pub state: FieldState,
    /// Whether the operation reports the (possibly unchanged) value to the
    /// change sink. Entry, clear, and paste always report; focus motion
    /// never does.
    pub emitted: bool,
}

// =============================================================================
// Transition Function
// =============================================================================

/// Apply one event to the field state.
///
/// Pure: returns a new state, never mutates the input. `slot_count` below 1
/// is treated as 1; out-of-range indices are clamped rather than rejected.
pub fn apply(state: &FieldState, slot_count: usize, event: &FieldEvent) -> Outcome {
    let n = slot_count.max(1);

    match event {
        FieldEvent::CharEntered(ch) => {
            if state.active < 0 {
                return unchanged(state);
            }
            let index = clamp_index(state.active, n) as usize;
            Outcome {
                state: FieldState {
                    value: set_char_at(&state.value, index, *ch),
                    active: clamp_index(index as i32 + 1, n),
                },
                emitted: true,
            }
        }

        FieldEvent::Cleared(mode) => {
            if state.active < 0 {
                return unchanged(state);
            }
            let index = clamp_index(state.active, n) as usize;
            let active = match mode {
                ClearMode::Backspace => clamp_index(index as i32 - 1, n),
                ClearMode::Delete => index as i32,
            };
            Outcome {
                state: FieldState {
                    value: clear_char_at(&state.value, index),
                    active,
                },
                emitted: true,
            }
        }

        FieldEvent::Pasted(text) => {
            if text.is_empty() {
                // Reported as-is: paste emits even when nothing changes.
                return Outcome {
                    state: state.clone(),
                    emitted: true,
                };
            }
            let start = clamp_index(state.active, n) as usize;
            Outcome {
                state: FieldState {
                    value: distribute(&state.value, start, n, text),
                    active: state.active,
                },
                emitted: true,
            }
        }

        FieldEvent::Navigate(direction) => {
            let step = match direction {
                NavDirection::Left => -1,
                NavDirection::Right => 1,
            };
            Outcome {
                state: FieldState {
                    value: state.value.clone(),
                    active: clamp_index(state.active + step, n),
                },
                emitted: false,
            }
        }

        FieldEvent::FocusSlot(index) => Outcome {
            state: FieldState {
                value: state.value.clone(),
                active: clamp_index(*index as i32, n),
            },
            emitted: false,
        },

        FieldEvent::Blur => Outcome {
            state: FieldState {
                value: state.value.clone(),
                active: -1,
            },
            emitted: false,
        },

        FieldEvent::LengthGuard(raw_len) => {
            if *raw_len > 1 && state.active >= 0 {
                Outcome {
                    state: FieldState {
                        value: state.value.clone(),
                        active: clamp_index(state.active + 1, n),
                    },
                    emitted: false,
                }
            } else {
                unchanged(state)
            }
        }
    }
}

// =============================================================================
// Slot Projection
// =============================================================================

/// The character slot `index` displays, if any.
///
/// Positions past the value's end and positions holding the empty-slot
/// encoding both project as `None`.
pub fn slot_char(value: &str, index: usize) -> Option<char> {
    value
        .chars()
        .nth(index)
        .filter(|ch| *ch != EMPTY_SLOT)
}

/// The full fixed-length projection: always `slot_count` entries, one per
/// slot, independent of the value's length.
pub fn projection(value: &str, slot_count: usize) -> Vec<Option<char>> {
    let n = slot_count.max(1);
    (0..n).map(|i| slot_char(value, i)).collect()
}

// =============================================================================
// Helpers
// =============================================================================

fn unchanged(state: &FieldState) -> Outcome {
    Outcome {
        state: state.clone(),
        emitted: false,
    }
}

fn clamp_index(index: i32, n: usize) -> i32 {
    index.clamp(0, n as i32 - 1)
}

/// New value with `ch` at `index`, padding with empty slots when the value
/// is shorter than the target position.
fn set_char_at(value: &str, index: usize, ch: char) -> String {
    let mut chars: Vec<char> = value.chars().collect();
    if index >= chars.len() {
        chars.resize(index + 1, EMPTY_SLOT);
    }
    chars[index] = ch;
    trim_trailing(chars)
}

/// New value with position `index` cleared.
fn clear_char_at(value: &str, index: usize) -> String {
    let mut chars: Vec<char> = value.chars().collect();
    if index < chars.len() {
        chars[index] = EMPTY_SLOT;
    }
    trim_trailing(chars)
}

/// Paste distribution: fill forward from `start`, at most `n - start`
/// characters, leaving everything outside the filled range untouched.
fn distribute(value: &str, start: usize, n: usize, pasted: &str) -> String {
    let available = n - start;
    let mut queue: VecDeque<char> = pasted.chars().take(available).collect();
    let mut chars: Vec<char> = value.chars().collect();
    let mut pos = start;
    while let Some(ch) = queue.pop_front() {
        if pos >= chars.len() {
            chars.resize(pos + 1, EMPTY_SLOT);
        }
        chars[pos] = ch;
        pos += 1;
    }
    trim_trailing(chars)
}

fn trim_trailing(chars: Vec<char>) -> String {
    let end = chars
        .iter()
        .rposition(|ch| *ch != EMPTY_SLOT)
        .map_or(0, |last| last + 1);
    chars[..end].iter().collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn state(value: &str, active: i32) -> FieldState {
        FieldState {
            value: value.to_string(),
            active,
        }
    }

    // --- character entry ---

    #[test]
    fn test_enter_commits_at_active_and_advances() {
        let out = apply(&state("12", 2), 4, &FieldEvent::CharEntered('3'));
        assert_eq!(out.state.value, "123");
        assert_eq!(out.state.active, 3);
        assert!(out.emitted);
    }

    #[test]
    fn test_enter_at_last_slot_clamps() {
        let out = apply(&state("123", 3), 4, &FieldEvent::CharEntered('4'));
        assert_eq!(out.state.value, "1234");
        assert_eq!(out.state.active, 3);
    }

    #[test]
    fn test_enter_replaces_existing_character() {
        let out = apply(&state("1234", 1), 4, &FieldEvent::CharEntered('x'));
        assert_eq!(out.state.value, "1x34");
        assert_eq!(out.state.active, 2);
    }

    #[test]
    fn test_enter_past_value_end_pads_empties() {
        // Typing out of order must still land the character at the active
        // position, not compact onto the end.
        let out = apply(&state("1", 2), 4, &FieldEvent::CharEntered('3'));
        assert_eq!(out.state.value, "1 3");
        assert_eq!(slot_char(&out.state.value, 2), Some('3'));
        assert_eq!(slot_char(&out.state.value, 1), None);
    }

    #[test]
    fn test_enter_ignored_when_blurred() {
        let out = apply(&state("12", -1), 4, &FieldEvent::CharEntered('3'));
        assert_eq!(out.state, state("12", -1));
        assert!(!out.emitted);
    }

    #[test]
    fn test_enter_preserves_value_beyond_slot_count() {
        let out = apply(&state("123456", 0), 4, &FieldEvent::CharEntered('x'));
        assert_eq!(out.state.value, "x23456");
        assert_eq!(out.state.active, 1);
    }

    // --- clearing ---

    #[test]
    fn test_backspace_clears_and_retreats() {
        let out = apply(&state("1234", 3), 4, &FieldEvent::Cleared(ClearMode::Backspace));
        assert_eq!(out.state.value, "123");
        assert_eq!(out.state.active, 2);
        assert!(out.emitted);
    }

    #[test]
    fn test_backspace_at_first_slot_stays() {
        let out = apply(&state("12", 0), 4, &FieldEvent::Cleared(ClearMode::Backspace));
        assert_eq!(out.state.value, " 2");
        assert_eq!(out.state.active, 0);
    }

    #[test]
    fn test_backspace_interior_keeps_following_positions() {
        let out = apply(&state("1234", 1), 4, &FieldEvent::Cleared(ClearMode::Backspace));
        assert_eq!(out.state.value, "1 34");
        assert_eq!(slot_char(&out.state.value, 1), None);
        assert_eq!(slot_char(&out.state.value, 2), Some('3'));
        assert_eq!(slot_char(&out.state.value, 3), Some('4'));
        assert_eq!(out.state.active, 0);
    }

    #[test]
    fn test_delete_clears_in_place() {
        let out = apply(&state("1234", 2), 4, &FieldEvent::Cleared(ClearMode::Delete));
        assert_eq!(out.state.value, "12 4");
        assert_eq!(out.state.active, 2);
        assert!(out.emitted);
    }

    #[test]
    fn test_clear_collapses_trailing_empties() {
        let out = apply(&state("12 4", 3), 4, &FieldEvent::Cleared(ClearMode::Delete));
        assert_eq!(out.state.value, "12");
    }

    #[test]
    fn test_clear_ignored_when_blurred() {
        let out = apply(&state("12", -1), 4, &FieldEvent::Cleared(ClearMode::Backspace));
        assert_eq!(out.state, state("12", -1));
        assert!(!out.emitted);
    }

    // --- paste distribution ---

    #[test]
    fn test_paste_fills_from_start_and_truncates() {
        let out = apply(&state("", 0), 4, &FieldEvent::Pasted("123456".to_string()));
        assert_eq!(out.state.value, "1234");
        assert_eq!(out.state.active, 0);
        assert!(out.emitted);
    }

    #[test]
    fn test_paste_mid_field_takes_available_only() {
        let out = apply(&state("12", 2), 4, &FieldEvent::Pasted("3456".to_string()));
        assert_eq!(out.state.value, "1234");
        assert_eq!(out.state.active, 2);
    }

    #[test]
    fn test_paste_preserves_positions_before_active() {
        let out = apply(&state("abcd", 2), 4, &FieldEvent::Pasted("XY".to_string()));
        assert_eq!(out.state.value, "abXY");
    }

    #[test]
    fn test_paste_shorter_than_available_keeps_tail() {
        let out = apply(&state("abcd", 1), 4, &FieldEvent::Pasted("X".to_string()));
        assert_eq!(out.state.value, "aXcd");
    }

    #[test]
    fn test_paste_into_sparse_value_pads_before_start() {
        let out = apply(&state("", 2), 4, &FieldEvent::Pasted("78".to_string()));
        assert_eq!(out.state.value, "  78");
        assert_eq!(slot_char(&out.state.value, 0), None);
        assert_eq!(slot_char(&out.state.value, 2), Some('7'));
    }

    #[test]
    fn test_paste_empty_emits_without_change() {
        let out = apply(&state("12", 1), 4, &FieldEvent::Pasted(String::new()));
        assert_eq!(out.state, state("12", 1));
        assert!(out.emitted);
    }

    #[test]
    fn test_paste_never_advances_focus() {
        let out = apply(&state("", 1), 6, &FieldEvent::Pasted("999".to_string()));
        assert_eq!(out.state.active, 1);
    }

    // --- navigation and focus ---

    #[test]
    fn test_navigate_moves_and_clamps() {
        let n = 4;
        let left = apply(&state("", 0), n, &FieldEvent::Navigate(NavDirection::Left));
        assert_eq!(left.state.active, 0);
        let right = apply(&state("", 3), n, &FieldEvent::Navigate(NavDirection::Right));
        assert_eq!(right.state.active, 3);
        let mid = apply(&state("", 2), n, &FieldEvent::Navigate(NavDirection::Left));
        assert_eq!(mid.state.active, 1);
        assert!(!mid.emitted);
    }

    #[test]
    fn test_navigate_from_blur_lands_in_range() {
        let out = apply(&state("", -1), 4, &FieldEvent::Navigate(NavDirection::Right));
        assert_eq!(out.state.active, 0);
    }

    #[test]
    fn test_focus_slot_clamps_out_of_range() {
        let out = apply(&state("", 0), 4, &FieldEvent::FocusSlot(9));
        assert_eq!(out.state.active, 3);
        let out = apply(&state("", 0), 4, &FieldEvent::FocusSlot(2));
        assert_eq!(out.state.active, 2);
    }

    #[test]
    fn test_blur_sets_minus_one() {
        let out = apply(&state("12", 1), 4, &FieldEvent::Blur);
        assert_eq!(out.state.active, -1);
        assert!(!out.emitted);
    }

    // --- length guard ---

    #[test]
    fn test_length_guard_advances_without_consuming() {
        let out = apply(&state("12", 1), 4, &FieldEvent::LengthGuard(2));
        assert_eq!(out.state.value, "12");
        assert_eq!(out.state.active, 2);
        assert!(!out.emitted);
    }

    #[test]
    fn test_length_guard_single_char_is_noop() {
        let out = apply(&state("12", 1), 4, &FieldEvent::LengthGuard(1));
        assert_eq!(out.state, state("12", 1));
    }

    #[test]
    fn test_length_guard_ignored_when_blurred() {
        let out = apply(&state("12", -1), 4, &FieldEvent::LengthGuard(3));
        assert_eq!(out.state.active, -1);
    }

    // --- projection ---

    #[test]
    fn test_projection_always_slot_count_long() {
        for n in 1..=8 {
            assert_eq!(projection("12", n).len(), n);
            assert_eq!(projection("", n).len(), n);
            assert_eq!(projection("123456789", n).len(), n);
        }
    }

    #[test]
    fn test_projection_round_trip() {
        let cases = ["", "1", "12", "1234", "a c", "123456"];
        for value in cases {
            let slots = projection(value, 4);
            let joined: String = slots
                .iter()
                .map(|slot| slot.unwrap_or(EMPTY_SLOT))
                .collect();
            let expected: String = value.chars().take(4).collect();
            assert_eq!(joined.trim_end(), expected.trim_end(), "value {value:?}");
        }
    }

    #[test]
    fn test_projection_ignores_overflow() {
        assert_eq!(slot_char("123456", 3), Some('4'));
        assert_eq!(projection("123456", 4).len(), 4);
    }

    #[test]
    fn test_zero_slot_count_treated_as_one() {
        let out = apply(&state("", 0), 0, &FieldEvent::CharEntered('7'));
        assert_eq!(out.state.value, "7");
        assert_eq!(out.state.active, 0);
        assert_eq!(projection("7", 0).len(), 1);
    }

    // --- full keyboard sequences ---

    #[test]
    fn test_sequential_typing_builds_code() {
        let n = 4;
        let mut current = FieldState::new("");
        for ch in ['2', '0', '2', '6'] {
            current = apply(&current, n, &FieldEvent::CharEntered(ch)).state;
        }
        assert_eq!(current.value, "2026");
        assert_eq!(current.active, 3);
    }

    #[test]
    fn test_backspace_on_empty_slot_only_retreats() {
        // After typing two characters the cursor sits on an empty slot;
        // the first Backspace moves back without touching the value.
        let out = apply(&state("19", 2), 4, &FieldEvent::Cleared(ClearMode::Backspace));
        assert_eq!(out.state.value, "19");
        assert_eq!(out.state.active, 1);
    }

    #[test]
    fn test_type_then_correct_with_backspace() {
        let n = 4;
        let mut current = FieldState::new("");
        current = apply(&current, n, &FieldEvent::CharEntered('1')).state;
        current = apply(&current, n, &FieldEvent::CharEntered('9')).state;
        assert_eq!((current.value.as_str(), current.active), ("19", 2));
        // Cursor is on the empty third slot; back up onto the '9', erase it,
        // then retype.
        current = apply(&current, n, &FieldEvent::Cleared(ClearMode::Backspace)).state;
        assert_eq!((current.value.as_str(), current.active), ("19", 1));
        current = apply(&current, n, &FieldEvent::Cleared(ClearMode::Backspace)).state;
        assert_eq!((current.value.as_str(), current.active), ("1", 0));
        current = apply(&current, n, &FieldEvent::Navigate(NavDirection::Right)).state;
        current = apply(&current, n, &FieldEvent::CharEntered('2')).state;
        assert_eq!((current.value.as_str(), current.active), ("12", 2));
    }
}
