//! Input Module - event conversion and polling
//!
//! Bridges crossterm's event system with the keyboard module and the paste
//! path. Provides event polling, conversion, and routing.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `route_event` - Dispatch event to the appropriate handler
//! - `on_paste_focused` - Subscribe a component to pasted text
//! - `enable_paste_capture` / `disable_paste_capture` - Bracketed paste
//!
//! # Example
//!
//! ```ignore
//! use otp_field::state::input::{poll_event, route_event};
//! use std::time::Duration;
//!
//! // Event loop
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         route_event(event);
//!     }
//! }
//! ```

use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent,
    KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers, poll, read,
};
use crossterm::execute;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::stdout;
use std::time::Duration;

use super::focus;
use super::keyboard::{self, KeyState, KeyboardEvent, Modifiers};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for the control
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Keyboard event (key press, release, etc.)
    Key(KeyboardEvent),
    /// Bracketed paste delivered by the terminal
    Paste(String),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        crossterm::event::KeyEventKind::Press => KeyState::Press,
        crossterm::event::KeyEventKind::Repeat => KeyState::Repeat,
        crossterm::event::KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: false, // Not exposed by crossterm
    }
}

// =============================================================================
// PASTE HANDLERS
// =============================================================================

/// Handler for pasted text. Return true to consume.
pub type PasteHandler = Box<dyn Fn(&str) -> bool>;

thread_local! {
    static PASTE_HANDLERS: RefCell<HashMap<usize, Vec<(usize, PasteHandler)>>> =
        RefCell::new(HashMap::new());
    static NEXT_PASTE_ID: RefCell<usize> = const { RefCell::new(0) };
}

/// Subscribe to pasted text while a specific component has focus.
/// Returns cleanup function.
pub fn on_paste_focused<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&str) -> bool + 'static,
{
    let id = NEXT_PASTE_ID.with(|next| {
        let mut next = next.borrow_mut();
        let id = *next;
        *next += 1;
        id
    });
    PASTE_HANDLERS.with(|reg| {
        reg.borrow_mut()
            .entry(index)
            .or_default()
            .push((id, Box::new(handler)));
    });

    move || {
        PASTE_HANDLERS.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.get_mut(&index) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.remove(&index);
                }
            }
        });
    }
}

/// Deliver pasted text to the focused component's paste handlers.
/// Returns true if consumed.
pub fn dispatch_paste(text: &str) -> bool {
    let focused = focus::get_focused_index();
    if focused < 0 {
        return false;
    }
    log::trace!("paste ({} chars) -> index {focused}", text.chars().count());

    PASTE_HANDLERS.with(|reg| {
        let reg = reg.borrow();
        if let Some(handlers) = reg.get(&(focused as usize)) {
            for (_, handler) in handlers {
                if handler(text) {
                    return true;
                }
            }
        }
        false
    })
}

/// Clean up paste handlers for a component index.
pub fn cleanup_paste_index(index: usize) {
    PASTE_HANDLERS.with(|reg| {
        reg.borrow_mut().remove(&index);
    });
}

/// Reset paste routing state (for testing).
pub fn reset_input_state() {
    PASTE_HANDLERS.with(|reg| reg.borrow_mut().clear());
    NEXT_PASTE_ID.with(|next| *next.borrow_mut() = 0);
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(InputEvent::Key(convert_key_event(key))),
        CrosstermEvent::Paste(text) => Ok(InputEvent::Paste(text)),
        CrosstermEvent::Resize(w, h) => Ok(InputEvent::Resize(w, h)),
        _ => Ok(InputEvent::None),
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Route an event to the appropriate handler.
/// Returns true if any handler consumed the event.
pub fn route_event(event: InputEvent) -> bool {
    match event {
        InputEvent::Key(key) => keyboard::dispatch(key),
        InputEvent::Paste(text) => dispatch_paste(&text),
        InputEvent::Resize(_, _) => false,
        InputEvent::None => false,
    }
}

// =============================================================================
// PASTE CAPTURE
// =============================================================================

/// Enable bracketed paste so the terminal delivers pastes as one event.
pub fn enable_paste_capture() -> std::io::Result<()> {
    execute!(stdout(), EnableBracketedPaste)
}

/// Disable bracketed paste.
pub fn disable_paste_capture() -> std::io::Result<()> {
    execute!(stdout(), DisableBracketedPaste)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        crate::engine::reset_registry();
        focus::reset_focus_state();
        keyboard::reset_keyboard_state();
        reset_input_state();
    }

    #[test]
    fn test_convert_key_char() {
        let crossterm_event = CrosstermKeyEvent {
            code: KeyCode::Char('7'),
            modifiers: KeyModifiers::empty(),
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        };

        let event = convert_key_event(crossterm_event);

        assert_eq!(event.key, "7");
        assert_eq!(event.state, KeyState::Press);
        assert!(!event.modifiers.ctrl);
    }

    #[test]
    fn test_convert_key_named() {
        let named = [
            (KeyCode::Backspace, "Backspace"),
            (KeyCode::Delete, "Delete"),
            (KeyCode::Left, "ArrowLeft"),
            (KeyCode::Right, "ArrowRight"),
            (KeyCode::Home, "Home"),
            (KeyCode::End, "End"),
            (KeyCode::Enter, "Enter"),
            (KeyCode::Tab, "Tab"),
            (KeyCode::Esc, "Escape"),
        ];

        for (code, expected) in named {
            let crossterm_event = CrosstermKeyEvent {
                code,
                modifiers: KeyModifiers::empty(),
                kind: crossterm::event::KeyEventKind::Press,
                state: crossterm::event::KeyEventState::NONE,
            };

            let event = convert_key_event(crossterm_event);
            assert_eq!(event.key, expected);
        }
    }

    #[test]
    fn test_convert_key_with_ctrl() {
        let crossterm_event = CrosstermKeyEvent {
            code: KeyCode::Char('v'),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        };

        let event = convert_key_event(crossterm_event);

        assert_eq!(event.key, "v");
        assert!(event.modifiers.ctrl);
        assert!(!event.modifiers.alt);
        assert!(!event.modifiers.shift);
    }

    #[test]
    fn test_convert_key_states() {
        let states = [
            (crossterm::event::KeyEventKind::Press, KeyState::Press),
            (crossterm::event::KeyEventKind::Repeat, KeyState::Repeat),
            (crossterm::event::KeyEventKind::Release, KeyState::Release),
        ];

        for (kind, expected) in states {
            let crossterm_event = CrosstermKeyEvent {
                code: KeyCode::Char('a'),
                modifiers: KeyModifiers::empty(),
                kind,
                state: crossterm::event::KeyEventState::NONE,
            };

            let event = convert_key_event(crossterm_event);
            assert_eq!(event.state, expected);
        }
    }

    #[test]
    fn test_paste_routes_to_focused() {
        setup();

        let index = crate::engine::allocate_index(None);
        crate::engine::cells::set_focusable(index, true);

        let seen = Rc::new(RefCell::new(String::new()));
        let seen_clone = seen.clone();
        let _cleanup = on_paste_focused(index, move |text| {
            seen_clone.borrow_mut().push_str(text);
            true
        });

        // Nothing focused - paste goes nowhere
        assert!(!dispatch_paste("123"));
        assert!(seen.borrow().is_empty());

        focus::focus(index);
        assert!(dispatch_paste("123"));
        assert_eq!(*seen.borrow(), "123");
    }

    #[test]
    fn test_paste_cleanup_unregisters() {
        setup();

        let index = crate::engine::allocate_index(None);
        crate::engine::cells::set_focusable(index, true);
        focus::focus(index);

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let cleanup = on_paste_focused(index, move |_| {
            count_clone.set(count_clone.get() + 1);
            true
        });

        dispatch_paste("x");
        assert_eq!(count.get(), 1);

        cleanup();
        dispatch_paste("y");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_route_event_paths() {
        setup();

        // Key events update keyboard state even when unconsumed
        route_event(InputEvent::Key(KeyboardEvent::new("5")));
        assert_eq!(keyboard::last_key(), "5");

        // Resize and None are inert
        assert!(!route_event(InputEvent::Resize(120, 40)));
        assert!(!route_event(InputEvent::None));
    }
}
