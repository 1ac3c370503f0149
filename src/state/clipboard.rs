//! Clipboard Module - the paste source for the field
//!
//! Internal text buffer backing the Ctrl+V path. Terminals with bracketed
//! paste deliver pasted text directly through the input bridge; for hosts
//! without it, whatever was stored here is what Ctrl+V distributes across
//! the slots.
//!
//! # Example
//!
//! ```ignore
//! use otp_field::state::clipboard;
//!
//! // Seed the buffer (e.g. from an OSC 52 response or host integration)
//! clipboard::copy("483921");
//!
//! // The field's Ctrl+V handler reads it back
//! if let Some(code) = clipboard::paste() {
//!     println!("pasting: {code}");
//! }
//! ```

use std::cell::RefCell;

// =============================================================================
// Internal Buffer
// =============================================================================

thread_local! {
    /// Internal clipboard buffer.
    /// Used as fallback when the terminal has no bracketed paste.
    static CLIPBOARD_BUFFER: RefCell<Option<String>> = RefCell::new(None);
}

// =============================================================================
// Public API
// =============================================================================

/// Store text for later paste operations.
///
/// Empty strings are ignored (buffer not modified).
pub fn copy(text: &str) {
    if text.is_empty() {
        return;
    }

    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = Some(text.to_string());
    });
}

/// Read the buffered text, or None when nothing was stored.
///
/// Non-destructive: pasting twice distributes the same text twice.
pub fn paste() -> Option<String> {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().clone())
}

/// Clear the buffer.
pub fn clear() {
    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = None;
    });
}

/// Check if the buffer holds anything.
pub fn has_content() -> bool {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().is_some())
}

// =============================================================================
// Tests
// =============================================================================
