//! ANSI escape sequences for painting slot rows.
//!
//! The field renders on a single line, so this module carries only what
//! inline painting needs:
//! - Colors (ANSI 16, 256, and TrueColor)
//! - Text attributes (bold, dim, inverse, etc.)
//! - Line-level cursor control for repaint-in-place

use crate::types::{Attr, Rgba};
use std::io::Write;

// =============================================================================
// Cursor Control
// =============================================================================

/// Move cursor to beginning of line.
#[inline]
pub fn cursor_column_zero<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[G")
}

/// Hide cursor.
#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25l")
}

/// Show cursor.
#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25h")
}

/// Clear entire line.
#[inline]
pub fn erase_line<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[2K")
}

// =============================================================================
// Colors
// =============================================================================

/// Reset all attributes and colors.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[0m")
}

/// Set foreground color.
#[inline]
pub fn fg<W: Write>(w: &mut W, color: Rgba) -> std::io::Result<()> {
    if color.is_terminal_default() {
        // Reset to terminal default foreground
        write!(w, "\x1b[39m")
    } else if color.is_ansi() {
        let index = color.ansi_index();
        if index < 8 {
            // Standard colors: 30-37
            write!(w, "\x1b[{}m", 30 + index)
        } else if index < 16 {
            // Bright colors: 90-97
            write!(w, "\x1b[{}m", 90 + index - 8)
        } else {
            // Extended palette: 38;5;n
            write!(w, "\x1b[38;5;{}m", index)
        }
    } else {
        // TrueColor: 38;2;r;g;b
        write!(w, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
    }
}

/// Set background color.
#[inline]
pub fn bg<W: Write>(w: &mut W, color: Rgba) -> std::io::Result<()> {
    if color.is_terminal_default() {
        // Reset to terminal default background
        write!(w, "\x1b[49m")
    } else if color.is_ansi() {
        let index = color.ansi_index();
        if index < 8 {
            // Standard colors: 40-47
            write!(w, "\x1b[{}m", 40 + index)
        } else if index < 16 {
            // Bright colors: 100-107
            write!(w, "\x1b[{}m", 100 + index - 8)
        } else {
            // Extended palette: 48;5;n
            write!(w, "\x1b[48;5;{}m", index)
        }
    } else {
        // TrueColor: 48;2;r;g;b
        write!(w, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
    }
}

// =============================================================================
// Text Attributes
// =============================================================================

/// Set text attributes from bitflags.
#[allow(unused_assignments)]
pub fn attrs<W: Write>(w: &mut W, attr: Attr) -> std::io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let mut first = true;
    write!(w, "\x1b[")?;

    macro_rules! emit {
        ($flag:expr, $code:expr) => {
            if attr.contains($flag) {
                if !first {
                    write!(w, ";")?;
                }
                write!(w, "{}", $code)?;
                first = false;
            }
        };
    }

    emit!(Attr::BOLD, 1);
    emit!(Attr::DIM, 2);
    emit!(Attr::ITALIC, 3);
    emit!(Attr::UNDERLINE, 4);
    emit!(Attr::BLINK, 5);
    emit!(Attr::INVERSE, 7);
    emit!(Attr::HIDDEN, 8);
    emit!(Attr::STRIKETHROUGH, 9);

    write!(w, "m")
}
