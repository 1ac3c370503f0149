//! Row Projection - pure rendering of the field into styled cells
//!
//! Projects a field snapshot into a single row of terminal cells: one span
//! per slot, separators between non-last slots, placeholder characters
//! dimmed in empty cells. Wide characters (CJK, emoji) occupy two columns
//! with a continuation marker cell (`ch = '\0'`), matching the convention
//! diff renderers expect.
//!
//! The projection itself is a pure function over plain data. [`paint_row`]
//! writes the result to a terminal with minimal escape codes; hosts with
//! their own paint layer can ignore it and read the tracked slot cells
//! directly.
//!
//! # Example
//!
//! ```ignore
//! use otp_field::render::{render_row, RowInput};
//!
//! let row = render_row(&RowInput {
//!     projection: vec![Some('1'), Some('2'), None, None],
//!     active: 2,
//!     separator: "-".to_string(),
//!     ..Default::default()
//! });
//! assert_eq!(row.line(), "1-2- - ");
//! ```

pub mod ansi;

use std::io::{self, Write};

use unicode_width::UnicodeWidthChar;

use crate::style::{fallback_props, resolve, SlotStyle, SlotStyles, StyleProps};
use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// Types
// =============================================================================

/// Everything the row projection needs, captured as plain data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowInput {
    /// Per-slot characters, one entry per slot (`None` = empty cell).
    pub projection: Vec<Option<char>>,
    /// Active slot index, `-1` when no slot is focused.
    pub active: i32,
    /// Character shown dimmed in empty cells.
    pub placeholder: Option<char>,
    /// Content rendered between non-last slots.
    pub separator: String,
    /// Field-wide disabled flag.
    pub disabled: bool,
    /// Field-wide errored flag.
    pub errored: bool,
    /// Configured style variants.
    pub styles: SlotStyles,
    /// Styling applied beneath every cell, separators included.
    pub container: Option<SlotStyle>,
}

/// Column extent of one slot within the rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpan {
    pub slot: usize,
    pub start: u16,
    pub width: u16,
}

/// A rendered row: flat cells plus the slot spans for hit testing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotRow {
    pub cells: Vec<Cell>,
    pub spans: Vec<SlotSpan>,
}

impl SlotRow {
    /// Total width of the row in terminal columns.
    pub fn width(&self) -> u16 {
        self.cells.len() as u16
    }

    /// The unstyled text of the row. Continuation cells are skipped so wide
    /// characters appear once.
    pub fn line(&self) -> String {
        self.cells
            .iter()
            .filter(|cell| cell.ch != '\0')
            .map(|cell| cell.ch)
            .collect()
    }
}

// =============================================================================
// Width
// =============================================================================

/// Display width of a single character in terminal cells.
///
/// `0` for control and combining characters, `2` for wide (CJK, emoji).
#[inline]
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

// =============================================================================
// Row projection
// =============================================================================

/// Render the field into a row of styled cells.
///
/// Each slot composes its style from three layers, lowest first: the
/// container props, the built-in fallback (inverse when active, dim when
/// disabled, red when errored), then the configured variants resolved with
/// precedence error > disabled > focused > base. Named style variants are
/// collected for host themes and do not affect the built-in projection.
pub fn render_row(input: &RowInput) -> SlotRow {
    let container = container_props(input.container.as_ref());
    let slot_count = input.projection.len();

    let mut row = SlotRow::default();

    for (slot, assigned) in input.projection.iter().enumerate() {
        let focused = slot as i32 == input.active;
        let resolved = resolve(&input.styles, focused, input.disabled, input.errored);
        let effective = container
            .merged(fallback_props(focused, input.disabled, input.errored))
            .merged(resolved.props);

        let start = row.cells.len() as u16;
        let width = push_slot_cell(&mut row.cells, *assigned, input.placeholder, &effective);
        row.spans.push(SlotSpan { slot, start, width });

        if slot + 1 < slot_count {
            push_separator(&mut row.cells, &input.separator, &container);
        }
    }

    row
}

/// Map a terminal column to the slot rendered there. Columns over a
/// separator or past the end of the row map to `None`.
pub fn slot_at_column(row: &SlotRow, column: u16) -> Option<usize> {
    row.spans
        .iter()
        .find(|span| column >= span.start && column < span.start + span.width)
        .map(|span| span.slot)
}

// =============================================================================
// Row painting
// =============================================================================

/// Writes cells while tracking terminal state to minimize output.
///
/// Only emits escape codes for state that has changed since the previous
/// cell: attributes force a full reset (colors re-emit after), colors are
/// compared individually. Continuation cells produce no output.
#[derive(Debug)]
pub struct RowPainter {
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Attr,
}

impl RowPainter {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::NONE,
        }
    }

    /// Forget tracked state so the next cell re-emits everything.
    pub fn reset(&mut self) {
        self.last_fg = None;
        self.last_bg = None;
        self.last_attrs = Attr::NONE;
    }

    /// Write one cell sequentially.
    pub fn paint_cell<W: Write>(&mut self, w: &mut W, cell: &Cell) -> io::Result<()> {
        // The wide character before this cell already covered the column
        if cell.ch == '\0' {
            return Ok(());
        }

        if cell.attrs != self.last_attrs {
            ansi::reset(w)?;
            if !cell.attrs.is_empty() {
                ansi::attrs(w, cell.attrs)?;
            }
            // Force color re-emit after reset
            self.last_fg = None;
            self.last_bg = None;
            self.last_attrs = cell.attrs;
        }

        if self.last_fg.map_or(true, |c| c != cell.fg) {
            ansi::fg(w, cell.fg)?;
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg.map_or(true, |c| c != cell.bg) {
            ansi::bg(w, cell.bg)?;
            self.last_bg = Some(cell.bg);
        }

        write!(w, "{}", cell.ch)
    }
}

impl Default for RowPainter {
    fn default() -> Self {
        Self::new()
    }
}

/// Paint a rendered row to a writer, ending with an attribute reset.
///
/// The cursor is left immediately after the row; positioning and line
/// clearing are the caller's concern.
pub fn paint_row<W: Write>(w: &mut W, row: &SlotRow) -> io::Result<()> {
    let mut painter = RowPainter::new();
    for cell in &row.cells {
        painter.paint_cell(w, cell)?;
    }
    ansi::reset(w)
}

// =============================================================================
// Internals
// =============================================================================

fn container_props(container: Option<&SlotStyle>) -> StyleProps {
    match container {
        Some(SlotStyle::Props(props)) => *props,
        _ => StyleProps::default(),
    }
}

fn styled_cell(ch: char, props: &StyleProps) -> Cell {
    let mut cell = Cell::with_char(ch);
    if let Some(fg) = props.fg {
        cell.fg = fg;
    }
    if let Some(bg) = props.bg {
        cell.bg = bg;
    }
    if let Some(attrs) = props.attrs {
        cell.attrs = attrs;
    }
    cell
}

/// Push the cell(s) for one slot and return the column width used.
///
/// Slot geometry stays fixed: zero-width content still occupies one column.
fn push_slot_cell(
    cells: &mut Vec<Cell>,
    assigned: Option<char>,
    placeholder: Option<char>,
    props: &StyleProps,
) -> u16 {
    let (ch, dim) = match assigned {
        Some(c) => (c, false),
        None => match placeholder {
            Some(p) => (p, true),
            None => (' ', false),
        },
    };

    let mut cell = styled_cell(ch, props);
    if dim {
        cell.attrs |= Attr::DIM;
    }

    let width = char_width(ch).max(1) as u16;
    cells.push(cell);
    if width == 2 {
        let mut continuation = cell;
        continuation.ch = '\0';
        cells.push(continuation);
    }
    width
}

fn push_separator(cells: &mut Vec<Cell>, separator: &str, props: &StyleProps) {
    for ch in separator.chars() {
        let width = char_width(ch);
        if width == 0 {
            continue;
        }
        let cell = styled_cell(ch, props);
        cells.push(cell);
        if width == 2 {
            let mut continuation = cell;
            continuation.ch = '\0';
            cells.push(continuation);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
