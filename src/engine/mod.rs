//! Engine - component registry and parallel cell arrays.
//!
//! The engine manages the core data structures:
//! - Registry: index allocation, ID mapping, parent context
//! - Cells: parallel reactive arrays for per-slot display state
//!
//! # Architecture
//!
//! Components are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: Field (parent=-1, focusable=false)
//! Index 1: Slot  (parent=0,  char="1", active=true,  separator="-")
//! Index 2: Slot  (parent=0,  char="",  active=false, separator="-")
//! ```
//!
//! This keeps reactivity fine-grained (each cell is a stable slot that never
//! moves) and makes teardown a matter of releasing one index tree.

mod registry;
pub mod cells;

pub use registry::*;
