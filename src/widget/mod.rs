//! Widget - OTP entry components.
//!
//! This module provides the two components of the control:
//! - [`otp_field`] - The field: owns the active index, feeds the state
//!   machine, mounts one slot per position
//! - [`slot`] - A single-character cell: displays, forwards events, holds
//!   no value state
//!
//! # Architecture
//!
//! Components are indices into parallel arrays. Each component:
//! 1. Allocates an index from the registry
//! 2. Binds props into the cell arrays (preserving reactivity!)
//! 3. Registers focus/keyboard/paste handlers
//! 4. Returns a cleanup function
//!
//! # Reactivity
//!
//! Props can be:
//! - Static values: `num_inputs: 6`
//! - Signals: `value: Some(code_signal)` (stays connected!)
//! - Getters: `is_disabled: Some(PropValue::Getter(...))`
//!
//! The key is to pass props directly - don't extract values before binding!
//!
//! ```ignore
//! // CORRECT - signal stays connected
//! otp_field(OtpFieldProps { value: Some(code), ..Default::default() });
//!
//! // WRONG - extracts value, breaks the controlled contract
//! otp_field(OtpFieldProps { value: Some(signal(code.get())), ..Default::default() });
//! ```

mod field;
mod slot;
mod types;

pub use field::{field_row_input, otp_field};
pub use slot::slot;
pub use types::*;
