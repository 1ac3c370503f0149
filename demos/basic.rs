//! Basic Example - driving the field without a terminal
//!
//! This example demonstrates basic usage of the otp-field control:
//! - Mounting a field with a separator and placeholder
//! - Typing, pasting, and navigating via synthetic events
//! - Reading the value signal and the rendered row back out
//!
//! Run with: cargo run --example basic

use std::rc::Rc;

use spark_signals::{Signal, signal};

use otp_field::state::{clipboard, input, keyboard};
use otp_field::{
    KeyboardEvent, Modifiers, OtpFieldProps, field_row_input, otp_field, render_row,
    reset_registry, slot_at_column,
};

fn main() {
    // Reset to ensure clean state
    reset_registry();

    println!("=== otp-field Basic Example ===\n");

    let code = signal(String::new());

    // The field allocates index 0, its six slots indices 1-6
    let _cleanup = otp_field(OtpFieldProps {
        id: Some("otp".to_string()),
        num_inputs: 6,
        value: Some(code.clone()),
        on_change: Some(Rc::new(|code: &str| println!("  on_change -> {code:?}"))),
        is_input_num: true,
        should_auto_focus: true,
        separator: Some("-".to_string()),
        placeholder: Some('_'),
        ..Default::default()
    });

    println!("Typing 4, 2, 7:");
    keyboard::dispatch(KeyboardEvent::new("4"));
    keyboard::dispatch(KeyboardEvent::new("2"));
    keyboard::dispatch(KeyboardEvent::new("7"));
    print_state(&code);

    println!("\nLetters are masked in numeric mode:");
    keyboard::dispatch(KeyboardEvent::new("x"));
    print_state(&code);

    println!("\nPasting \"119\" fills from the active slot onward:");
    input::dispatch_paste("119");
    print_state(&code);

    println!("\nHome, then overtyping the first slot:");
    keyboard::dispatch(KeyboardEvent::new("Home"));
    keyboard::dispatch(KeyboardEvent::new("9"));
    print_state(&code);

    println!("\nBackspace clears and steps back:");
    keyboard::dispatch(KeyboardEvent::new("Backspace"));
    print_state(&code);

    println!("\nCtrl+V distributes the internal clipboard:");
    keyboard::dispatch(KeyboardEvent::new("Home"));
    clipboard::copy("314159");
    keyboard::dispatch(KeyboardEvent::with_modifiers("v", Modifiers::ctrl()));
    print_state(&code);

    println!("\nHit testing the rendered row:");
    let row = render_row(&field_row_input(0));
    for column in [0u16, 1, 2, 10] {
        println!("  column {column} -> slot {:?}", slot_at_column(&row, column));
    }

    println!("\n=== Example Complete ===");
}

fn print_state(code: &Signal<String>) {
    let row_input = field_row_input(0);
    let row = render_row(&row_input);
    println!(
        "  value={:?} active_slot={} row=\"{}\"",
        code.get(),
        row_input.active,
        row.line()
    );
}
