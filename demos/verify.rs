//! Verify Example - live six-digit code prompt
//!
//! Runs the field against a real terminal:
//! - Raw mode with bracketed paste capture
//! - Polled events routed through the input bridge
//! - Single-line repaint in place
//!
//! Type or paste the code; Escape cancels.
//!
//! Run with: cargo run --example verify

use std::io::{self, Write};
use std::time::Duration;

use crossterm::terminal;
use spark_signals::{Signal, signal};

use otp_field::render::ansi;
use otp_field::state::input;
use otp_field::{
    EMPTY_SLOT, InputEvent, OtpFieldProps, Rgba, SlotStyle, field_row_input, otp_field, paint_row,
    render_row, reset_registry,
};

const CODE_LEN: usize = 6;

fn main() -> io::Result<()> {
    reset_registry();

    let code = signal(String::new());

    let _cleanup = otp_field(OtpFieldProps {
        id: Some("verify".to_string()),
        num_inputs: CODE_LEN,
        value: Some(code.clone()),
        is_input_num: true,
        should_auto_focus: true,
        separator: Some(" ".to_string()),
        placeholder: Some('_'),
        focus_style: Some(SlotStyle::fg(Rgba::CYAN)),
        ..Default::default()
    });

    terminal::enable_raw_mode()?;
    input::enable_paste_capture()?;
    let mut stdout = io::stdout();
    ansi::cursor_hide(&mut stdout)?;
    write!(stdout, "Enter the {CODE_LEN}-digit code (Escape cancels)\r\n")?;

    let entered = run(&mut stdout, &code);

    ansi::cursor_show(&mut stdout)?;
    write!(stdout, "\r\n")?;
    stdout.flush()?;
    input::disable_paste_capture()?;
    terminal::disable_raw_mode()?;

    match entered? {
        Some(code) => println!("code entered: {code}"),
        None => println!("cancelled"),
    }
    Ok(())
}

fn run(stdout: &mut io::Stdout, code: &Signal<String>) -> io::Result<Option<String>> {
    loop {
        repaint(stdout)?;

        let current = code.get();
        if current.len() == CODE_LEN && !current.contains(EMPTY_SLOT) {
            return Ok(Some(current));
        }

        match input::poll_event(Duration::from_millis(16))? {
            Some(InputEvent::Key(key)) if key.key == "Escape" => return Ok(None),
            Some(event) => {
                input::route_event(event);
            }
            None => {}
        }
    }
}

fn repaint(stdout: &mut io::Stdout) -> io::Result<()> {
    ansi::cursor_column_zero(stdout)?;
    ansi::erase_line(stdout)?;
    paint_row(stdout, &render_row(&field_row_input(0)))?;
    stdout.flush()
}
