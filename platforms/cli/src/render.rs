//! Colored rendering of a machine's tape window for the terminal: a head
//! marker line above the tape, blanks dimmed, the current state alongside.
//! Rendering only reads the engine's accessors; it never touches the tape.

use crossterm::style::Stylize;
use tally::Machine;

/// Formats one frame: the head marker, the tape window around the head, and
/// the current state with the step count.
pub(crate) fn frame(machine: &Machine, radius: usize) -> String {
    let cells = machine.tape_window(radius);
    let blank = machine.config().blank();

    let mut tape = String::from("... ");
    for &symbol in &cells {
        if symbol == blank {
            tape.push_str(&format!("{} ", symbol.dark_grey()));
        } else {
            tape.push_str(&format!("{} ", symbol.green()));
        }
    }
    tape.push_str("...");

    // "... " is four columns wide and each cell takes two; the head sits on
    // the middle cell.
    let marker_column = 4 + 2 * radius;
    let marker = format!("{}{}", " ".repeat(marker_column), "v".yellow());
    let status = format!(
        "{} ({}, step {})",
        tape,
        machine.state().blue(),
        machine.step_count()
    );

    format!("{}\n{}", marker, status)
}
