//! Colour choices for terminal tables.

use crate::models::status::Status;
use ansi_term::Colour;

/// Paint a session cell according to its status code; other text is left plain.
pub fn paint_status_cell(cell: &str) -> String {
    match Status::from_code(cell) {
        Some(Status::Present) => Colour::Green.paint(cell).to_string(),
        Some(Status::Excused) => Colour::Yellow.paint(cell).to_string(),
        Some(Status::Absent) => Colour::Red.paint(cell).to_string(),
        None if cell.trim().is_empty() => Colour::Fixed(8).paint("·").to_string(),
        None => cell.to_string(),
    }
}

/// Remaining hours: green once the requirement is met, red otherwise.
pub fn paint_remaining(value: f64, text: &str) -> String {
    if value <= 0.0 {
        Colour::Green.paint(text).to_string()
    } else {
        Colour::Red.paint(text).to_string()
    }
}
