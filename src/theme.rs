//! Colors for the process table and detail popup.
//!
//! btop-style accents: a distinct border color per surface, state-coded
//! process rows.

use ratatui::style::Color;

/// Main frame border.
pub const FRAME: Color = Color::Rgb(100, 200, 255);
/// Header row and sort-column emphasis.
pub const HEADER: Color = Color::Rgb(220, 180, 100);
/// Detail popup border.
pub const POPUP: Color = Color::Rgb(100, 255, 150);
/// Field labels inside the detail popup.
pub const LABEL: Color = Color::Rgb(100, 200, 255);
/// PID column.
pub const PID: Color = Color::DarkGray;
/// Resident memory column.
pub const MEM: Color = Color::Rgb(180, 120, 255);
/// Command line column.
pub const COMMAND: Color = Color::White;
/// Selected row background.
pub const SELECTION_BG: Color = Color::DarkGray;

/// Row color for a process state character.
pub fn state_color(state: char) -> Color {
    match state {
        'R' => Color::Rgb(100, 255, 100),       // running
        'S' | 'I' => Color::Rgb(120, 120, 140), // sleeping / idle
        'D' => Color::Rgb(255, 200, 100),       // disk wait
        'Z' => Color::Rgb(255, 80, 80),         // zombie
        'T' | 't' => Color::Rgb(255, 150, 100), // stopped / traced
        _ => Color::Rgb(180, 180, 180),
    }
}
