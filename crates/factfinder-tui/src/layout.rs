//! Screen layout for the panel
//!
//! Header on top, link status below it, then the provider selector beside the
//! two snapshot tables, and a one-line footer.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the provider selector column
const SELECTOR_WIDTH: u16 = 30;

/// Screen areas for the panel layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and keybinding hints
    pub header: Rect,

    /// Emulator and split-tracker status rows
    pub status: Rect,

    /// Provider selector list
    pub selector: Rect,

    /// Raw tracked values table
    pub state_table: Rect,

    /// Watches table
    pub watches_table: Rect,

    /// Fault line / bridge summary
    pub footer: Rect,
}

/// Split the terminal area into the panel's regions
pub fn create(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(3), // Header: border + title + border
        Constraint::Length(4), // Status: border + two rows + border
        Constraint::Min(4),    // Body
        Constraint::Length(1), // Footer
    ])
    .split(area);

    let body = Layout::horizontal([Constraint::Length(SELECTOR_WIDTH), Constraint::Min(10)])
        .split(rows[2]);

    let tables =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(body[1]);

    ScreenAreas {
        header: rows[0],
        status: rows[1],
        selector: body[0],
        state_table: tables[0],
        watches_table: tables[1],
        footer: rows[3],
    }
}
