//! Semantic style builders for the FactFinder panel.

use factfinder_core::ConnectionStatus;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn error_text() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::KEY_HINT)
}

/// "Black on Cyan" - the highlighted row of a list
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

// --- Link status mapping ---

/// Indicator color for a link status.
///
/// Total over [`ConnectionStatus`]; every status has exactly one color.
pub fn status_indicator(status: ConnectionStatus) -> Style {
    let color = match status {
        ConnectionStatus::Disconnected => palette::STATUS_RED,
        ConnectionStatus::Connected => palette::STATUS_GREEN,
        ConnectionStatus::Reconnecting => palette::STATUS_YELLOW,
        ConnectionStatus::WaitingForGame => palette::STATUS_ORANGE,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
