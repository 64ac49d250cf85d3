//! Abstract input key event, independent of terminal library.
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary so
//! the update handlers never depend on terminal types.

/// Key press relevant to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key
    Char(char),
    /// Character with Ctrl modifier
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Home,
    End,

    // Action keys
    Enter,
    Esc,
}
