//! factfinder-tui - Terminal UI for the FactFinder panel
//!
//! Renders the panel state owned by the `Engine` from factfinder-app with
//! ratatui, and feeds crossterm key events back into it as messages.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
