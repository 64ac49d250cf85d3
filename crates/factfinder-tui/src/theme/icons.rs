//! Icon set for the TUI.
//!
//! `IconSet` resolves each icon slot at runtime from the configured `IconMode`.

use factfinder_app::config::IconMode;

/// Runtime icon resolver.
#[derive(Debug, Clone, Copy)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Link status indicator
    pub fn dot(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f111}", // nf-fa-circle
            IconMode::Unicode => "●",
        }
    }

    pub fn alert(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f071}", // nf-fa-warning
            IconMode::Unicode => "!",
        }
    }

    pub fn check(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f00c}", // nf-fa-check
            IconMode::Unicode => "✓",
        }
    }

    pub fn pointer(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f054}", // nf-fa-chevron_right
            IconMode::Unicode => "›",
        }
    }

    pub fn clock(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f017}", // nf-fa-clock_o
            IconMode::Unicode => "@",
        }
    }

    pub fn refresh(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f021}", // nf-fa-refresh
            IconMode::Unicode => "↻",
        }
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}
