//! Theme for the FactFinder TUI.
//!
//! - `palette` - Raw color constants
//! - `styles` - Semantic style builder functions
//! - `icons` - Icon slots resolved from the configured `IconMode`

pub mod icons;
pub mod palette;
pub mod styles;
