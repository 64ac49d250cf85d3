//! Configuration file parsing for the FactFinder panel
//!
//! Settings live in `<config_dir>/factfinder/config.toml`; every field has a
//! default, so the file is optional.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, read_settings, APP_DIR, CONFIG_FILENAME};
pub use types::*;
