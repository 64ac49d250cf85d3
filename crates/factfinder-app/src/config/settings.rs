//! Settings file loading

use std::path::{Path, PathBuf};

use factfinder_core::prelude::*;

use super::types::Settings;

/// Directory under the platform config dir holding our files.
pub const APP_DIR: &str = "factfinder";

pub const CONFIG_FILENAME: &str = "config.toml";

/// `<config_dir>/factfinder/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Read and parse the settings file at `path`.
///
/// A missing file is [`Error::ConfigNotFound`]; TOML that doesn't match
/// [`Settings`] is [`Error::Config`].
pub fn read_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str(&content).map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
}

/// Load settings from `path`, or from [`default_config_path`] when `None`.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => {
                debug!("No platform config directory, using defaults");
                return Settings::default();
            }
        },
    };

    match read_settings(&config_path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            settings
        }
        Err(Error::ConfigNotFound { path }) => {
            debug!("No config file at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            Settings::default()
        }
    }
}
