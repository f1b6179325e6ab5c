//! Centralized path definitions for sourcelevel
//!
//! ```text
//! ~/.config/sourcelevel/
//! └── config.toml               # Policy source and credentials
//! ```

use std::path::PathBuf;

/// Global config directory name
const GLOBAL_DIR: &str = "sourcelevel";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global sourcelevel directory.
///
/// Returns `~/.config/sourcelevel/` on Linux, the platform config
/// directory elsewhere.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
