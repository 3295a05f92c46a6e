use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory name used below the platform config and cache directories.
pub const APP_DIR_NAME: &str = "ellinet-search";

/// Environment variable overriding the configured service host.
pub const HOST_ENV_VAR: &str = "ELLINET_SEARCH_HOST";

/// Default config file location (`<config_dir>/ellinet-search/config.toml`)
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(config_dir.join(APP_DIR_NAME).join("config.toml"))
}

/// Log file used by the interactive front-end, whose stderr is the screen
pub fn default_log_path() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir().context("Could not determine the user cache directory")?;
    Ok(cache_dir.join(APP_DIR_NAME).join("ellinet-search.log"))
}

/// Host override from the environment, ignoring blank values
pub fn host_from_env() -> Option<String> {
    env::var(HOST_ENV_VAR).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
