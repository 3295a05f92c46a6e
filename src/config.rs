//! Settings resolution.
//!
//! Precedence, highest first: command-line flags, the `ELLINET_SEARCH_HOST`
//! environment variable, the TOML config file, built-in defaults.
//!
//! ```toml
//! host = "http://localhost"
//! page_size = 10
//! indices = ["edoweb", "ellinet"]
//! timeout_secs = 30
//! ```

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::environment::{default_config_path, host_from_env};

pub const DEFAULT_HOST: &str = "http://localhost";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound for `page_size`; larger pages are rejected rather than sent.
const MAX_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub host: String,
    pub page_size: usize,
    /// Indices ticked by default once discovered.
    pub indices: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            indices: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn page_size(&self) -> NonZeroUsize {
        // validate() rejects zero; fall back rather than panic if bypassed
        NonZeroUsize::new(self.page_size).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("host must not be empty");
        }
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.page_size > MAX_PAGE_SIZE {
            bail!("page_size must be at most {} (got {})", MAX_PAGE_SIZE, self.page_size);
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        Ok(())
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub page_size: Option<usize>,
    pub indices: Vec<String>,
}

/// Parse a config file.
pub fn load_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Merge the layers in precedence order and validate the result.
pub fn resolve(
    file: Option<Settings>,
    env_host: Option<String>,
    overrides: &Overrides,
) -> Result<Settings> {
    let mut settings = file.unwrap_or_default();
    if let Some(host) = env_host {
        settings.host = host;
    }
    if let Some(host) = &overrides.host {
        settings.host = host.clone();
    }
    if let Some(page_size) = overrides.page_size {
        settings.page_size = page_size;
    }
    if !overrides.indices.is_empty() {
        settings.indices = overrides.indices.clone();
    }

    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

/// Load settings for this process.
///
/// An explicit `config_path` must exist; the default location is optional.
pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    let file = match config_path {
        Some(path) => Some(load_file(path)?),
        None => match default_config_path() {
            Ok(path) if path.is_file() => Some(load_file(&path)?),
            _ => None,
        },
    };
    let settings = resolve(file, host_from_env(), overrides)?;
    debug!(host = %settings.host, page_size = settings.page_size, "Resolved settings.");
    Ok(settings)
}
