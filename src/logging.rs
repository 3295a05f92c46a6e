//! tracing subscriber setup.
//!
//! The one-shot commands log to stderr. The interactive front-end owns the
//! terminal, so it logs to a file instead. `RUST_LOG` overrides the
//! verbosity-derived filter in both cases.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter directive for a `-v` count.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "ellinet_search=warn",
        1 => "ellinet_search=info",
        2 => "ellinet_search=debug",
        _ => "ellinet_search=trace,reqwest=debug",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)))
}

/// Log to stderr.
pub fn init_stderr(verbosity: u8) {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true);

    if tracing_subscriber::registry().with(env_filter(verbosity)).with(fmt_layer).try_init().is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

/// Log to `path`, appending. Parent directories are created.
pub fn init_file(verbosity: u8, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    if tracing_subscriber::registry().with(env_filter(verbosity)).with(fmt_layer).try_init().is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
    Ok(())
}
