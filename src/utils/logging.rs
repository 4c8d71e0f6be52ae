/// Tracing setup
///
/// The terminal belongs to the TUI, so log output goes to a file in the data
/// directory. Level comes from SYSMON_LOG (default "info").

use anyhow::{anyhow, Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV_VAR: &str = "SYSMON_LOG";
pub const LOG_FILE: &str = "sysmon.log";

fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Install the global subscriber writing to `<dir>/sysmon.log`.
/// Returns the log file path.
pub fn init_file_logging(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(LOG_FILE);
    let file = open_log_file(&path)?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(build_filter("info"))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(path)
}

/// Stderr logging for one-shot CLI commands (default level "warn")
pub fn init_stderr_logging() -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(build_filter("warn"))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
