//! Logging for the browser session.
//!
//! Output goes to a daily rotating file so it never corrupts the terminal
//! UI. `LAZYHUB_LOG` picks the filter, falling back to `RUST_LOG` and then
//! to `lazyhub=info,warn`. `LAZYHUB_LOG=lazyhub=debug` also logs every page
//! request and key-driven state change.

use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Environment variable with the log filter, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "LAZYHUB_LOG";

const DEFAULT_LOG_FILTER: &str = "lazyhub=info,warn";
const LOG_FILE: &str = "lazyhub.log";

/// Install the file logger and return the directory it writes to.
///
/// Logs are stored in the platform-specific local data directory, e.g.
/// `~/.local/share/lazyhub/logs/` on Linux.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if a global subscriber is already set.
pub fn init() -> anyhow::Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .context("Could not determine local data directory")?
        .join("lazyhub")
        .join("logs");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let file_layer = fmt::layer()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter_from_env())
        .try_init()?;

    info!(version = env!("CARGO_PKG_VERSION"), "LazyHub starting up");
    debug!(log_dir = %dir.display(), "Log directory");
    Ok(dir)
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Record which repository this session browses and how it talks to GitHub.
pub fn session_started(repository: &str, api_base_url: &str, authenticated: bool) {
    info!(repository, api = api_base_url, authenticated, "Browsing issues");
}

/// Record the end of the session and how many issues were handed back.
pub fn shutdown(fixed_issues: usize) {
    info!(fixed_issues, "LazyHub shutting down");
}
