//! Logging setup for hosts embedding the engine.
//!
//! The engine itself only emits `tracing` events. Hosts call [`init`] once at
//! startup to get console output plus a daily-rotating log file.
//!
//! ```no_run
//! tabscrub::logging::init(None).expect("Failed to initialize logging");
//! tracing::info!("Editor started");
//! ```

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Default log directory: `<data_dir>/tabscrub/logs`.
///
/// # Errors
///
/// Returns error if the platform data directory is unknown or cannot be created.
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join("tabscrub").join("logs");
    ensure_dir(&log_dir)?;
    Ok(log_dir)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    Ok(())
}

fn build_file_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("tabscrub")
        .filename_suffix("log")
        .build(log_dir)
        .context("Failed to create log file appender")
}

/// Installs a console layer and a rotating file layer.
///
/// Level defaults to INFO and can be overridden with `RUST_LOG`. When
/// `log_dir` is `None` the platform data directory is used; if that cannot be
/// resolved, logging continues on the console only.
///
/// # Errors
///
/// Returns error if the filter is invalid, the given directory cannot be
/// created, or a global subscriber is already installed.
pub fn init(log_dir: Option<&Path>) -> Result<()> {
    let log_dir = match log_dir {
        Some(dir) => {
            ensure_dir(dir)?;
            Some(dir.to_path_buf())
        }
        None => get_log_dir().ok(),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true);

    let file_layer = match &log_dir {
        Some(dir) => Some(
            fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(build_file_appender(dir)?),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    match log_dir {
        Some(dir) => tracing::info!("Logging initialized, log directory: {}", dir.display()),
        None => tracing::info!("Logging initialized (console only)"),
    }

    Ok(())
}

/// Path of today's log file inside `log_dir`.
pub fn current_log_path(log_dir: &Path) -> PathBuf {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    log_dir.join(format!("tabscrub.{today}.log"))
}
