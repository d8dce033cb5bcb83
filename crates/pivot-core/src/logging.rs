//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/pivot/logs/`, never to the terminal.
/// Log level is controlled by the `PIVOT_LOG` environment variable.
///
/// # Examples
/// ```bash
/// PIVOT_LOG=debug pivot
/// PIVOT_LOG=pivot_app::sync=trace pivot
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "pivot.log");

    let env_filter =
        EnvFilter::try_from_env("PIVOT_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Pivot console starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Filter used when `PIVOT_LOG` is unset: our crates at info, everything else at warn.
fn default_filter() -> &'static str {
    "pivot=info,pivot_core=info,pivot_api=info,pivot_app=info,pivot_tui=info,warn"
}

fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("pivot").join("logs")
}

/// Path of the active log file (shown in the headless startup event)
pub fn current_log_file() -> PathBuf {
    get_log_directory().join("pivot.log")
}
