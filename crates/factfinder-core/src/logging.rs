//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/factfinder/logs/` (platform equivalent
/// elsewhere). The terminal belongs to the panel, so nothing is logged to it.
/// Log level is controlled by `FACTFINDER_LOG` environment variable.
///
/// # Examples
/// ```bash
/// FACTFINDER_LOG=debug factfinder
/// FACTFINDER_LOG=factfinder_bridge=trace factfinder
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "factfinder.log");

    let env_filter = EnvFilter::try_from_env("FACTFINDER_LOG")
        .unwrap_or_else(|_| {
            EnvFilter::new(
                "warn,factfinder=info,factfinder_app=info,factfinder_bridge=info,factfinder_tui=info",
            )
        });

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
    tracing::info!("FactFinder panel starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Directory the daily `factfinder.log.<date>` files are written to
pub fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("factfinder").join("logs")
}
