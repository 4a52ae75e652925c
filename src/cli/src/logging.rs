use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    prelude::*,
    EnvFilter,
};

pub const LOG_FILE_NAME: &str = "tesmon.log";

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// level.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(log_dir) => {
            let file_appender = RollingFileAppender::new(Rotation::NEVER, log_dir, LOG_FILE_NAME);
            let file_layer = fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_target(true)
                .with_level(true)
                .with_timer(SystemTime)
                .with_ansi(false)
                .with_writer(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .try_init()
                .context("Failed to set tracing subscriber")?;

            tracing::debug!(
                "Logging system initialized. Writing to {}",
                log_dir.join(LOG_FILE_NAME).display()
            );
        }
        None => {
            let stderr_layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .context("Failed to set tracing subscriber")?;
        }
    }

    Ok(())
}
