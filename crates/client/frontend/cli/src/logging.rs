//! File logging for the terminal host.
//!
//! The terminal owns stdout/stderr while the board is on screen, so every
//! session logs to its own file instead.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::CliConfig;

pub const LOG_FILE: &str = "client.log";

/// Installs the global subscriber writing to `<log_dir>/<session>/client.log`.
///
/// The returned guard flushes the writer on drop; keep it alive for the
/// lifetime of the process.
pub fn setup_logging(config: &CliConfig) -> Result<(WorkerGuard, PathBuf)> {
    let session_id = config.session_id.clone().unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{timestamp}")
    });

    let session_log_dir = config.log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    let log_file = session_log_dir.join(LOG_FILE);
    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!("log file: {}", log_file.display());

    Ok((guard, log_file))
}
