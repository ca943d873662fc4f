//! Logging bootstrap.
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{Result, RuntimeError};

/// Installs the global subscriber: `RUST_LOG`-filtered (INFO and up by
/// default), writing to `{log_dir}/{session_id}/session.log` and optionally to
/// stderr.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init(log_dir: &Path, session_id: &str, stderr: bool) -> Result<WorkerGuard> {
    let session_log_dir = log_dir.join(session_id);
    std::fs::create_dir_all(&session_log_dir)
        .map_err(|e| RuntimeError::Logging(format!("{}: {e}", session_log_dir.display())))?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "session.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = stderr.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| RuntimeError::Logging(e.to_string()))?;

    tracing::info!(target: "runtime::logging", session = session_id, "logging initialized");
    tracing::info!(
        target: "runtime::logging",
        "log file: {}/session.log",
        session_log_dir.display()
    );

    Ok(guard)
}
