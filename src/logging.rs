//! Logging setup.
//!
//! While the keypad is on screen the terminal is in raw mode, so events
//! are only written to a file. Without `--log-file` no subscriber is
//! installed and `tracing` macros are no-ops.

use crate::config::LogConfig;
use crate::error::{Error, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber described by `config`.
///
/// The returned guard flushes the background writer when dropped; keep it
/// alive until the program exits.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let Some(path) = config.file.as_deref() else {
        return Ok(None);
    };

    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::Logging(format!("invalid filter {:?}: {e}", config.level)))?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => std::path::Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Logging(format!("{} is not a file path", path.display())))?;
    std::fs::create_dir_all(directory)?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_names(true),
        )
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!(path = %path.display(), level = %config.level, "logging started");
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_no_file_installs_nothing() {
        let guard = init_logging(&LogConfig::default()).unwrap();
        assert!(guard.is_none());
    }

    #[test]
    fn test_invalid_filter() {
        let config = LogConfig {
            file: Some(PathBuf::from("calci-test.log")),
            level: String::from("calci=notalevel"),
        };
        assert!(matches!(init_logging(&config), Err(Error::Logging(_))));
    }
}
