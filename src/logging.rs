use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::model::LogConfig;

/// Environment variable overriding the configured log filter
pub const LOG_ENV: &str = "MAILCELL_LOG";

/// Where log events go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    /// Standard error, for one-shot commands
    Stderr,
    /// The configured log file. The TUI owns the terminal, so without a file
    /// it does not log at all.
    File,
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to initialize tracing subscriber: {0}")]
    Init(String),
}

/// Filter from `MAILCELL_LOG`, else `default_level`, else `info`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. The returned guard flushes the file sink
/// on drop and must be held for as long as events should be written.
pub fn init_tracing(config: &LogConfig, sink: Sink) -> Result<Option<WorkerGuard>, LogError> {
    let filter = env_filter(&config.level);

    match sink {
        Sink::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
                .try_init()
                .map_err(|e| LogError::Init(e.to_string()))?;
            Ok(None)
        }
        Sink::File => {
            let Some(path) = config.file.as_ref() else {
                return Ok(None);
            };
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LogError::Open {
                    path: path.clone(),
                    source: e,
                })?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .compact()
                .try_init()
                .map_err(|e| LogError::Init(e.to_string()))?;
            Ok(Some(guard))
        }
    }
}
