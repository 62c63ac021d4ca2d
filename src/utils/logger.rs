use crate::utils::error::{Result, SwapiError};
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::Span;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    /// One JSON object per line, for log shippers.
    Json,
}

/// How often the log file rolls over to a new, date-suffixed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    /// Single file, never rolled.
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Minutely => Rotation::MINUTELY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

pub const DEFAULT_MAX_LOG_FILES: usize = 3;

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
    pub rotation: LogRotation,
    /// Rolled files kept on disk, older ones are deleted.
    pub max_files: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file: None,
            rotation: LogRotation::Daily,
            max_files: DEFAULT_MAX_LOG_FILES,
        }
    }
}

/// Keeps the process-wide subscriber alive. Dropping it flushes the console
/// and drains the background file writer.
#[must_use = "logging is flushed when the guard is dropped"]
pub struct LoggerGuard {
    file_worker: Option<WorkerGuard>,
}

impl LoggerGuard {
    pub fn handle(&self, component: &'static str) -> LogHandle {
        LogHandle::new(component)
    }

    pub fn writes_file(&self) -> bool {
        self.file_worker.is_some()
    }
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        tracing::debug!("Logger shutting down");
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        // Joins the writer thread after pending lines hit the file.
        drop(self.file_worker.take());
    }
}

/// Component-scoped logging handle. Work done by a component runs inside its span.
#[derive(Debug, Clone)]
pub struct LogHandle {
    span: Span,
}

impl LogHandle {
    pub fn new(component: &'static str) -> Self {
        Self {
            span: tracing::info_span!("component", name = component),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

/// Rolling, non-blocking writer for `path`. The parent directory is created if missing.
pub fn rolling_writer(
    path: &Path,
    rotation: LogRotation,
    max_files: usize,
) -> Result<(NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| SwapiError::InvalidConfigValue {
            field: "log_file".to_string(),
            value: path.display().to_string(),
            reason: "Path must end in a file name".to_string(),
        })?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&directory)?;

    let appender = RollingFileAppender::builder()
        .rotation(rotation.into())
        .filename_prefix(file_name)
        .max_log_files(max_files.max(1))
        .build(&directory)
        .map_err(|e| SwapiError::Config {
            message: format!("Cannot open log file {}: {}", path.display(), e),
        })?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Install the global subscriber. May only succeed once per process.
pub fn init(settings: &LogSettings) -> Result<LoggerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "swapi_explorer={level},swapi_api={level},swapi_cli={level},tower_http={level},warn",
            level = settings.level
        ))
    });

    let console = match settings.format {
        LogFormat::Compact => fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .compact()
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .boxed(),
    };

    let (file, file_worker) = match &settings.file {
        Some(path) => {
            let (writer, worker) = rolling_writer(path, settings.rotation, settings.max_files)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(worker))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .with(filter)
        .try_init()
        .map_err(|e| SwapiError::Config {
            message: format!("Logger already initialised: {}", e),
        })?;

    Ok(LoggerGuard { file_worker })
}
