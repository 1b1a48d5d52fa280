//! # Logging
//!
//! `tracing` subscriber setup shared by the Sightline front-ends.
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: filter directives (e.g. `debug`, `sightline_core=trace`)
//! - `SIGHTLINE_LOG_FORMAT`: `pretty` (default) or `json`
//! - `SIGHTLINE_LOG_FILE`: also write logs to this file
//!
//! ## Example
//!
//! ```rust,no_run
//! use sightline_utils::init_logging;
//!
//! let _guard = init_logging()?;
//! tracing::info!("console started");
//! # Ok::<(), sightline_utils::LoggingError>(())
//! ```
//!
//! Keep the returned [`LogGuard`] alive for as long as logs should be written;
//! dropping it flushes and stops the background file writer.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use chrono::Utc;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const FORMAT_VAR: &str = "SIGHTLINE_LOG_FORMAT";
const FILE_VAR: &str = "SIGHTLINE_LOG_FILE";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat
{
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat
{
    /// Format named by `SIGHTLINE_LOG_FORMAT`, or the default when unset.
    ///
    /// ## Errors
    ///
    /// `InvalidFormat` if the variable holds an unknown format.
    pub fn from_env() -> Result<Self, LoggingError>
    {
        match env::var(FORMAT_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" => Ok(Self::Pretty),
            "json" | "prod" => Ok(Self::Json),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
        }
    }
}

/// Log level accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel
{
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "dbg" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

/// Keeps file logging alive
///
/// Returned by every `init_*` function. Dropping it flushes pending file
/// output.
#[derive(Debug)]
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard
{
    file: Option<PathBuf>,
    _worker: Option<WorkerGuard>,
}

impl LogGuard
{
    /// File being written to, if any.
    #[must_use]
    pub fn file(&self) -> Option<&Path>
    {
        self.file.as_deref()
    }
}

/// Initialize console logging configured from the environment
///
/// ## Errors
///
/// - `InvalidFormat`: `SIGHTLINE_LOG_FORMAT` is not a known format
/// - `InitializationFailed`: a global subscriber is already installed
pub fn init_logging() -> Result<LogGuard, LoggingError>
{
    init(LogFormat::from_env()?, None)
}

/// Initialize console logging at an explicit level
///
/// `RUST_LOG` is ignored; `SIGHTLINE_LOG_FILE` is still honoured.
///
/// ## Errors
///
/// `InitializationFailed` if a global subscriber is already installed.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<LogGuard, LoggingError>
{
    init(format, Some(level.into()))
}

/// Initialize file-only logging for the terminal UI
///
/// Anything written to stdout would corrupt the UI, so events go to
/// `~/.sightline/YYYY-MM-DD-sightline-tui.log` (or the system temp directory
/// when `HOME` is unset). With no explicit level `RUST_LOG` applies.
///
/// ## Errors
///
/// - `FileError`: the log directory cannot be created
/// - `InitializationFailed`: a global subscriber is already installed
pub fn init_logging_for_tui(level: Option<LogLevel>) -> Result<LogGuard, LoggingError>
{
    let today = Utc::now().format("%Y-%m-%d").to_string();
    let home = env::var_os("HOME").map(PathBuf::from);
    let path = tui_log_file(home.as_deref(), &today);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let (writer, worker) = file_writer(&path);
    let layer = format_layer(LogFormat::Pretty, writer, false, env_filter(level.map(Into::into)));
    install(vec![layer])?;

    Ok(LogGuard {
        file: Some(path),
        _worker: Some(worker),
    })
}

/// Where the terminal UI writes its log for `date`.
#[must_use]
pub fn tui_log_file(home: Option<&Path>, date: &str) -> PathBuf
{
    let file = format!("{date}-sightline-tui.log");
    match home {
        Some(home) => home.join(".sightline").join(file),
        None => env::temp_dir().join(file),
    }
}

fn init(format: LogFormat, level: Option<Level>) -> Result<LogGuard, LoggingError>
{
    let mut layers = vec![format_layer(format, io::stdout, true, env_filter(level))];

    let mut guard = LogGuard {
        file: None,
        _worker: None,
    };
    if let Some(path) = env::var_os(FILE_VAR).map(PathBuf::from) {
        let (writer, worker) = file_writer(&path);
        layers.push(format_layer(format, writer, false, env_filter(level)));
        guard = LogGuard {
            file: Some(path),
            _worker: Some(worker),
        };
    }

    install(layers)?;
    Ok(guard)
}

/// Explicit level first, then `RUST_LOG`, then `info`.
fn env_filter(level: Option<Level>) -> EnvFilter
{
    match level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string())),
    }
}

fn file_writer(path: &Path) -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard)
{
    let dir = path.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let name = path.file_name().unwrap_or_default();
    // Append to exactly the named file; no rotation.
    tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name))
}

fn format_layer<W>(format: LogFormat, writer: W, ansi: bool, filter: EnvFilter) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339());

    match format {
        LogFormat::Pretty => layer.with_ansi(ansi).with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn install(layers: Vec<BoxedLayer>) -> Result<(), LoggingError>
{
    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}. Use 'pretty' or 'json'")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Invalid log level: {0}. Use 'error', 'warn', 'info', 'debug', or 'trace'")]
    InvalidLevel(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_log_format_from_str()
    {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("prod").unwrap(), LogFormat::Json);
        assert!(matches!(LogFormat::from_str("xml"), Err(LoggingError::InvalidFormat(_))));
    }

    #[test]
    fn test_log_level_from_str()
    {
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("dbg").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert!(matches!(LogLevel::from_str("loud"), Err(LoggingError::InvalidLevel(_))));
    }

    #[test]
    fn test_log_level_to_tracing_level()
    {
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_tui_log_file_location()
    {
        let path = tui_log_file(Some(Path::new("/home/dev")), "2026-10-16");
        assert_eq!(path, PathBuf::from("/home/dev/.sightline/2026-10-16-sightline-tui.log"));

        let fallback = tui_log_file(None, "2026-10-16");
        assert!(fallback.ends_with("2026-10-16-sightline-tui.log"));
    }

    #[test]
    fn test_error_messages_name_the_value()
    {
        let err = LogLevel::from_str("loud").unwrap_err();
        assert!(err.to_string().contains("loud"));
    }
}
