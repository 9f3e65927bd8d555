//! # Logging Utilities
//!
//! Ready-made loggers that render every event through a [`TemplateFormat`].
//!
//! A [`Logger`] is a `tracing` dispatcher with exactly one formatting layer:
//! - Output goes to standard error (or any `MakeWriter` given to the builder)
//! - No other layers are attached
//! - Callers are captured (source file and line)
//! - Level is `DEBUG` when debug is enabled, `INFO` otherwise
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loglines_utils::create_logger;
//!
//! create_logger(false, "2006-01-02 15:04:05").init().expect("Failed to initialize logging");
//!
//! tracing::info!(user_id = 12345, action = "login", "User logged in");
//! ```
//!
//! ## Environment Variables
//!
//! Read by [`init_logging`]:
//!
//! - `LOGLINES_DEBUG`: `true`/`1` to log at `DEBUG` instead of `INFO`
//! - `RUST_LOG`: filter directives (e.g. `my_crate=trace`); override the level when set
//! - `LOGLINES_TEMPLATE`, `LOGLINES_TIMESTAMP_FORMAT`, `LOGLINES_TRUNCATE_LEVEL`:
//!   see [`FormatterConfig::from_env`]

use std::{env, io};

use loglines_core::FormatterConfig;
use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::format::TemplateFormat;

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid boolean flag in the environment
    #[error("Invalid value for {name}: '{value}' (expected true/false, 1/0, yes/no or on/off)")]
    InvalidFlag
    {
        /// The variable name
        name: &'static str,
        /// The rejected value
        value: String,
    },

    /// Invalid filter directives
    #[error("Invalid log filter '{directives}': {reason}")]
    InvalidFilter
    {
        /// The rejected directives
        directives: String,
        /// Why they were rejected
        reason: String,
    },

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),
}

/// A configured `tracing` dispatcher
#[derive(Debug, Clone)]
pub struct Logger
{
    dispatch: Dispatch,
    level: LevelFilter,
}

impl Logger
{
    /// Most verbose level let through when no filter directives are set
    #[must_use]
    pub fn level(&self) -> LevelFilter
    {
        self.level
    }

    /// Run `f` with this logger as the thread's default
    pub fn with_default<T>(&self, f: impl FnOnce() -> T) -> T
    {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Install this logger as the process-wide default
    ///
    /// ## Errors
    ///
    /// Returns an error if a global default is already set.
    pub fn init(self) -> Result<(), LoggingError>
    {
        tracing::dispatcher::set_global_default(self.dispatch)
            .map_err(|e| LoggingError::InitializationFailed(e.to_string()))
    }
}

/// Builder for [`Logger`]
///
/// Starts from the same settings as [`create_logger`]: `INFO`, standard
/// error, callers captured, full level names.
#[derive(Debug)]
pub struct LoggerBuilder<W = fn() -> io::Stderr>
{
    debug: bool,
    directives: Option<String>,
    config: FormatterConfig,
    capture_caller: bool,
    writer: W,
}

impl LoggerBuilder
{
    #[must_use]
    pub fn new() -> Self
    {
        Self {
            debug: false,
            directives: None,
            config: FormatterConfig::new().with_level_truncation_disabled(true),
            capture_caller: true,
            writer: io::stderr,
        }
    }
}

impl Default for LoggerBuilder
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<W> LoggerBuilder<W>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    /// Log at `DEBUG` instead of `INFO`
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self
    {
        self.debug = enabled;
        self
    }

    /// `EnvFilter` directives that replace the debug/info level
    #[must_use]
    pub fn directives(mut self, directives: impl Into<String>) -> Self
    {
        self.directives = Some(directives.into());
        self
    }

    /// Replace the whole formatter config
    #[must_use]
    pub fn formatter_config(mut self, config: FormatterConfig) -> Self
    {
        self.config = config;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self
    {
        self.config.timestamp_format = format.into();
        self
    }

    #[must_use]
    pub fn line_template(mut self, template: impl Into<String>) -> Self
    {
        self.config.line_template = template.into();
        self
    }

    #[must_use]
    pub fn disable_level_truncation(mut self, disabled: bool) -> Self
    {
        self.config.disable_level_truncation = disabled;
        self
    }

    #[must_use]
    pub fn capture_caller(mut self, capture: bool) -> Self
    {
        self.capture_caller = capture;
        self
    }

    /// Send output somewhere other than standard error
    #[must_use]
    pub fn with_writer<W2>(self, writer: W2) -> LoggerBuilder<W2>
    where
        W2: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        LoggerBuilder {
            debug: self.debug,
            directives: self.directives,
            config: self.config,
            capture_caller: self.capture_caller,
            writer,
        }
    }

    /// Build the logger
    ///
    /// ## Errors
    ///
    /// Returns an error if filter directives were set and do not parse.
    pub fn try_build(mut self) -> Result<Logger, LoggingError>
    {
        let filter = match self.directives.take() {
            Some(directives) => Some(EnvFilter::try_new(&directives).map_err(|e| {
                LoggingError::InvalidFilter {
                    reason: e.to_string(),
                    directives,
                }
            })?),
            None => None,
        };
        Ok(self.into_logger(filter))
    }

    /// Build the logger, falling back to the debug/info level if the filter
    /// directives do not parse
    #[must_use]
    pub fn build(mut self) -> Logger
    {
        let filter = self
            .directives
            .take()
            .and_then(|directives| EnvFilter::try_new(directives).ok());
        self.into_logger(filter)
    }

    fn into_logger(self, filter: Option<EnvFilter>) -> Logger
    {
        let level = if self.debug { LevelFilter::DEBUG } else { LevelFilter::INFO };
        let format = TemplateFormat::new(&self.config).with_caller(self.capture_caller);
        let layer = fmt::layer().event_format(format).with_writer(self.writer);

        let layer = match filter {
            Some(filter) => layer.with_filter(filter).boxed(),
            None => layer.with_filter(level).boxed(),
        };

        let subscriber = Registry::default().with(layer);
        Logger {
            dispatch: Dispatch::new(subscriber),
            level,
        }
    }
}

/// Create a logger writing to standard error
///
/// - Level `DEBUG` if `debug_enabled`, otherwise `INFO`
/// - Callers captured
/// - `timestamp_format` as the timestamp layout (empty for the default)
/// - Full level names: truncation is always disabled here
///
/// ## Example
///
/// ```rust,no_run
/// use loglines_utils::create_logger;
///
/// let logger = create_logger(true, "");
/// logger.with_default(|| tracing::debug!("visible at debug level"));
/// ```
#[must_use]
pub fn create_logger(debug_enabled: bool, timestamp_format: &str) -> Logger
{
    factory_builder(debug_enabled, timestamp_format).build()
}

/// The settings behind [`create_logger`], before a writer is chosen
#[must_use]
pub(crate) fn factory_builder(debug_enabled: bool, timestamp_format: &str) -> LoggerBuilder
{
    LoggerBuilder::new()
        .debug(debug_enabled)
        .timestamp_format(timestamp_format)
        .capture_caller(true)
        .disable_level_truncation(true)
}

/// Initialize logging from the environment
///
/// Reads `LOGLINES_DEBUG`, `RUST_LOG` and the `LOGLINES_*` formatter
/// variables, then installs the logger globally.
///
/// ## Errors
///
/// Returns an error if:
/// - `LOGLINES_DEBUG` is not a boolean ([`LoggingError::InvalidFlag`])
/// - `RUST_LOG` holds invalid directives
/// - Logging is already initialized
pub fn init_logging() -> Result<(), LoggingError>
{
    let debug = match env::var("LOGLINES_DEBUG") {
        Ok(value) => parse_flag(&value).ok_or(LoggingError::InvalidFlag {
            name: "LOGLINES_DEBUG",
            value,
        })?,
        Err(_) => false,
    };

    // Full level names, as with `create_logger`, unless truncation is asked for
    let mut config = FormatterConfig::from_env();
    if env::var_os("LOGLINES_TRUNCATE_LEVEL").is_none() {
        config.disable_level_truncation = true;
    }

    let mut builder = LoggerBuilder::new().debug(debug).formatter_config(config);
    if let Ok(directives) = env::var(EnvFilter::DEFAULT_ENV) {
        builder = builder.directives(directives);
    }

    builder.try_build()?.init()
}

fn parse_flag(value: &str) -> Option<bool>
{
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::capture::CaptureWriter;

    #[test]
    fn test_parse_flag()
    {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_factory_logger_writes_full_level_caller_and_layout()
    {
        let capture = CaptureWriter::new();
        let logger = factory_builder(false, "at 2006 |").with_writer(capture.clone()).build();
        let mut expected_line = 0;
        logger.with_default(|| {
            expected_line = line!() + 1;
            tracing::warn!(attempts = 3, "retrying");
        });

        let lines = capture.lines();
        assert_eq!(lines.len(), 1, "unexpected output: {lines:?}");
        let line = &lines[0];
        assert!(line.starts_with("at "), "layout not applied: {line}");
        assert!(line[3..7].chars().all(|c| c.is_ascii_digit()), "layout not applied: {line}");
        let rest = &line[7..];
        let expected = format!(" | [WARNING] {}:{expected_line} retrying {{attempts:3}}", file!());
        assert_eq!(rest, expected);
    }

    #[test]
    fn test_factory_logger_respects_level()
    {
        let capture = CaptureWriter::new();
        let logger = factory_builder(false, "").with_writer(capture.clone()).build();
        logger.with_default(|| {
            tracing::debug!("hidden");
            tracing::error!("shown");
        });

        let lines = capture.lines();
        assert_eq!(lines.len(), 1, "unexpected output: {lines:?}");
        assert!(lines[0].contains(" [ERROR] "));
    }

    #[test]
    fn test_invalid_flag_error_names_the_variable()
    {
        let error = LoggingError::InvalidFlag {
            name: "LOGLINES_DEBUG",
            value: "maybe".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("LOGLINES_DEBUG"));
        assert!(message.contains("'maybe'"));
    }

    #[test]
    fn test_create_logger_levels()
    {
        assert_eq!(create_logger(true, "").level(), LevelFilter::DEBUG);
        assert_eq!(create_logger(false, "").level(), LevelFilter::INFO);
    }

    #[test]
    fn test_invalid_directives_are_rejected()
    {
        let result = LoggerBuilder::new().directives("my_crate=verbose").try_build();
        assert!(matches!(result, Err(LoggingError::InvalidFilter { .. })));
    }
}
