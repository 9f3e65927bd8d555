//! Severity levels

use std::fmt;
use std::str::FromStr;

use crate::error::ParseLevelError;

/// Log entry severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level
{
    /// Logged right before the caller panics
    Panic,
    /// Logged right before the process exits
    Fatal,
    /// Error level
    Error,
    /// Warning level
    Warning,
    /// Info level
    Info,
    /// Debug level
    Debug,
    /// Trace level (most verbose)
    Trace,
}

impl Level
{
    /// All levels, most severe first
    pub const ALL: [Level; 7] = [
        Level::Panic,
        Level::Fatal,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    /// Lower-case name of the level (`"warning"`, `"info"`, ...)
    #[must_use]
    pub const fn name(self) -> &'static str
    {
        match self {
            Level::Panic => "panic",
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }

    /// Upper-case name of the level, as it appears in `%level%`
    #[must_use]
    pub const fn upper_name(self) -> &'static str
    {
        match self {
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Level
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.name())
    }
}

impl FromStr for Level
{
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            "error" | "err" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warning),
            "info" => Ok(Level::Info),
            "debug" | "dbg" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl From<tracing::Level> for Level
{
    fn from(level: tracing::Level) -> Self
    {
        match level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG => Level::Debug,
            _ => Level::Trace,
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_level_from_str()
    {
        assert_eq!(Level::from_str("warn").unwrap(), Level::Warning);
        assert_eq!(Level::from_str("WARNING").unwrap(), Level::Warning);
        assert_eq!(Level::from_str("Info").unwrap(), Level::Info);
        assert_eq!(Level::from_str("panic").unwrap(), Level::Panic);
        assert!(Level::from_str("verbose").is_err());
    }

    #[test]
    fn test_level_names_round_trip()
    {
        for level in Level::ALL {
            assert_eq!(Level::from_str(level.name()).unwrap(), level);
            assert_eq!(level.upper_name(), level.name().to_uppercase());
        }
    }

    #[test]
    fn test_level_from_tracing_level()
    {
        assert_eq!(Level::from(tracing::Level::ERROR), Level::Error);
        assert_eq!(Level::from(tracing::Level::WARN), Level::Warning);
        assert_eq!(Level::from(tracing::Level::INFO), Level::Info);
        assert_eq!(Level::from(tracing::Level::DEBUG), Level::Debug);
        assert_eq!(Level::from(tracing::Level::TRACE), Level::Trace);
    }
}
