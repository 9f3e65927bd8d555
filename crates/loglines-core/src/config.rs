//! # Formatter Configuration
//!
//! Every setting has a built-in default; an empty string always means "use
//! the default", so a [`FormatterConfig`] can never be invalid.
//!
//! ## Environment Variables
//!
//! - `LOGLINES_TEMPLATE`: line template (default: [`DEFAULT_LINE_TEMPLATE`])
//! - `LOGLINES_TIMESTAMP_FORMAT`: timestamp layout (default: [`DEFAULT_TIMESTAMP_FORMAT`])
//! - `LOGLINES_TRUNCATE_LEVEL`: `true`/`1` to cut level names to 4 characters

use std::env;

/// Timestamp layout used when none is configured.
///
/// Day before month (`YYYY/DD/MM hh:mm:ss`).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "2006/02/01 15:04:05";

/// Line template used when none is configured
pub const DEFAULT_LINE_TEMPLATE: &str = "%time% [%level%] %filename%:%line% %message% {%fields%}";

/// Settings for a [`LineFormatter`](crate::LineFormatter)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatterConfig
{
    /// Timestamp layout; empty means [`DEFAULT_TIMESTAMP_FORMAT`]
    pub timestamp_format: String,
    /// Line template; empty means [`DEFAULT_LINE_TEMPLATE`]
    pub line_template: String,
    /// Keep full level names instead of their first 4 characters
    pub disable_level_truncation: bool,
}

impl FormatterConfig
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Read the configuration from `LOGLINES_*` environment variables.
    ///
    /// Unset variables keep their defaults. Level truncation stays on unless
    /// `LOGLINES_TRUNCATE_LEVEL` is set to something other than `true`, `1`,
    /// `yes` or `on`.
    #[must_use]
    pub fn from_env() -> Self
    {
        let truncate = env::var("LOGLINES_TRUNCATE_LEVEL")
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
            .unwrap_or(true);

        Self {
            timestamp_format: env::var("LOGLINES_TIMESTAMP_FORMAT").unwrap_or_default(),
            line_template: env::var("LOGLINES_TEMPLATE").unwrap_or_default(),
            disable_level_truncation: !truncate,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self
    {
        self.timestamp_format = format.into();
        self
    }

    #[must_use]
    pub fn with_line_template(mut self, template: impl Into<String>) -> Self
    {
        self.line_template = template.into();
        self
    }

    #[must_use]
    pub fn with_level_truncation_disabled(mut self, disabled: bool) -> Self
    {
        self.disable_level_truncation = disabled;
        self
    }

    /// The timestamp layout in effect, after defaulting
    #[must_use]
    pub fn resolved_timestamp_format(&self) -> &str
    {
        if self.timestamp_format.is_empty() {
            DEFAULT_TIMESTAMP_FORMAT
        } else {
            &self.timestamp_format
        }
    }

    /// The line template in effect, after defaulting
    #[must_use]
    pub fn resolved_line_template(&self) -> &str
    {
        if self.line_template.is_empty() {
            DEFAULT_LINE_TEMPLATE
        } else {
            &self.line_template
        }
    }
}
