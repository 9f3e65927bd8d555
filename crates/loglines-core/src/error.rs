//! # Error Types
//!
//! Formatting itself never fails. The only fallible operations in this crate
//! are parsing levels and `key=value` field arguments from text.

use thiserror::Error;

/// A level name that does not match any known severity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown log level: {0}. Use 'panic', 'fatal', 'error', 'warning', 'info', 'debug', or 'trace'")]
pub struct ParseLevelError(pub String);

/// A malformed `key=value` field argument
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFieldError
{
    /// The argument has no `=` between the name and the value
    #[error("Field '{0}' is missing '=' (expected key=value)")]
    MissingSeparator(String),

    /// The part before `=` is empty
    #[error("Field '{0}' has an empty name")]
    EmptyName(String),
}
