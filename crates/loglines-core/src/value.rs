//! # Field Values
//!
//! Field values are a closed set of kinds. Anything the host logger cannot
//! classify is captured as its debug text in [`FieldValue::Other`].
//!
//! | kind      | rendering                      |
//! |-----------|--------------------------------|
//! | string    | verbatim                       |
//! | integer   | decimal, no grouping           |
//! | bool      | `true` / `false`               |
//! | float     | two decimals (`0.50`)          |
//! | error     | the error's message            |
//! | time      | `2024-03-05 10:00:00 +00:00`   |
//! | other     | captured debug text            |

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::ParseFieldError;

/// A typed value attached to a log entry
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue
{
    /// Text, rendered verbatim
    Str(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    Uint(u64),
    /// Boolean
    Bool(bool),
    /// Floating point, rendered with two decimals
    Float(f64),
    /// The message of an error
    Error(String),
    /// A point in time
    Time(DateTime<FixedOffset>),
    /// Pre-rendered text for any other kind of value
    Other(String),
}

impl FieldValue
{
    /// Capture an error by its message
    pub fn error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        FieldValue::Error(error.to_string())
    }

    /// Capture any value by its debug representation
    pub fn other<T>(value: &T) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        FieldValue::Other(format!("{value:?}"))
    }

    /// Infer the kind of a raw textual value.
    ///
    /// Tries, in order: signed integer, unsigned integer, float, bool,
    /// RFC 3339 time. Anything else stays a string.
    #[must_use]
    pub fn infer(raw: &str) -> Self
    {
        if let Ok(value) = raw.parse::<i64>() {
            return FieldValue::Int(value);
        }
        if let Ok(value) = raw.parse::<u64>() {
            return FieldValue::Uint(value);
        }
        // "inf" and "nan" parse as floats but are words here
        if raw.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.') {
            if let Ok(value) = raw.parse::<f64>() {
                return FieldValue::Float(value);
            }
        }
        match raw {
            "true" => return FieldValue::Bool(true),
            "false" => return FieldValue::Bool(false),
            _ => {}
        }
        if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
            return FieldValue::Time(time);
        }
        FieldValue::Str(raw.to_string())
    }
}

impl fmt::Display for FieldValue
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            FieldValue::Str(value) | FieldValue::Error(value) | FieldValue::Other(value) => f.write_str(value),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Uint(value) => write!(f, "{value}"),
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value:.2}"),
            FieldValue::Time(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue
{
    fn from(value: &str) -> Self
    {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue
{
    fn from(value: String) -> Self
    {
        FieldValue::Str(value)
    }
}

impl From<bool> for FieldValue
{
    fn from(value: bool) -> Self
    {
        FieldValue::Bool(value)
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue
            {
                fn from(value: $ty) -> Self
                {
                    FieldValue::Int(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue
            {
                fn from(value: $ty) -> Self
                {
                    FieldValue::Uint(u64::from(value))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for FieldValue
{
    fn from(value: isize) -> Self
    {
        i64::try_from(value).map_or_else(|_| FieldValue::Other(value.to_string()), FieldValue::Int)
    }
}

impl From<usize> for FieldValue
{
    fn from(value: usize) -> Self
    {
        u64::try_from(value).map_or_else(|_| FieldValue::Other(value.to_string()), FieldValue::Uint)
    }
}

impl From<f32> for FieldValue
{
    fn from(value: f32) -> Self
    {
        FieldValue::Float(f64::from(value))
    }
}

impl From<f64> for FieldValue
{
    fn from(value: f64) -> Self
    {
        FieldValue::Float(value)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue
{
    fn from(value: DateTime<FixedOffset>) -> Self
    {
        FieldValue::Time(value)
    }
}

impl From<DateTime<Utc>> for FieldValue
{
    fn from(value: DateTime<Utc>) -> Self
    {
        FieldValue::Time(value.fixed_offset())
    }
}

/// Parse a `key=value` argument into a field name and an inferred value.
///
/// Only the first `=` separates; the value may contain more of them.
///
/// ## Errors
///
/// Returns [`ParseFieldError`] if there is no `=` or the name is empty.
pub fn parse_field(arg: &str) -> Result<(String, FieldValue), ParseFieldError>
{
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| ParseFieldError::MissingSeparator(arg.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseFieldError::EmptyName(arg.to_string()));
    }
    Ok((name.to_string(), FieldValue::infer(raw)))
}
