//! # Log Entries
//!
//! A [`LogEntry`] is one log event as handed over by the host logger. The
//! formatter only reads it.

use chrono::{DateTime, FixedOffset};

use crate::level::Level;
use crate::value::FieldValue;

/// Source location of the log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller
{
    /// Path of the source file, as reported by the host logger
    pub file: String,
    /// Line number in `file`
    pub line: u32,
}

impl Caller
{
    pub fn new(file: impl Into<String>, line: u32) -> Self
    {
        Self { file: file.into(), line }
    }
}

/// Named field values of an entry
///
/// Behaves like a map that remembers insertion order: inserting a name that
/// is already present replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields
{
    entries: Vec<(String, FieldValue)>,
}

impl Fields
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Insert or replace a field, returning the previous value if any
    ///
    /// Lookup is a linear scan: building `n` fields costs `O(n²)`, which is
    /// fine for the handful of fields a log event carries.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue>
    {
        let name = name.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((name, value));
        None
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue>
    {
        self.entries.iter().find(|(existing, _)| existing == name).map(|(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize
    {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.entries.is_empty()
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)>
    {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self
    {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

impl<K, V> Extend<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I)
    {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// One log event: time, severity, message, optional call site and fields
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry
{
    /// When the log call happened
    pub time: DateTime<FixedOffset>,
    /// Severity
    pub level: Level,
    /// Free-text message
    pub message: String,
    /// Call site, present only when the host captures callers
    pub caller: Option<Caller>,
    /// Structured context
    pub fields: Fields,
}

impl LogEntry
{
    /// Create an entry with no caller and no fields
    pub fn new(time: DateTime<FixedOffset>, level: Level, message: impl Into<String>) -> Self
    {
        Self {
            time,
            level,
            message: message.into(),
            caller: None,
            fields: Fields::new(),
        }
    }

    #[must_use]
    pub fn with_caller(mut self, file: impl Into<String>, line: u32) -> Self
    {
        self.caller = Some(Caller::new(file, line));
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self
    {
        self.fields.insert(name, value);
        self
    }
}
