//! # Line Formatter
//!
//! [`LineFormatter`] renders one [`LogEntry`] into one line of text.
//!
//! The template and timestamp layout are compiled once in
//! [`LineFormatter::new`]; after that, formatting is a pure function of the
//! entry. The formatter holds no mutable state, so one instance can be shared
//! across threads and called concurrently.

use std::fmt::{self, Write};

use crate::config::FormatterConfig;
use crate::entry::{Fields, LogEntry};
use crate::layout::TimestampLayout;
use crate::template::{Placeholder, Segment, Template};

/// Number of characters kept from the level name when truncation is on
pub const TRUNCATED_LEVEL_WIDTH: usize = 4;

const FIELD_SEPARATOR: &str = ", ";

/// Template-driven single-line formatter
#[derive(Debug, Clone)]
pub struct LineFormatter
{
    template: Template,
    layout: TimestampLayout,
    truncate_level: bool,
}

impl LineFormatter
{
    /// Build a formatter, filling empty settings with the built-in defaults.
    ///
    /// Never fails.
    #[must_use]
    pub fn new(config: &FormatterConfig) -> Self
    {
        Self {
            template: Template::parse(config.resolved_line_template()),
            layout: TimestampLayout::parse(config.resolved_timestamp_format()),
            truncate_level: !config.disable_level_truncation,
        }
    }

    /// Render `entry` as bytes, trailing newline included
    #[must_use]
    pub fn format(&self, entry: &LogEntry) -> Vec<u8>
    {
        self.render(entry).into_bytes()
    }

    /// Render `entry` as a string, trailing newline included
    #[must_use]
    pub fn render(&self, entry: &LogEntry) -> String
    {
        let mut line = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_line(entry, &mut line);
        line
    }

    /// Render `entry` straight into `out`, trailing newline included
    ///
    /// ## Errors
    ///
    /// Only fails if `out` does.
    pub fn write_line<W>(&self, entry: &LogEntry, out: &mut W) -> fmt::Result
    where
        W: Write + ?Sized,
    {
        for segment in self.template.segments() {
            match segment {
                Segment::Literal(text) => out.write_str(text)?,
                Segment::Slot(placeholder) => self.write_slot(*placeholder, entry, out)?,
            }
        }
        out.write_char('\n')
    }

    fn write_slot<W>(&self, placeholder: Placeholder, entry: &LogEntry, out: &mut W) -> fmt::Result
    where
        W: Write + ?Sized,
    {
        match placeholder {
            Placeholder::Time => self.layout.write(&entry.time, out),
            Placeholder::Message => out.write_str(&entry.message),
            Placeholder::Filename => match &entry.caller {
                Some(caller) => out.write_str(&caller.file),
                None => Ok(()),
            },
            Placeholder::Line => match &entry.caller {
                Some(caller) => write!(out, "{}", caller.line),
                None => Ok(()),
            },
            Placeholder::Level => out.write_str(self.level_text(entry)),
            Placeholder::Fields => write_fields(&entry.fields, out),
        }
    }

    fn level_text(&self, entry: &LogEntry) -> &'static str
    {
        let name = entry.level.upper_name();
        if self.truncate_level {
            truncate_chars(name, TRUNCATED_LEVEL_WIDTH)
        } else {
            name
        }
    }
}

impl Default for LineFormatter
{
    fn default() -> Self
    {
        Self::new(&FormatterConfig::default())
    }
}

/// Keep at most `max` characters of `s`; shorter strings are returned whole
fn truncate_chars(s: &str, max: usize) -> &str
{
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

fn write_fields<W>(fields: &Fields, out: &mut W) -> fmt::Result
where
    W: Write + ?Sized,
{
    for (index, (name, value)) in fields.iter().enumerate() {
        if index > 0 {
            out.write_str(FIELD_SEPARATOR)?;
        }
        write!(out, "{name}:{value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use chrono::{DateTime, FixedOffset, TimeZone};

    use super::*;
    use crate::level::Level;

    fn time() -> DateTime<FixedOffset>
    {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_truncate_chars()
    {
        assert_eq!(truncate_chars("WARNING", 4), "WARN");
        assert_eq!(truncate_chars("INFO", 4), "INFO");
        assert_eq!(truncate_chars("OK", 4), "OK");
        assert_eq!(truncate_chars("", 4), "");
        assert_eq!(truncate_chars("ÉCHEC", 4), "ÉCHE");
    }

    #[test]
    fn test_level_truncation()
    {
        let entry = LogEntry::new(time(), Level::Warning, "disk low");
        let config = FormatterConfig::new().with_line_template("%level%");

        let truncated = LineFormatter::new(&config);
        assert_eq!(truncated.render(&entry), "WARN\n");

        let full = LineFormatter::new(&config.with_level_truncation_disabled(true));
        assert_eq!(full.render(&entry), "WARNING\n");
    }

    #[test]
    fn test_write_line_into_foreign_writer()
    {
        let entry = LogEntry::new(time(), Level::Debug, "hello").with_field("n", 1);
        let formatter = LineFormatter::new(&FormatterConfig::new().with_line_template("%message% %fields%"));

        let mut out = String::from("> ");
        formatter.write_line(&entry, &mut out).unwrap();
        assert_eq!(out, "> hello n:1\n");
    }

    #[test]
    fn test_format_returns_bytes()
    {
        let entry = LogEntry::new(time(), Level::Error, "boom");
        let formatter = LineFormatter::default();
        assert_eq!(formatter.format(&entry), b"2024/05/03 10:00:00 [ERRO] : boom {}\n".to_vec());
    }
}
