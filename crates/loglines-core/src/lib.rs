//! # loglines-core
//!
//! Template-driven rendering of structured log entries into single text lines.
//!
//! This crate provides the formatting primitives, including:
//! - The log entry model (level, message, caller, typed fields)
//! - A single-pass template scanner for `%placeholder%` slots
//! - Reference-time timestamp layouts (`2006/02/01 15:04:05`)
//! - [`LineFormatter`], which ties them together
//!
//! ## Example
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone};
//! use loglines_core::{FormatterConfig, Level, LineFormatter, LogEntry};
//!
//! let time = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
//! let entry = LogEntry::new(time, Level::Info, "started").with_field("n", 1);
//!
//! let formatter = LineFormatter::new(&FormatterConfig::default());
//! assert_eq!(formatter.render(&entry), "2024/05/03 10:00:00 [INFO] : started {n:1}\n");
//! ```
//!
//! The formatter never touches an output stream; the host logger decides where
//! the bytes go.

pub mod config;
pub mod entry;
pub mod error;
pub mod formatter;
pub mod layout;
pub mod level;
pub mod template;
pub mod value;

pub use config::{FormatterConfig, DEFAULT_LINE_TEMPLATE, DEFAULT_TIMESTAMP_FORMAT};
pub use entry::{Caller, Fields, LogEntry};
pub use error::{ParseFieldError, ParseLevelError};
pub use formatter::LineFormatter;
pub use layout::TimestampLayout;
pub use level::Level;
pub use template::{Placeholder, Segment, Template};
pub use value::{parse_field, FieldValue};
