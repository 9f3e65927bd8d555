//! # Event Formatting
//!
//! [`TemplateFormat`] plugs a [`LineFormatter`] into `tracing_subscriber`'s
//! `fmt` layer. For every event it:
//!
//! 1. Stamps the current local time
//! 2. Maps the `tracing` level to a [`Level`]
//! 3. Pulls the `message` field out and collects the rest as typed fields
//! 4. Attaches `file()`/`line()` from the event metadata when caller capture is on
//! 5. Writes the rendered line to the layer's writer
//!
//! ```rust,no_run
//! use loglines_core::FormatterConfig;
//! use loglines_utils::TemplateFormat;
//! use tracing_subscriber::fmt;
//! use tracing_subscriber::layer::SubscriberExt;
//! use tracing_subscriber::util::SubscriberInitExt;
//!
//! let config = FormatterConfig::new().with_line_template("%level% %message% %fields%");
//! let layer = fmt::layer().event_format(TemplateFormat::new(&config));
//! tracing_subscriber::registry().with(layer).init();
//!
//! tracing::info!(user_id = 12345, "User logged in");
//! ```

use std::fmt;

use chrono::{DateTime, FixedOffset, Local};
use loglines_core::{Caller, FieldValue, Fields, FormatterConfig, Level, LineFormatter, LogEntry};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Name of the field `tracing` stores the event message in
const MESSAGE_FIELD: &str = "message";

/// Source of entry timestamps
pub type Clock = fn() -> DateTime<FixedOffset>;

fn local_now() -> DateTime<FixedOffset>
{
    Local::now().fixed_offset()
}

/// `tracing_subscriber` event formatter backed by a [`LineFormatter`]
#[derive(Debug, Clone)]
pub struct TemplateFormat
{
    formatter: LineFormatter,
    capture_caller: bool,
    clock: Clock,
}

impl TemplateFormat
{
    /// Build from a formatter config, with caller capture on
    #[must_use]
    pub fn new(config: &FormatterConfig) -> Self
    {
        Self {
            formatter: LineFormatter::new(config),
            capture_caller: true,
            clock: local_now,
        }
    }

    /// Include the event's source file and line
    #[must_use]
    pub fn with_caller(mut self, capture: bool) -> Self
    {
        self.capture_caller = capture;
        self
    }

    /// Replace the clock used to timestamp entries
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self
    {
        self.clock = clock;
        self
    }

    /// Convert a `tracing` event into a [`LogEntry`]
    #[must_use]
    pub fn entry_from_event(&self, event: &Event<'_>) -> LogEntry
    {
        let metadata = event.metadata();
        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        let mut entry = LogEntry::new((self.clock)(), Level::from(*metadata.level()), collector.message);
        entry.fields = collector.fields;

        if self.capture_caller {
            if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
                entry.caller = Some(Caller::new(file, line));
            }
        }
        entry
    }
}

impl Default for TemplateFormat
{
    fn default() -> Self
    {
        Self::new(&FormatterConfig::default())
    }
}

impl<S, N> FormatEvent<S, N> for TemplateFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, _ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result
    {
        let entry = self.entry_from_event(event);
        self.formatter.write_line(&entry, &mut writer)
    }
}

/// Collects event fields into typed [`FieldValue`]s
#[derive(Debug, Default)]
struct FieldCollector
{
    message: String,
    fields: Fields,
}

impl Visit for FieldCollector
{
    fn record_f64(&mut self, field: &Field, value: f64)
    {
        self.fields.insert(field.name(), value);
    }

    fn record_i64(&mut self, field: &Field, value: i64)
    {
        self.fields.insert(field.name(), value);
    }

    fn record_u64(&mut self, field: &Field, value: u64)
    {
        self.fields.insert(field.name(), value);
    }

    fn record_i128(&mut self, field: &Field, value: i128)
    {
        self.fields.insert(field.name(), FieldValue::Other(value.to_string()));
    }

    fn record_u128(&mut self, field: &Field, value: u128)
    {
        self.fields.insert(field.name(), FieldValue::Other(value.to_string()));
    }

    fn record_bool(&mut self, field: &Field, value: bool)
    {
        self.fields.insert(field.name(), value);
    }

    fn record_str(&mut self, field: &Field, value: &str)
    {
        if field.name() == MESSAGE_FIELD {
            self.message = value.to_string();
        } else {
            self.fields.insert(field.name(), value);
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static))
    {
        self.fields.insert(field.name(), FieldValue::error(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug)
    {
        if field.name() == MESSAGE_FIELD {
            self.message = format!("{value:?}");
        } else {
            self.fields.insert(field.name(), FieldValue::other(value));
        }
    }
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;
    use tracing_subscriber::fmt;
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;
    use crate::capture::CaptureWriter;

    fn fixed_clock() -> DateTime<FixedOffset>
    {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()
    }

    fn capture_with(format: TemplateFormat, emit: impl FnOnce()) -> String
    {
        let capture = CaptureWriter::new();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .event_format(format.with_clock(fixed_clock))
                .with_writer(capture.clone()),
        );
        tracing::subscriber::with_default(subscriber, emit);
        capture.contents()
    }

    #[test]
    fn test_message_and_typed_fields()
    {
        let output = capture_with(TemplateFormat::default().with_caller(false), || {
            tracing::info!(count = 3, ratio = 0.5, ok = true, user = "alice", "started");
        });
        assert_eq!(
            output,
            "2024/05/03 10:00:00 [INFO] : started {count:3, ratio:0.50, ok:true, user:alice}\n"
        );
    }

    #[test]
    fn test_display_and_debug_fields()
    {
        let output = capture_with(TemplateFormat::default().with_caller(false), || {
            let path = std::path::Path::new("/tmp/x");
            tracing::warn!(path = %path.display(), items = ?vec![1, 2], "checked");
        });
        assert_eq!(
            output,
            "2024/05/03 10:00:00 [WARN] : checked {path:/tmp/x, items:[1, 2]}\n"
        );
    }

    #[test]
    fn test_error_field_renders_message()
    {
        let output = capture_with(TemplateFormat::default().with_caller(false), || {
            let error = std::io::Error::other("disk full");
            let error: &(dyn std::error::Error + 'static) = &error;
            tracing::error!(error, "write failed");
        });
        assert_eq!(output, "2024/05/03 10:00:00 [ERRO] : write failed {error:disk full}\n");
    }

    #[test]
    fn test_caller_capture()
    {
        let mut expected_line = 0;
        let output = capture_with(TemplateFormat::default(), || {
            expected_line = line!() + 1;
            tracing::info!("located");
        });
        assert!(
            output.contains(&format!("format.rs:{expected_line} located")),
            "unexpected output: {output}"
        );
    }

    #[test]
    fn test_formatted_message_arguments()
    {
        let output = capture_with(TemplateFormat::default().with_caller(false), || {
            let pid = 4242;
            tracing::info!("Attaching to process {}", pid);
        });
        assert_eq!(output, "2024/05/03 10:00:00 [INFO] : Attaching to process 4242 {}\n");
    }
}
