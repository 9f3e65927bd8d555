//! Tests for end-to-end line formatting

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use loglines_core::{FieldValue, FormatterConfig, Level, LineFormatter, LogEntry, DEFAULT_LINE_TEMPLATE};

fn started_at() -> DateTime<FixedOffset>
{
    FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()
}

fn render(config: &FormatterConfig, entry: &LogEntry) -> String
{
    LineFormatter::new(config).render(entry)
}

#[test]
fn test_end_to_end_default_template()
{
    let entry = LogEntry::new(started_at(), Level::Info, "started").with_field("n", 1);
    let config = FormatterConfig::new().with_timestamp_format("2006/02/01 15:04:05");

    let bytes = LineFormatter::new(&config).format(&entry);
    assert_eq!(bytes, b"2024/05/03 10:00:00 [INFO] : started {n:1}\n");
}

#[test]
fn test_default_template_with_caller()
{
    let entry = LogEntry::new(started_at(), Level::Debug, "loaded")
        .with_caller("src/config.rs", 42)
        .with_field("path", "/etc/app.toml");

    assert_eq!(
        render(&FormatterConfig::default(), &entry),
        "2024/05/03 10:00:00 [DEBU] src/config.rs:42 loaded {path:/etc/app.toml}\n"
    );
}

#[test]
fn test_empty_template_matches_default_template()
{
    let entry = LogEntry::new(started_at(), Level::Warning, "slow")
        .with_caller("main.rs", 7)
        .with_field("ms", 1500);

    let empty = FormatterConfig::new().with_line_template("");
    let explicit = FormatterConfig::new().with_line_template(DEFAULT_LINE_TEMPLATE);
    assert_eq!(render(&empty, &entry), render(&explicit, &entry));
}

#[test]
fn test_missing_caller_leaves_bare_colon()
{
    let entry = LogEntry::new(started_at(), Level::Info, "tick");
    let line = render(&FormatterConfig::default(), &entry);
    assert!(line.contains("] : tick"), "unexpected line: {line}");
}

#[test]
fn test_empty_fields_render_empty_braces()
{
    let entry = LogEntry::new(started_at(), Level::Info, "tick");
    let line = render(&FormatterConfig::default(), &entry);
    assert!(line.ends_with("tick {}\n"), "unexpected line: {line}");
}

#[test]
fn test_fields_follow_iteration_order_without_trailing_separator()
{
    let entry = LogEntry::new(started_at(), Level::Info, "done")
        .with_field("count", 3)
        .with_field("ratio", 0.5)
        .with_field("ok", true);
    let config = FormatterConfig::new().with_line_template("%fields%");

    assert_eq!(render(&config, &entry), "count:3, ratio:0.50, ok:true\n");
}

#[test]
fn test_every_value_kind()
{
    let error = std::io::Error::other("connection reset");
    let seen = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let entry = LogEntry::new(started_at(), Level::Error, "request failed")
        .with_field("user", "alice")
        .with_field("attempt", -2)
        .with_field("bytes", 1024_u64)
        .with_field("retry", false)
        .with_field("latency", 12.3456_f32)
        .with_field("error", FieldValue::error(&error))
        .with_field("seen", seen)
        .with_field("tags", FieldValue::other(&["a", "b"]));
    let config = FormatterConfig::new().with_line_template("%fields%");

    assert_eq!(
        render(&config, &entry),
        "user:alice, attempt:-2, bytes:1024, retry:false, latency:12.35, error:connection reset, \
         seen:2024-01-02 03:04:05 +00:00, tags:[\"a\", \"b\"]\n"
    );
}

#[test]
fn test_values_are_never_rescanned()
{
    let entry = LogEntry::new(started_at(), Level::Info, "literal %level% and %time%")
        .with_field("template", "%message%");
    let config = FormatterConfig::new().with_line_template("[%level%] %message% %fields%");

    assert_eq!(
        render(&config, &entry),
        "[INFO] literal %level% and %time% template:%message%\n"
    );
}

#[test]
fn test_custom_template_and_layout()
{
    let entry = LogEntry::new(started_at(), Level::Fatal, "giving up").with_caller("lib.rs", 9);
    let config = FormatterConfig::new()
        .with_timestamp_format("2006-01-02T15:04:05Z07:00")
        .with_line_template("%level%|%time%|%line%@%filename%|%message%")
        .with_level_truncation_disabled(true);

    assert_eq!(
        render(&config, &entry),
        "FATAL|2024-03-05T10:00:00Z|9@lib.rs|giving up\n"
    );
}

#[test]
fn test_template_without_placeholders()
{
    let entry = LogEntry::new(started_at(), Level::Info, "ignored");
    let config = FormatterConfig::new().with_line_template("static text");
    assert_eq!(render(&config, &entry), "static text\n");
}

#[test]
fn test_formatter_is_shareable_across_threads()
{
    let formatter = std::sync::Arc::new(LineFormatter::default());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let formatter = std::sync::Arc::clone(&formatter);
            std::thread::spawn(move || {
                let entry = LogEntry::new(started_at(), Level::Info, "worker").with_field("n", n);
                formatter.render(&entry)
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let line = handle.join().unwrap();
        assert_eq!(line, format!("2024/05/03 10:00:00 [INFO] : worker {{n:{n}}}\n"));
    }
}
