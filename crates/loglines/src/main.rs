use std::io::{self, Write};
use std::process;

use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, Subcommand};
use loglines_core::{parse_field, FieldValue, FormatterConfig, Level, LineFormatter, LogEntry};
use loglines_utils::{create_logger, debug, error, info, warn};

/// Render structured log entries into single lines with configurable templates.
#[derive(Parser, Debug)]
#[command(name = "loglines")]
#[command(version)]
#[command(about = "Render structured log entries into single lines with configurable templates", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Render one entry and print it to stdout
    Render
    {
        /// Log message
        message: String,
        /// Severity (panic, fatal, error, warning, info, debug, trace)
        #[arg(short, long, default_value = "info")]
        level: Level,
        /// Entry time as RFC 3339 (default: now)
        #[arg(long, value_parser = parse_time)]
        time: Option<DateTime<FixedOffset>>,
        /// Caller source file
        #[arg(long)]
        file: Option<String>,
        /// Caller line number (used with --file)
        #[arg(long, requires = "file")]
        line: Option<u32>,
        /// Field as key=value (repeatable)
        #[arg(short = 'F', long = "field", value_parser = parse_field)]
        fields: Vec<(String, FieldValue)>,
        /// Line template (default: "%time% [%level%] %filename%:%line% %message% {%fields%}")
        #[arg(short, long, default_value = "")]
        template: String,
        /// Timestamp layout (default: "2006/02/01 15:04:05")
        #[arg(long, default_value = "")]
        timestamp_format: String,
        /// Cut level names to their first 4 characters
        #[arg(long, default_value_t = false)]
        truncate_level: bool,
    },
    /// Emit sample events through the standard stderr logger
    Demo
    {
        /// Log at debug level instead of info
        #[arg(long, default_value_t = false)]
        debug: bool,
        /// Timestamp layout (default: "2006/02/01 15:04:05")
        #[arg(long, default_value = "")]
        timestamp_format: String,
    },
}

fn parse_time(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError>
{
    DateTime::parse_from_rfc3339(value)
}

fn main()
{
    let cli = Cli::parse();

    if let Err(e) = run_command(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>>
{
    match cli.command {
        Commands::Render {
            message,
            level,
            time,
            file,
            line,
            fields,
            template,
            timestamp_format,
            truncate_level,
        } => {
            let config = FormatterConfig::new()
                .with_line_template(template)
                .with_timestamp_format(timestamp_format)
                .with_level_truncation_disabled(!truncate_level);

            let time = time.unwrap_or_else(|| Local::now().fixed_offset());
            let mut entry = LogEntry::new(time, level, message);
            if let Some(file) = file {
                entry = entry.with_caller(file, line.unwrap_or(0));
            }
            entry.fields.extend(fields);

            let mut stdout = io::stdout().lock();
            stdout.write_all(&LineFormatter::new(&config).format(&entry))?;
            stdout.flush()?;
            Ok(())
        }
        Commands::Demo { debug, timestamp_format } => {
            create_logger(debug, &timestamp_format).init()?;
            run_demo();
            Ok(())
        }
    }
}

fn run_demo()
{
    info!("Application started");
    debug!(config = "default", "Loaded configuration (visible with --debug)");

    // Structured logging with fields
    info!(user_id = 12345, action = "login", ratio = 0.5, admin = false, "User logged in");
    warn!(elapsed_ms = 1532_u64, "Slow request");

    // Logging with error context
    let result: Result<(), io::Error> = Err(io::Error::other("Something went wrong"));
    if let Err(e) = result {
        let e: &(dyn std::error::Error + 'static) = &e;
        error!(error = e, "Operation failed");
    }

    info!(started = %Local::now().to_rfc3339(), "Application finished");
}
