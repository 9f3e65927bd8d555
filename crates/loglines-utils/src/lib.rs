//! # loglines Utilities
//!
//! Wires the [`loglines_core`] formatter into `tracing`.
//!
//! This crate provides:
//! - [`TemplateFormat`], a `tracing_subscriber` event formatter that renders
//!   events through a [`LineFormatter`](loglines_core::LineFormatter)
//! - [`create_logger`] and [`LoggerBuilder`] to build a ready-to-use logger
//! - [`init_logging`] for environment-driven global setup
//! - [`CaptureWriter`], an in-memory writer for asserting on log output

pub mod capture;
pub mod format;
pub mod logging;

pub use capture::CaptureWriter;
pub use format::TemplateFormat;
// Re-export commonly used logging functions for convenience
pub use logging::{Logger, LoggerBuilder, LoggingError, create_logger, init_logging};
pub use tracing::{debug, error, info, trace, warn};
