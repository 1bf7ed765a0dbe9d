//! Output transports and their registration
//!
//! A transport receives rendered records for every level its floor admits.
//! `configure_console` and `configure_syslog` wire the two built-in
//! transports into a backend the same way every logger does.

use crate::backend::LogBackend;
use crate::error::{LogError, Result};
use crate::level::Level;
use crate::timestamp::TimestampFormatter;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub mod console;
pub mod syslog;

pub use console::ConsoleTransport;
pub use syslog::SyslogTransport;

/// Produces the timestamp prefix of a console line, evaluated per write
pub type TimestampFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Receives write failures of a transport
pub type ErrorCallback = Arc<dyn Fn(&LogError) + Send + Sync>;

/// One log call as seen by a transport
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub level: &'static Level,
    /// Arguments rendered and joined with spaces
    pub message: &'a str,
    /// Original arguments, untouched
    pub args: &'a [Value],
    /// Output of the transport's timestamp hook, if it has one
    pub timestamp: Option<String>,
}

/// Output sink for log records
pub trait Transport: Send + Sync {
    /// Transport name (e.g., "console", "syslog")
    fn name(&self) -> &str;

    /// Write one record
    fn write(&self, record: &Record<'_>) -> Result<()>;
}

/// Per-transport registration settings
#[derive(Clone)]
pub struct TransportConfig {
    /// Least severe level this transport accepts
    pub level: String,
    pub timestamp: Option<TimestampFn>,
    pub on_error: Option<ErrorCallback>,
}

impl TransportConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            timestamp: None,
            on_error: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: TimestampFn) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_error_callback(mut self, on_error: ErrorCallback) -> Self {
        self.on_error = Some(on_error);
        self
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("level", &self.level)
            .field("timestamp", &self.timestamp.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Register the console transport with zoned timestamps
pub fn configure_console(
    backend: &dyn LogBackend,
    console: ConsoleTransport,
    level: &str,
    timestamps: TimestampFormatter,
) -> Result<()> {
    let config = TransportConfig::new(level)
        .with_timestamp(Arc::new(move || timestamps.format()));
    backend.add_transport(Box::new(console), config)
}

/// Connect and register a remote syslog transport
///
/// Write failures after registration are traced, not logged through the
/// logger, so a broken syslog link cannot feed back into itself.
pub fn configure_syslog(
    backend: &dyn LogBackend,
    host_and_port: &str,
    name: &str,
    program: &str,
    level: &str,
) -> Result<()> {
    let transport = SyslogTransport::connect(host_and_port, name, program)?;
    let target = host_and_port.to_string();
    let config = TransportConfig::new(level).with_error_callback(Arc::new(move |e: &LogError| {
        tracing::warn!(target = %target, error = %e, "Remote syslog write failed");
    }));
    backend.add_transport(Box::new(transport), config)
}
