//! # a3s-log
//!
//! Leveled console logging with remote and audit forwarding over the A3S
//! event bus.
//!
//! ## Overview
//!
//! Every call writes to the console with a zoned timestamp. Calls at or
//! above the configured remote threshold, and every `remote` and `audit`
//! call, are also published to the `log` subject for central collection.
//! Publishing is best-effort: a missing or broken bus never affects the
//! caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_log::{args, BusPublisher, Logger, LoggerConfig, MemoryBus};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn example() -> a3s_log::Result<()> {
//! let bus = Arc::new(MemoryBus::new());
//! let logger = Logger::builder(LoggerConfig::default().with_remote_log_level("warn"))
//!     .publisher(BusPublisher::new(bus.clone()))
//!     .build()?;
//!
//! logger.info(args!["service started on port", 8080]);
//! logger.error(args!["payment failed", json!({"orderId": "o-1"})]);
//! logger.audit("user-1", "changed password", None);
//!
//! assert_eq!(bus.published().len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Levels
//!
//! | level  | rank | forwarded                       |
//! |--------|------|---------------------------------|
//! | error  | 0    | when threshold >= error         |
//! | warn   | 1    | when threshold >= warn          |
//! | remote | 2    | always                          |
//! | audit  | 3    | always, as `{userId, msg, ...}` |
//! | info   | 4    | when threshold >= info          |
//! | debug  | 5    | when threshold >= debug         |
//! | silly  | 7    | when threshold is silly         |
//!
//! ## Architecture
//!
//! - **LogBackend** trait: per-level functions and transport registration
//! - **LevelRouter**: computes the forwarding set and wraps forwarded levels
//! - **BusPublisher**: lazy, fire-and-forget publishing over a `BusClient`
//! - **Logger**: the facade applications call

pub mod backend;
pub mod config;
pub mod error;
pub mod global;
pub mod level;
pub mod logger;
pub mod provider;
pub mod publisher;
pub mod router;
pub mod timestamp;
pub mod transport;
pub mod types;

// Re-export core types
pub use backend::{Backend, LogBackend, LogFn};
pub use config::{LoggerConfig, SyslogConfig};
pub use error::{LogError, Result};
pub use global::{create_logger, global, install_panic_hook, register_bus_client};
pub use level::{Level, LevelColor, AUDIT, REMOTE};
pub use logger::{Logger, LoggerBuilder};
pub use provider::BusClient;
pub use publisher::{BusPublisher, AUDIT_LOG_SUBJECT, REMOTE_LOG_SUBJECT};
pub use router::{AuditFn, ForwardingSet, LevelRouter, LevelTable};
pub use timestamp::TimestampFormatter;
pub use transport::{ConsoleTransport, Record, SyslogTransport, Transport, TransportConfig};
pub use types::{AuditLog, BusEnvelope, LogEnvelope, RemoteLog};

// Re-export bus clients for convenience
pub use provider::memory::{MemoryBus, PublishedEntry};
pub use provider::nats::{NatsBus, NatsConfig};

/// Build a message argument slice from serializable values
///
/// ```rust
/// let args = a3s_log::args!["retrying", 3, serde_json::json!({"host": "db-1"})];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        &[$($crate::__to_value(&$arg)),*]
    };
}

#[doc(hidden)]
pub fn __to_value<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}
