//! The logger facade
//!
//! `Logger` owns its configuration and the routed level table. Every level
//! call writes through the backend; forwarded levels also publish to the bus.

use crate::backend::{Backend, LogBackend};
use crate::config::LoggerConfig;
use crate::error::{LogError, Result};
use crate::level::{Level, AUDIT};
use crate::publisher::BusPublisher;
use crate::router::{ForwardingSet, LevelRouter, LevelTable};
use crate::timestamp::TimestampFormatter;
use crate::transport::{self, ConsoleTransport};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Leveled logger with bus forwarding
pub struct Logger {
    config: LoggerConfig,
    backend: Arc<dyn LogBackend>,
    forwarding: ForwardingSet,
    table: LevelTable,
}

/// Builder for a `Logger` with non-default collaborators
pub struct LoggerBuilder {
    config: LoggerConfig,
    backend: Option<Arc<dyn LogBackend>>,
    console: Option<ConsoleTransport>,
    publisher: BusPublisher,
}

impl LoggerBuilder {
    /// Use a custom backend instead of the built-in one
    pub fn backend(mut self, backend: Arc<dyn LogBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Console transport to register (stdout by default)
    pub fn console(mut self, console: ConsoleTransport) -> Self {
        self.console = Some(console);
        self
    }

    /// Publisher used for forwarded levels (disabled by default)
    pub fn publisher(mut self, publisher: BusPublisher) -> Self {
        self.publisher = publisher;
        self
    }

    /// Validate the configuration and assemble the logger
    ///
    /// Fails on an unknown `log_level` or timezone. An unknown
    /// `remote_log_level` only narrows forwarding to `remote` and `audit`.
    pub fn build(self) -> Result<Logger> {
        if Level::find(&self.config.log_level).is_none() {
            return Err(LogError::UnknownLevel(self.config.log_level));
        }
        let timestamps = TimestampFormatter::new(&self.config.timestamp_timezone)?;

        Ok(Logger::assemble(
            self.config,
            timestamps,
            self.backend,
            self.console,
            self.publisher,
        ))
    }
}

impl Logger {
    /// Logger on stdout without bus forwarding
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: LoggerConfig) -> LoggerBuilder {
        LoggerBuilder {
            config,
            backend: None,
            console: None,
            publisher: BusPublisher::disabled(),
        }
    }

    /// Logger with the default configuration; cannot fail
    pub fn with_defaults(publisher: BusPublisher) -> Self {
        Self::assemble(
            LoggerConfig::default(),
            TimestampFormatter::default(),
            None,
            None,
            publisher,
        )
    }

    fn assemble(
        config: LoggerConfig,
        timestamps: TimestampFormatter,
        backend: Option<Arc<dyn LogBackend>>,
        console: Option<ConsoleTransport>,
        publisher: BusPublisher,
    ) -> Self {
        let backend = backend.unwrap_or_else(|| Arc::new(Backend::new()));

        if let Err(e) = transport::configure_console(
            backend.as_ref(),
            console.unwrap_or_default(),
            &config.log_level,
            timestamps,
        ) {
            tracing::warn!(error = %e, "Console transport not registered");
        }

        let forwarding = ForwardingSet::compute(&config.remote_log_level);
        let table = LevelRouter::new(publisher).install(backend.as_ref(), &forwarding);

        Self {
            config,
            backend,
            forwarding,
            table,
        }
    }

    /// Something really bad happened
    pub fn error(&self, args: &[Value]) {
        self.table.call("error", args);
    }

    /// Something went wrong, but did not fail completely
    pub fn warn(&self, args: &[Value]) {
        self.table.call("warn", args);
    }

    /// Always forwarded to the bus, whatever the remote threshold
    pub fn remote(&self, args: &[Value]) {
        self.table.call("remote", args);
    }

    pub fn info(&self, args: &[Value]) {
        self.table.call("info", args);
    }

    pub fn debug(&self, args: &[Value]) {
        self.table.call("debug", args);
    }

    /// Log everything
    pub fn silly(&self, args: &[Value]) {
        self.table.call("silly", args);
    }

    /// Audit entry for `user_id`
    ///
    /// Printed as `[user_id] msg`; the payload only goes to the bus.
    pub fn audit(&self, user_id: &str, msg: &str, payload: Option<Value>) {
        if let Some(audit) = self.table.audit() {
            audit(user_id, msg, payload);
        }
    }

    /// Log at a level given by name
    pub fn log(&self, level: &str, args: &[Value]) -> Result<()> {
        if level == AUDIT {
            return Err(LogError::Config(
                "audit entries need a user id, use Logger::audit".to_string(),
            ));
        }
        if Level::find(level).is_none() {
            return Err(LogError::UnknownLevel(level.to_string()));
        }
        self.table.call(level, args);
        Ok(())
    }

    /// Also send everything at or above `log_level` to a remote syslog
    ///
    /// A connection failure is logged locally at `error`, never forwarded,
    /// and returned; the logger keeps working either way.
    pub fn enable_remote_syslog(&self, host_and_port: &str, name: &str, program: &str) -> Result<()> {
        let registered = transport::configure_syslog(
            self.backend.as_ref(),
            host_and_port,
            name,
            program,
            &self.config.log_level,
        );

        if let Err(ref e) = registered {
            if let Some(local_error) = self.backend.level_fn("error") {
                local_error(&[
                    Value::String(format!("Failed connecting to papertrail {}", host_and_port)),
                    Value::String(e.to_string()),
                ]);
            }
        }
        registered
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn forwarding_set(&self) -> &ForwardingSet {
        &self.forwarding
    }

    pub fn is_forwarded(&self, level: &str) -> bool {
        self.forwarding.contains(level)
    }

    pub fn backend(&self) -> &Arc<dyn LogBackend> {
        &self.backend
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("forwarding", &self.forwarding.names())
            .field("table", &self.table)
            .finish()
    }
}
