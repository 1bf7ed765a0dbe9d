//! Logging backend: one callable per level, multiplexed over transports
//!
//! `LogBackend` is the seam the router decorates. `Backend` is the built-in
//! implementation; anything exposing per-level functions and transport
//! registration can stand in for it.

use crate::error::{LogError, Result};
use crate::level::Level;
use crate::transport::{Record, Transport, TransportConfig};
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// A level's log function taking variadic message arguments
pub type LogFn = Arc<dyn Fn(&[Value]) + Send + Sync>;

/// Backend exposing one log function per level and transport registration
pub trait LogBackend: Send + Sync {
    /// The unwrapped log function for a level, `None` if the backend has none
    fn level_fn(&self, level: &str) -> Option<LogFn>;

    /// Register an output transport
    fn add_transport(&self, transport: Box<dyn Transport>, config: TransportConfig) -> Result<()>;
}

struct Registered {
    transport: Box<dyn Transport>,
    floor: &'static Level,
    config: TransportConfig,
}

#[derive(Default)]
struct Inner {
    transports: RwLock<Vec<Registered>>,
}

impl Inner {
    fn write(&self, level: &'static Level, args: &[Value]) {
        let message = render_message(args);
        let transports = self
            .transports
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        for registered in transports.iter() {
            if !level.is_enabled_for(registered.floor) {
                continue;
            }

            let record = Record {
                level,
                message: &message,
                args,
                timestamp: registered.config.timestamp.as_ref().map(|ts| ts()),
            };

            if let Err(e) = registered.transport.write(&record) {
                match &registered.config.on_error {
                    Some(on_error) => on_error(&e),
                    None => tracing::warn!(
                        transport = registered.transport.name(),
                        error = %e,
                        "Transport write failed"
                    ),
                }
            }
        }
    }
}

/// Built-in backend writing every call to all admitting transports
#[derive(Clone, Default)]
pub struct Backend {
    inner: Arc<Inner>,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one call at `level` to the registered transports
    pub fn write(&self, level: &'static Level, args: &[Value]) {
        self.inner.write(level, args);
    }

    /// Names of registered transports, in registration order
    pub fn transport_names(&self) -> Vec<String> {
        self.inner
            .transports
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|r| r.transport.name().to_string())
            .collect()
    }
}

impl LogBackend for Backend {
    fn level_fn(&self, level: &str) -> Option<LogFn> {
        let level = Level::find(level)?;
        let inner = self.inner.clone();
        Some(Arc::new(move |args: &[Value]| inner.write(level, args)))
    }

    fn add_transport(&self, transport: Box<dyn Transport>, config: TransportConfig) -> Result<()> {
        let floor =
            Level::find(&config.level).ok_or_else(|| LogError::UnknownLevel(config.level.clone()))?;

        tracing::debug!(
            transport = transport.name(),
            level = %floor,
            "Transport registered"
        );

        self.inner
            .transports
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Registered {
                transport,
                floor,
                config,
            });
        Ok(())
    }
}

/// Render message arguments: strings verbatim, other values as compact JSON
pub fn render_message(args: &[Value]) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Recording {
        name: &'static str,
        lines: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Transport for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn write(&self, record: &Record<'_>) -> Result<()> {
            if self.fail {
                return Err(LogError::Transport {
                    transport: self.name.to_string(),
                    reason: "broken".to_string(),
                });
            }
            let line = match &record.timestamp {
                Some(ts) => format!("{} {} {}", ts, record.level, record.message),
                None => format!("{} {}", record.level, record.message),
            };
            self.lines.lock().unwrap().push(line);
            Ok(())
        }
    }

    fn recording(name: &'static str) -> Recording {
        Recording {
            name,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_message() {
        assert_eq!(
            render_message(&[json!("user"), json!(42), json!({"a": true}), json!(null)]),
            r#"user 42 {"a":true} null"#
        );
        assert_eq!(render_message(&[]), "");
    }

    #[test]
    fn test_floor_filters_levels() {
        let backend = Backend::new();
        let rec = recording("rec");
        backend
            .add_transport(Box::new(rec.clone()), TransportConfig::new("warn"))
            .unwrap();

        backend.level_fn("error").unwrap()(&[json!("e")]);
        backend.level_fn("warn").unwrap()(&[json!("w")]);
        backend.level_fn("info").unwrap()(&[json!("i")]);

        assert_eq!(*rec.lines.lock().unwrap(), vec!["error e", "warn w"]);
    }

    #[test]
    fn test_timestamp_hook_per_write() {
        let backend = Backend::new();
        let rec = recording("rec");
        let counter = Arc::new(Mutex::new(0));
        let hook_counter = counter.clone();
        backend
            .add_transport(
                Box::new(rec.clone()),
                TransportConfig::new("silly").with_timestamp(Arc::new(move || {
                    let mut n = hook_counter.lock().unwrap();
                    *n += 1;
                    format!("[t{}]", n)
                })),
            )
            .unwrap();

        let info = backend.level_fn("info").unwrap();
        info(&[json!("a")]);
        info(&[json!("b")]);

        assert_eq!(*rec.lines.lock().unwrap(), vec!["[t1] info a", "[t2] info b"]);
    }

    #[test]
    fn test_unknown_level_has_no_fn() {
        let backend = Backend::new();
        assert!(backend.level_fn("verbose").is_none());
        assert!(matches!(
            backend.add_transport(Box::new(recording("rec")), TransportConfig::new("loud")),
            Err(LogError::UnknownLevel(ref l)) if l == "loud"
        ));
    }

    #[test]
    fn test_transport_failure_goes_to_callback() {
        let backend = Backend::new();
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = errors.clone();
        let broken = Recording {
            name: "broken",
            fail: true,
            ..Default::default()
        };
        let healthy = recording("healthy");

        backend
            .add_transport(
                Box::new(broken),
                TransportConfig::new("info")
                    .with_error_callback(Arc::new(move |e: &LogError| {
                        sink.lock().unwrap().push(e.to_string())
                    })),
            )
            .unwrap();
        backend
            .add_transport(Box::new(healthy.clone()), TransportConfig::new("info"))
            .unwrap();

        backend.level_fn("error").unwrap()(&[json!("still logged")]);

        assert_eq!(errors.lock().unwrap().len(), 1);
        assert_eq!(*healthy.lines.lock().unwrap(), vec!["error still logged"]);
        assert_eq!(backend.transport_names(), vec!["broken", "healthy"]);
    }

    #[test]
    fn test_level_fn_sees_later_transports() {
        let backend = Backend::new();
        let error = backend.level_fn("error").unwrap();
        let rec = recording("late");
        backend
            .add_transport(Box::new(rec.clone()), TransportConfig::new("error"))
            .unwrap();

        error(&[json!("after")]);
        assert_eq!(*rec.lines.lock().unwrap(), vec!["error after"]);
    }
}
