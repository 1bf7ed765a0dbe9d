//! Level router: decides which levels reach the bus and wraps them
//!
//! The forwarding set holds every level at least as severe as the
//! configured remote threshold, plus `remote` and `audit` no matter what.
//! Each forwarded level gets a function that writes through the backend's
//! base function first and then publishes, so console output never depends
//! on the bus.

use crate::backend::{LogBackend, LogFn};
use crate::level::{self, Level, AUDIT, REMOTE};
use crate::publisher::{BusPublisher, AUDIT_LOG_SUBJECT, REMOTE_LOG_SUBJECT};
use crate::types::LogEnvelope;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Audit function: `(user_id, msg, payload)`
pub type AuditFn = Arc<dyn Fn(&str, &str, Option<Value>) + Send + Sync>;

/// Levels forwarded to the bus, in rank order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingSet {
    levels: Vec<&'static Level>,
}

impl ForwardingSet {
    /// Compute the set for a threshold level name
    ///
    /// An unknown name forwards nothing by rank; `remote` and `audit` are
    /// still included.
    pub fn compute(threshold: &str) -> Self {
        let mut levels: Vec<&'static Level> = match level::rank(threshold) {
            Some(max_rank) => Level::all()
                .iter()
                .filter(|l| l.rank() <= max_rank)
                .collect(),
            None => {
                tracing::debug!(threshold = %threshold, "Unknown remote log level, forwarding remote and audit only");
                Vec::new()
            }
        };

        for name in [REMOTE, AUDIT] {
            if !levels.iter().any(|l| l.name() == name) {
                if let Some(mandatory) = Level::find(name) {
                    levels.push(mandatory);
                }
            }
        }

        levels.sort_by_key(|l| l.rank());
        Self { levels }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.levels.iter().any(|l| l.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.levels.iter().map(|l| l.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Level> + '_ {
        self.levels.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Level functions after routing: wrapped where forwarded, base otherwise
#[derive(Clone, Default)]
pub struct LevelTable {
    levels: HashMap<&'static str, LogFn>,
    audit: Option<AuditFn>,
}

impl LevelTable {
    /// Function for a non-audit level
    pub fn get(&self, level: &str) -> Option<&LogFn> {
        self.levels.get(level)
    }

    pub fn audit(&self) -> Option<&AuditFn> {
        self.audit.as_ref()
    }

    /// Call a level's function; `false` if the table has none
    pub fn call(&self, level: &str, args: &[Value]) -> bool {
        match self.levels.get(level) {
            Some(f) => {
                f(args);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for LevelTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut levels: Vec<_> = self.levels.keys().collect();
        levels.sort();
        f.debug_struct("LevelTable")
            .field("levels", &levels)
            .field("audit", &self.audit.is_some())
            .finish()
    }
}

/// Builds level tables that forward to a publisher
#[derive(Debug, Clone)]
pub struct LevelRouter {
    publisher: BusPublisher,
}

impl LevelRouter {
    pub fn new(publisher: BusPublisher) -> Self {
        Self { publisher }
    }

    /// Build the level table for `backend`
    ///
    /// Always starts from the backend's own functions, so a level is wrapped
    /// exactly once per table. Levels the backend has no function for are
    /// left out.
    pub fn install(&self, backend: &dyn LogBackend, forwarding: &ForwardingSet) -> LevelTable {
        let mut table = LevelTable::default();

        for level in Level::all() {
            let Some(base) = backend.level_fn(level.name()) else {
                tracing::debug!(level = %level, "Backend has no function for level, skipping");
                continue;
            };

            if level.name() == AUDIT {
                table.audit = Some(self.wrap_audit(base));
            } else if forwarding.contains(level.name()) {
                table.levels.insert(level.name(), self.wrap(level, base));
            } else {
                table.levels.insert(level.name(), base);
            }
        }

        tracing::debug!(forwarded = ?forwarding.names(), "Remote log levels attached");
        table
    }

    fn wrap(&self, level: &'static Level, base: LogFn) -> LogFn {
        let publisher = self.publisher.clone();
        Arc::new(move |args: &[Value]| {
            base(args);
            publisher.publish(REMOTE_LOG_SUBJECT, LogEnvelope::remote(level.name(), args));
        })
    }

    fn wrap_audit(&self, base: LogFn) -> AuditFn {
        let publisher = self.publisher.clone();
        Arc::new(move |user_id: &str, msg: &str, payload: Option<Value>| {
            base(&[Value::String(format!("[{}] {}", user_id, msg))]);
            publisher.publish(AUDIT_LOG_SUBJECT, LogEnvelope::audit(user_id, msg, payload));
        })
    }
}
