//! Best-effort publishing of log entries onto the bus
//!
//! `BusPublisher` never fails and never panics into the logging call site.
//! The client is resolved lazily through a provider closure so the bus can
//! be wired up after the logger exists.

use crate::provider::BusClient;
use crate::types::{BusEnvelope, LogEnvelope};
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

/// Subject for audit entries
pub const AUDIT_LOG_SUBJECT: &str = "log";

/// Subject for forwarded level entries
pub const REMOTE_LOG_SUBJECT: &str = "log";

type ClientProvider = dyn Fn() -> Option<Arc<dyn BusClient>> + Send + Sync;

thread_local! {
    static PUBLISHING: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is inside `BusPublisher::publish`
pub(crate) fn publishing_in_progress() -> bool {
    PUBLISHING.with(Cell::get)
}

struct PublishingGuard(bool);

impl PublishingGuard {
    fn enter() -> Self {
        Self(PUBLISHING.with(|p| p.replace(true)))
    }
}

impl Drop for PublishingGuard {
    fn drop(&mut self) {
        let previous = self.0;
        PUBLISHING.with(|p| p.set(previous));
    }
}

/// Fire-and-forget publisher over an optional, lazily resolved bus client
#[derive(Clone)]
pub struct BusPublisher {
    provider: Arc<ClientProvider>,
    client: Arc<OnceLock<Arc<dyn BusClient>>>,
}

impl BusPublisher {
    /// Resolve the client through `provider` on first publish
    ///
    /// A `None` from the provider is not memoized; the next publish asks
    /// again.
    pub fn lazy<F>(provider: F) -> Self
    where
        F: Fn() -> Option<Arc<dyn BusClient>> + Send + Sync + 'static,
    {
        Self {
            provider: Arc::new(provider),
            client: Arc::new(OnceLock::new()),
        }
    }

    /// Publisher bound to a known client
    pub fn new(client: Arc<dyn BusClient>) -> Self {
        let publisher = Self::lazy(|| None);
        let _ = publisher.client.set(client);
        publisher
    }

    /// Publisher that never publishes
    pub fn disabled() -> Self {
        Self::lazy(|| None)
    }

    /// Publisher backed by the process-wide client registry
    pub fn global() -> Self {
        Self::lazy(crate::global::registered_bus_client)
    }

    /// Publish `data` to `subject` inside a fresh correlation envelope
    ///
    /// Silently does nothing if no client is available or it is not
    /// connected. Errors and panics from the client are swallowed.
    pub fn publish(&self, subject: &str, data: LogEnvelope) {
        let _guard = PublishingGuard::enter();
        let Some(client) = self.resolve() else {
            return;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            if !client.is_connected() {
                return Ok(());
            }
            client.publish(subject, &BusEnvelope::new(data))
        }));

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::debug!(subject = %subject, error = %e, "Bus publish failed");
            }
            Err(_) => {
                tracing::debug!(subject = %subject, client = client.name(), "Bus client panicked");
            }
        }
    }

    /// Currently resolved client, resolving it if needed
    pub fn client(&self) -> Option<Arc<dyn BusClient>> {
        self.resolve()
    }

    fn resolve(&self) -> Option<Arc<dyn BusClient>> {
        if let Some(client) = self.client.get() {
            return Some(client.clone());
        }

        let resolved = panic::catch_unwind(AssertUnwindSafe(|| (self.provider)()))
            .ok()
            .flatten()?;

        // Losing a race here is fine: the first stored client wins.
        let _ = self.client.set(resolved);
        self.client.get().cloned()
    }
}

impl fmt::Debug for BusPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusPublisher")
            .field("client", &self.client.get().map(|c| c.name().to_string()))
            .finish()
    }
}
