//! Process-wide wiring: factory, bus registry, singleton, panic hook
//!
//! Libraries should take a `Logger` by injection. These helpers exist for
//! the application boundary.

use crate::config::LoggerConfig;
use crate::error::Result;
use crate::logger::Logger;
use crate::provider::BusClient;
use crate::publisher::{self, BusPublisher};
use serde_json::Value;
use std::sync::{Arc, OnceLock};

static BUS_CLIENT: OnceLock<Arc<dyn BusClient>> = OnceLock::new();
static GLOBAL: OnceLock<Arc<Logger>> = OnceLock::new();

/// Build a logger from configuration, enabling syslog when configured
///
/// A syslog that cannot be reached is reported through the logger and
/// otherwise ignored.
pub fn create_logger(config: LoggerConfig, bus: BusPublisher) -> Result<Logger> {
    let syslog = config.syslog.clone();
    let logger = Logger::builder(config).publisher(bus).build()?;

    if let Some(syslog) = syslog {
        if let Err(e) =
            logger.enable_remote_syslog(&syslog.host_and_port, &syslog.name, &syslog.program)
        {
            tracing::debug!(error = %e, "Continuing without remote syslog");
        }
    }

    Ok(logger)
}

/// Register the process-wide bus client
///
/// Returns `false` if a client was already registered; the first one stays.
pub fn register_bus_client(client: Arc<dyn BusClient>) -> bool {
    let name = client.name().to_string();
    let registered = BUS_CLIENT.set(client).is_ok();
    if registered {
        tracing::info!(client = %name, "Bus client registered for log forwarding");
    }
    registered
}

/// The registered process-wide bus client, if any
pub fn registered_bus_client() -> Option<Arc<dyn BusClient>> {
    BUS_CLIENT.get().cloned()
}

/// Process-wide logger configured from the environment on first use
///
/// Falls back to the default configuration if the environment is invalid.
/// Forwarding goes through the client given to `register_bus_client`, which
/// may be registered before or after the first call.
pub fn global() -> Arc<Logger> {
    GLOBAL
        .get_or_init(|| {
            let logger = match create_logger(LoggerConfig::from_env(), BusPublisher::global()) {
                Ok(logger) => logger,
                Err(e) => {
                    tracing::warn!(error = %e, "Invalid logger environment, using defaults");
                    Logger::with_defaults(BusPublisher::global())
                }
            };
            Arc::new(logger)
        })
        .clone()
}

/// Log every panic at `error` before handing it to the previous hook
///
/// Panics raised by a bus client while publishing are not logged again, so
/// a broken client cannot recurse through the hook.
pub fn install_panic_hook(logger: Arc<Logger>) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if !publisher::publishing_in_progress() {
            logger.error(&[Value::String(info.to_string())]);
        }
        previous(info);
    }));
}
