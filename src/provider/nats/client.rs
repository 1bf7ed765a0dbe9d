//! NATS client: connect and fire-and-forget publish

use super::config::NatsConfig;
use crate::error::{LogError, Result};
use crate::provider::BusClient;
use crate::types::BusEnvelope;
use async_nats::connection::State;
use std::time::Duration;
use tokio::runtime::Handle;

/// NATS bus client
///
/// Publishes are spawned on the runtime the client was connected on and
/// never awaited by the caller, so plain threads can log too. Failures after
/// the spawn are only traced.
pub struct NatsBus {
    /// NATS client connection
    client: async_nats::Client,

    /// Configuration
    config: NatsConfig,

    /// Runtime that drives publishes
    runtime: Handle,
}

impl NatsBus {
    /// Connect to NATS
    ///
    /// Must be awaited on a tokio runtime; that runtime carries every later
    /// publish.
    pub async fn connect(config: NatsConfig) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| LogError::Connection(format!("no tokio runtime: {}", e)))?;
        let connect_opts = build_connect_options(&config);

        let client = connect_opts
            .connect(&config.url)
            .await
            .map_err(|e| LogError::Connection(format!("{}: {}", config.url, e)))?;

        tracing::info!(url = %config.url, "Connected to NATS");

        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Wrap an already connected client, publishing on `runtime`
    pub fn from_client(client: async_nats::Client, config: NatsConfig, runtime: Handle) -> Self {
        Self {
            client,
            config,
            runtime,
        }
    }

    /// Get the underlying NATS client
    pub fn nats_client(&self) -> &async_nats::Client {
        &self.client
    }

    /// Get the configuration
    pub fn config(&self) -> &NatsConfig {
        &self.config
    }
}

impl BusClient for NatsBus {
    fn is_connected(&self) -> bool {
        self.client.connection_state() == State::Connected
    }

    fn publish(&self, subject: &str, envelope: &BusEnvelope) -> Result<()> {
        let payload = serde_json::to_vec(envelope)?;

        let client = self.client.clone();
        let subject = subject.to_string();
        let correlation_id = envelope.correlation_id.clone();

        self.runtime.spawn(async move {
            if let Err(e) = client.publish(subject.clone(), bytes::Bytes::from(payload)).await {
                tracing::debug!(
                    subject = %subject,
                    correlation_id = %correlation_id,
                    error = %e,
                    "Dropped log entry"
                );
            }
        });

        Ok(())
    }

    fn name(&self) -> &str {
        "nats"
    }
}

/// Build NATS connect options from config
fn build_connect_options(config: &NatsConfig) -> async_nats::ConnectOptions {
    let mut opts = async_nats::ConnectOptions::new()
        .connection_timeout(Duration::from_secs(config.connect_timeout_secs))
        .request_timeout(Some(Duration::from_secs(config.request_timeout_secs)));

    if let Some(ref name) = config.name {
        opts = opts.name(name.clone());
    }

    if let Some(ref token) = config.token {
        opts = opts.token(token.clone());
    }

    opts
}
