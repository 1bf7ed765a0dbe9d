//! Bus client trait, the seam between the logger and a message bus
//!
//! The logger only needs a connectivity check and a publish operation.
//! Implementations must return quickly: anything that waits on the network
//! belongs on a spawned task, not on the logging call site.

use crate::error::Result;
use crate::types::BusEnvelope;

pub mod memory;
pub mod nats;

/// Minimal message bus client used for log forwarding
pub trait BusClient: Send + Sync {
    /// Whether the client is connected and can accept publishes
    fn is_connected(&self) -> bool;

    /// Publish an envelope to a subject without waiting for delivery
    fn publish(&self, subject: &str, envelope: &BusEnvelope) -> Result<()>;

    /// Client name (e.g., "nats", "memory")
    fn name(&self) -> &str;
}
