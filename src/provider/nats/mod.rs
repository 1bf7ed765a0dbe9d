//! NATS bus client
//!
//! Implements `BusClient` on top of a core NATS connection. Log forwarding
//! is plain publish; no JetStream stream is required.

mod client;
mod config;

pub use client::NatsBus;
pub use config::NatsConfig;
