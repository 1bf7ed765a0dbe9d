//! In-memory bus client
//!
//! Records every published envelope. Used by tests and by single-process
//! setups that want to inspect forwarded logs without a broker.

use super::BusClient;
use crate::error::{LogError, Result};
use crate::types::BusEnvelope;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// A published envelope together with its subject
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedEntry {
    pub subject: String,
    pub envelope: BusEnvelope,
}

/// Bus client that keeps published envelopes in memory
#[derive(Debug)]
pub struct MemoryBus {
    connected: AtomicBool,
    fail_publish: AtomicBool,
    published: Mutex<Vec<PublishedEntry>>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            fail_publish: AtomicBool::new(false),
            published: Mutex::new(Vec::new()),
        }
    }

    /// Toggle the connectivity flag reported by `is_connected`
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Make every subsequent publish return an error
    pub fn set_fail_publish(&self, fail: bool) {
        self.fail_publish.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of everything published so far, oldest first
    pub fn published(&self) -> Vec<PublishedEntry> {
        self.entries().clone()
    }

    /// Published envelopes for one subject
    pub fn published_to(&self, subject: &str) -> Vec<BusEnvelope> {
        self.entries()
            .iter()
            .filter(|e| e.subject == subject)
            .map(|e| e.envelope.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    fn entries(&self) -> MutexGuard<'_, Vec<PublishedEntry>> {
        self.published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl BusClient for MemoryBus {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn publish(&self, subject: &str, envelope: &BusEnvelope) -> Result<()> {
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(LogError::Publish {
                subject: subject.to_string(),
                reason: "memory bus set to fail".to_string(),
            });
        }

        self.entries().push(PublishedEntry {
            subject: subject.to_string(),
            envelope: envelope.clone(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogEnvelope;

    #[test]
    fn test_records_by_subject() {
        let bus = MemoryBus::new();
        bus.publish("log", &BusEnvelope::new(LogEnvelope::remote("error", &[])))
            .unwrap();
        bus.publish("other", &BusEnvelope::new(LogEnvelope::remote("warn", &[])))
            .unwrap();

        assert_eq!(bus.published().len(), 2);
        let log = bus.published_to("log");
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].data.level(), "error");

        bus.clear();
        assert!(bus.published().is_empty());
    }

    #[test]
    fn test_connectivity_flag() {
        let bus = MemoryBus::default();
        assert!(bus.is_connected());
        bus.set_connected(false);
        assert!(!bus.is_connected());
        assert_eq!(bus.name(), "memory");
    }

    #[test]
    fn test_fail_publish() {
        let bus = MemoryBus::new();
        bus.set_fail_publish(true);
        let err = bus
            .publish("log", &BusEnvelope::new(LogEnvelope::remote("error", &[])))
            .unwrap_err();
        assert!(matches!(err, LogError::Publish { ref subject, .. } if subject == "log"));
        assert!(bus.published().is_empty());
    }
}
