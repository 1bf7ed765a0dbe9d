//! Process-wide wiring tests
//!
//! Kept in their own test binary: they touch the global logger, the global
//! bus client registry, and the panic hook.

use a3s_log::{
    args, global, install_panic_hook, register_bus_client, BusPublisher, ConsoleTransport,
    LogEnvelope, Logger, LoggerConfig, MemoryBus,
};
use std::io;
use std::sync::Arc;

#[test]
fn test_global_logger_forwards_through_registered_client() {
    let logger = global();
    assert!(Arc::ptr_eq(&logger, &global()));

    // No client registered yet: nothing to publish to, nothing fails
    logger.remote(args!["before registration"]);

    let bus = Arc::new(MemoryBus::new());
    assert!(register_bus_client(bus.clone()));
    assert!(!register_bus_client(Arc::new(MemoryBus::new())));

    logger.remote(args!["after registration"]);
    logger.audit("u7", "exported report", None);

    let levels: Vec<_> = bus
        .published()
        .iter()
        .map(|p| p.envelope.data.level().to_string())
        .collect();
    assert_eq!(levels, vec!["remote", "audit"]);
}

#[test]
fn test_panic_hook_logs_panics() {
    let bus = Arc::new(MemoryBus::new());
    let logger = Logger::builder(LoggerConfig::default())
        .console(ConsoleTransport::with_writer(io::sink()))
        .publisher(BusPublisher::new(bus.clone()))
        .build()
        .unwrap();
    install_panic_hook(Arc::new(logger));

    let result = std::thread::spawn(|| {
        panic!("worker exploded");
    })
    .join();
    assert!(result.is_err());

    let published = bus.published();
    assert_eq!(published.len(), 1);
    match &published[0].envelope.data {
        LogEnvelope::Remote(entry) => {
            assert_eq!(entry.level, "error");
            assert!(entry.msg[0]
                .as_str()
                .is_some_and(|m| m.contains("worker exploded")));
        }
        other => panic!("unexpected envelope: {:?}", other),
    }
}
