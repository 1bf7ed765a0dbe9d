//! Performance benchmarks for a3s-log
//!
//! Run with: cargo bench

use a3s_log::{
    args, BusEnvelope, BusPublisher, ConsoleTransport, ForwardingSet, LogEnvelope, Logger,
    LoggerConfig, MemoryBus, REMOTE_LOG_SUBJECT,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::io;
use std::sync::Arc;

fn sink_logger(config: LoggerConfig, publisher: BusPublisher) -> Logger {
    Logger::builder(config)
        .console(ConsoleTransport::with_writer(io::sink()).colorize(false))
        .publisher(publisher)
        .build()
        .unwrap()
}

fn bench_forwarding_set(c: &mut Criterion) {
    c.bench_function("ForwardingSet::compute", |b| {
        b.iter(|| ForwardingSet::compute("info"));
    });
}

fn bench_envelope_serialization(c: &mut Criterion) {
    let envelope = BusEnvelope::new(LogEnvelope::remote(
        "error",
        args!["charge failed", 402, serde_json::json!({"orderId": "o-9"})],
    ));

    c.bench_function("BusEnvelope serialize", |b| {
        b.iter(|| serde_json::to_vec(&envelope).unwrap());
    });
}

fn bench_level_calls(c: &mut Criterion) {
    let local = sink_logger(LoggerConfig::default(), BusPublisher::disabled());
    c.bench_function("info (console only)", |b| {
        b.iter(|| local.info(args!["request served", 200]));
    });

    let bus = Arc::new(MemoryBus::new());
    let forwarded = sink_logger(LoggerConfig::default(), BusPublisher::new(bus.clone()));
    c.bench_function("error (console + bus)", |b| {
        b.iter(|| {
            forwarded.error(args!["request failed", 500]);
            bus.clear();
        });
    });

    c.bench_function("audit (console + bus)", |b| {
        b.iter(|| {
            forwarded.audit("user-1", "changed password", None);
            bus.clear();
        });
    });
}

fn bench_publish_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish_throughput");
    for count in [10, 100, 1000] {
        group.bench_function(format!("{} entries", count), |b| {
            b.iter(|| {
                let bus = Arc::new(MemoryBus::new());
                let publisher = BusPublisher::new(bus.clone());
                for i in 0..count {
                    publisher.publish(
                        REMOTE_LOG_SUBJECT,
                        LogEnvelope::remote("remote", args![i]),
                    );
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_forwarding_set,
    bench_envelope_serialization,
    bench_level_calls,
    bench_publish_throughput,
);
criterion_main!(benches);
