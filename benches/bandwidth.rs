//! Benchmark for the bandwidth math
//!
//! The pure computations sit on the hot path of every probe; keep them cheap.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fleetbench::{bandwidth_gbps, theoretical_bandwidth_gbps};
use std::time::Duration;

fn bench_theoretical_bandwidth(c: &mut Criterion) {
    let mut group = c.benchmark_group("bandwidth_math");
    group.throughput(Throughput::Elements(1));

    let devices: [(u64, u32); 4] = [
        (6251000, 192),  // L4
        (6251000, 384),  // A10G
        (1215000, 5120), // A100
        (9001000, 384),  // L40S
    ];

    group.bench_function("theoretical", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % devices.len();
            let (clock_khz, bus_width) = devices[i];
            theoretical_bandwidth_gbps(black_box(clock_khz), black_box(bus_width))
        });
    });

    group.bench_function("measured", |b| {
        b.iter(|| {
            bandwidth_gbps(
                black_box(10_000 * 1024 * 1024),
                black_box(Duration::from_millis(4_321)),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_theoretical_bandwidth);
criterion_main!(benches);
