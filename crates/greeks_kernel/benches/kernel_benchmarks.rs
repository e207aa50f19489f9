//! Criterion benchmarks for greeks_kernel.
//!
//! Benchmarks cover:
//! - Single-Greek evaluation over growing batches
//! - `greek_set` against six separate Greek calls

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use greeks_kernel::analytical::{call_delta, greek, greek_set};
use greeks_kernel::{Greek, KernelConventions, OptionParameters, PayoffKind};

/// Synthetic batch with a spread of moneyness and expiries.
fn generate_batch(n: usize) -> OptionParameters {
    let spot = (0..n).map(|i| 90.0 + (i % 21) as f64).collect();
    let strike = vec![100.0; n];
    let expiry = (0..n).map(|i| 0.1 + (i % 12) as f64 / 6.0).collect();
    let vol = (0..n).map(|i| 0.15 + (i % 5) as f64 * 0.05).collect();
    let rate = vec![0.03; n];
    let yield_ = vec![0.01; n];
    OptionParameters::new(spot, strike, expiry, vol, rate, yield_).unwrap()
}

fn bench_call_delta(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_delta");

    for n in [100, 1_000, 10_000] {
        let params = generate_batch(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &params, |b, params| {
            b.iter(|| call_delta(black_box(params)))
        });
    }

    group.finish();
}

fn bench_all_greeks(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_greeks");
    let conventions = KernelConventions::default();
    let params = generate_batch(10_000);

    group.bench_function("greek_set", |b| {
        b.iter(|| greek_set(black_box(&params), PayoffKind::Put, &conventions))
    });

    group.bench_function("separate", |b| {
        b.iter(|| {
            Greek::ALL
                .iter()
                .map(|g| greek(black_box(&params), PayoffKind::Put, *g, &conventions))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_call_delta, bench_all_greeks);
criterion_main!(benches);
