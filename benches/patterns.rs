//! Benchmarks for feature derivation and pattern scanning.

use candlemark::prelude::*;
use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;

/// Generate realistic bars with a deterministic pseudo-random walk, priced in
/// cents so the decimals stay exact.
fn generate_raw_bars(n: usize) -> Vec<RawBar> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut price_cents: i64 = 10_000;

    for i in 0..n {
        let change = ((i * 7 + 13) % 100) as i64 - 50; // deterministic "random"
        let volatility = 40 + ((i * 3) % 10) as i64 * 8;

        let open = price_cents;
        let close = price_cents + change;
        let high = open.max(close) + volatility / 2;
        let low = open.min(close) - volatility / 2;

        bars.push(RawBar {
            date: start + Days::new(i as u64),
            interval: Interval::Day,
            ticker: "BENCH".into(),
            open: Decimal::new(open, 2),
            high: Decimal::new(high, 2),
            low: Decimal::new(low, 2),
            close: Decimal::new(close, 2),
        });
        price_cents = close;
    }

    bars
}

fn generate_bars(n: usize) -> Vec<DerivedBar> {
    let series = derive_series(generate_raw_bars(n));
    assert!(series.skipped.is_empty());
    series.bars
}

fn bench_derivation(c: &mut Criterion) {
    let raw = generate_raw_bars(1000);

    c.bench_function("derive_series_1000_bars", |b| {
        b.iter(|| {
            let _ = black_box(derive_series(black_box(raw.clone())));
        })
    });
}

fn bench_single_recognizer(c: &mut Criterion) {
    let bars = generate_bars(1000);
    let registry = Registry::standard();
    let doji = *registry.get("Doji").unwrap();

    c.bench_function("scan_doji_1000_bars", |b| {
        b.iter(|| {
            let _ = black_box(doji.recognize(black_box(&bars)));
        })
    });
}

fn bench_window_recognizer(c: &mut Criterion) {
    let bars = generate_bars(1000);
    let registry = Registry::standard();
    let peak = *registry.get("Peak").unwrap();

    c.bench_function("scan_peak_1000_bars", |b| {
        b.iter(|| {
            let _ = black_box(peak.recognize(black_box(&bars)));
        })
    });
}

fn bench_full_registry(c: &mut Criterion) {
    let bars = generate_bars(1000);
    let registry = Registry::standard();

    c.bench_function("scan_full_registry_1000_bars", |b| {
        b.iter(|| {
            let _ = black_box(registry.scan(black_box(&bars)));
        })
    });
}

fn bench_scaling(c: &mut Criterion) {
    let registry = Registry::standard();

    let mut group = c.benchmark_group("scaling");

    for size in [100, 500, 1000, 5000, 10000].iter() {
        let bars = generate_bars(*size);

        group.bench_with_input(BenchmarkId::new("scan", size), size, |b, _| {
            b.iter(|| {
                let _ = black_box(registry.scan(black_box(&bars)));
            })
        });
    }

    group.finish();
}

fn bench_parallel_scan(c: &mut Criterion) {
    let bars1 = generate_bars(1000);
    let bars2 = generate_bars(1000);
    let bars3 = generate_bars(1000);
    let bars4 = generate_bars(1000);

    let registry = Registry::standard();

    let instruments: Vec<(&str, &[DerivedBar])> = vec![
        ("SYM1", &bars1),
        ("SYM2", &bars2),
        ("SYM3", &bars3),
        ("SYM4", &bars4),
    ];

    c.bench_function("parallel_scan_4_instruments", |b| {
        b.iter(|| {
            let _ = black_box(scan_parallel(
                black_box(&registry),
                black_box(instruments.clone()),
            ));
        })
    });
}

criterion_group!(
    benches,
    bench_derivation,
    bench_single_recognizer,
    bench_window_recognizer,
    bench_full_registry,
    bench_scaling,
    bench_parallel_scan
);
criterion_main!(benches);
