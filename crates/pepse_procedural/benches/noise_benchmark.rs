//! Benchmark for ground height sampling.
//!
//! TARGET: 1,000,000 samples per second
//!
//! Run with: cargo bench --package pepse_procedural --bench noise_benchmark

#![allow(missing_docs)] // criterion_group! generates an undocumented pub fn

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pepse_procedural::{NoiseField, WorldConfig, WorldSeed};

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = NoiseField::new(&WorldConfig::default());

    c.bench_function("single_height_sample", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x += 7.5;
            black_box(noise.height_at(black_box(x)))
        });
    });
}

fn benchmark_million_samples(c: &mut Criterion) {
    let noise = NoiseField::new(&WorldConfig::default());

    let mut group = c.benchmark_group("million_samples");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_height_samples", |b| {
        b.iter(|| {
            for i in -500_000..500_000 {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f32 * 0.5;
                black_box(noise.height_at(x));
            }
        });
    });

    group.finish();
}

fn benchmark_column_hash(c: &mut Criterion) {
    let seed = WorldSeed::new(120);

    c.bench_function("column_hash", |b| {
        let mut x = 0i32;
        b.iter(|| {
            x = x.wrapping_add(30);
            black_box(seed.column_hash(black_box(x)))
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_million_samples,
    benchmark_column_hash
);
criterion_main!(benches);
