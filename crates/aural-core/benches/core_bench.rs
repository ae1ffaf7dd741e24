//! Criterion benchmarks for aural-core primitives.
//!
//! Run with: cargo bench -p aural-core
#![allow(missing_docs)]

use aural_core::{lowpass_coefficients, Biquad, Euler, Polygon, Vec3, VariableDelayLine};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("Biquad");
    let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(1000.0, 0.707, SAMPLE_RATE);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        group.bench_with_input(BenchmarkId::new("process", block_size), &block_size, |b, _| {
            let mut biquad = Biquad::new();
            biquad.set_coefficients(b0, b1, b2, a0, a1, a2);
            b.iter(|| {
                for &sample in &input {
                    black_box(biquad.process(black_box(sample)));
                }
            });
        });
    }

    group.finish();
}

fn bench_delay_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("VariableDelayLine");
    let mut delay = VariableDelayLine::new(8192);
    let input = generate_test_signal(1024);

    group.bench_function("read_write", |b| {
        b.iter(|| {
            for &sample in &input {
                black_box(delay.read_write(black_box(sample), black_box(1000.5)));
            }
        });
    });

    group.finish();
}

fn bench_euler_rotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Euler");
    let o = Euler::new(0.3, -0.4, 0.2);
    let v = Vec3::new(1.0, 2.0, 3.0);

    group.bench_function("rotate", |b| {
        b.iter(|| black_box(o.rotate(black_box(v))));
    });

    group.finish();
}

fn bench_polygon_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("Polygon");
    let poly = Polygon::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(2.0, 2.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
    ])
    .unwrap();
    let probe = Vec3::new(3.0, 1.0, 0.5);

    group.bench_function("nearest", |b| {
        b.iter(|| black_box(poly.nearest(black_box(probe))));
    });

    group.finish();
}

criterion_group!(benches, bench_biquad, bench_delay_line, bench_euler_rotate, bench_polygon_nearest);
criterion_main!(benches);
