//! Benchmarks for the interpolation engine and the fingerprint extractor.
//!
//! Run with: cargo bench
//!
//! `compute` runs on every pad-drag event, so it has to stay far below the
//! knob-dispatch interval; `analyze` is offloaded to a background task but
//! should still finish in well under a second for typical voice clips.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use voxpad::analysis::analyze;
use voxpad::engine::{compute, Tuning};
use voxpad::formant::{profile::by_name, FormantVector, PadPoint, VoiceName};

fn test_base() -> FormantVector {
    FormantVector::new(
        [500.0, 1500.0, 2500.0, 3500.0],
        [50.0, 40.0, 28.0, 20.0],
        [3.0, 3.0, 5.0, 5.0],
    )
}

fn bench_compute(c: &mut Criterion) {
    let tuning = Tuning::default();
    let base = test_base();
    let profile = by_name(VoiceName::Tenor);
    let pad = PadPoint::new(0.4, -0.7).unwrap();

    c.bench_function("engine/compute", |b| {
        b.iter(|| {
            compute(
                black_box(Some(&base)),
                black_box(pad),
                black_box(profile),
                black_box(0.6),
                black_box(0.3),
                black_box(&tuning),
            )
            .unwrap()
        })
    });
}

fn bench_analyze(c: &mut Criterion) {
    let tuning = Tuning::default();
    let sample_rate = 48_000u32;
    let mut group = c.benchmark_group("analysis/analyze");

    for secs in [1usize, 5] {
        let clip: Vec<f32> = (0..sample_rate as usize * secs)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                // Vowel-ish stack of partials.
                (std::f32::consts::TAU * 220.0 * t).sin() * 0.5
                    + (std::f32::consts::TAU * 660.0 * t).sin() * 0.3
                    + (std::f32::consts::TAU * 2_500.0 * t).sin() * 0.2
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("48k", secs), &secs, |b, _| {
            b.iter(|| analyze(black_box(&clip), sample_rate, black_box(&tuning)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute, bench_analyze);
criterion_main!(benches);
