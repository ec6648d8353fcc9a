//! Benchmarks for the pitch bend interpolator.

use std::hint::black_box;

use criterion::Criterion;
use fxvoice::dsp::{bend::pitch_bend, fixed::frequency_to_scaled};

pub fn bench_bend(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/bend");
    let a4 = frequency_to_scaled(440.0);

    group.bench_function("center", |b| {
        b.iter(|| pitch_bend(black_box(a4), black_box(32768)))
    });

    // Sweep the full range so both branches and every semitone are hit
    group.bench_function("sweep", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for bend in (0..=u16::MAX).step_by(257) {
                acc = acc.wrapping_add(pitch_bend(black_box(a4), bend));
            }
            acc
        })
    });

    group.finish();
}
