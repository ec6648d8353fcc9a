//! Benchmarks for the triangle LFO.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use fxvoice::dsp::lfo::{LfoDescriptor, LfoState};

use crate::BLOCK_SIZES;

pub fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lfo");

    for &size in BLOCK_SIZES {
        let mut lfo = LfoState {
            offset: 32768,
            ..LfoState::default()
        };
        lfo.set(&LfoDescriptor::new(0.5, 5.0), 48_000);

        group.bench_with_input(BenchmarkId::new("step", size), &size, |b, &size| {
            b.iter(|| lfo.step(black_box(size)))
        });
    }

    group.finish();
}
