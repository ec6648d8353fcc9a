//! Benchmarks for the fixed-point voice core.
//!
//! Run with: cargo bench
//!
//! `Note::step` runs once per block inside the audio callback, so its cost
//! is per block, not per sample. These benchmarks keep an eye on it and on
//! the primitives underneath.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Pitch bend and LFO primitives
//!   - scenarios/*  Stepping many voices per block

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Block lengths, in ticks, passed to `step`.
pub const BLOCK_SIZES: &[u16] = &[64, 128, 256];

/// Voice counts for the polyphony scenarios.
pub const VOICE_COUNTS: &[usize] = &[1, 8, 64];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_bend,
    dsp::bench_lfo,
    // Real-world scenarios
    scenarios::bench_voices,
);
criterion_main!(benches);
