//! Benchmarks for low-level DSP primitives.

mod bend;
mod lfo;

pub use bend::bench_bend;
pub use lfo::bench_lfo;
