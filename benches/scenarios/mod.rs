//! Real-world scenario benchmarks.
//!
//! These model a renderer stepping every active voice once per block.

mod voices;

pub use voices::bench_voices;
