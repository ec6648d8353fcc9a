//! Low-level fixed-point primitives used by the note voice core.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. Floating point only appears at the
//! configuration boundary; everything a renderer calls per block is integer
//! math.

/// Pitch bend interpolation over a one-octave semitone table.
pub mod bend;
/// Envelope descriptors and their per-sample-rate runtime definitions.
pub mod envelope;
/// Conversions between real-valued parameters and scaled integers.
pub mod fixed;
/// Triangle LFO used for tremolo and vibrato.
pub mod lfo;
/// Borrowed waveform buffer views.
pub mod waveform;

pub use bend::pitch_bend;
pub use envelope::{Envelope, EnvelopeDefinition};
pub use lfo::{LfoDescriptor, LfoState};
pub use waveform::Waveform;
