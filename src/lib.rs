pub mod dsp; // Fixed-point primitives: bend, LFO, envelope, waveform
pub mod patch; // Serializable note settings
pub mod synth; // Note voice core and control messages

pub use synth::{error::NoteError, note::Note};

/// Longest block, in ticks, a single `Note::step` is expected to cover.
///
/// Envelope steps are expressed per this many ticks.
pub const MAX_BLOCK_TICKS: u16 = 256;
