#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{envelope::Envelope, lfo::LfoDescriptor},
    synth::{error::NoteError, note::Note},
};

/// Everything needed to rebuild a note, minus its waveform and sample rate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteSettings {
    pub frequency: f32,
    pub amplitude: f32,
    pub tremolo: LfoDescriptor,
    pub vibrato: LfoDescriptor,
    pub envelope: Option<Envelope>,
}

impl NoteSettings {
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency,
            amplitude: 1.0,
            tremolo: LfoDescriptor::default(),
            vibrato: LfoDescriptor::default(),
            envelope: None,
        }
    }

    /// Build a note, validating each field through the note's setters.
    pub fn build<'w>(&self) -> Result<Note<'w>, NoteError> {
        let mut note = Note::new(self.frequency)?;
        note.set_amplitude(self.amplitude)?;
        note.set_tremolo_depth(self.tremolo.depth)?;
        note.set_tremolo_rate(self.tremolo.rate)?;
        note.set_vibrato_depth(self.vibrato.depth)?;
        note.set_vibrato_rate(self.vibrato.rate)?;
        note.set_envelope(self.envelope)?;
        Ok(note)
    }
}

impl Note<'_> {
    /// Snapshot of this note's parameters.
    pub fn settings(&self) -> NoteSettings {
        NoteSettings {
            frequency: self.frequency(),
            amplitude: self.amplitude(),
            tremolo: LfoDescriptor::new(self.tremolo_depth(), self.tremolo_rate()),
            vibrato: LfoDescriptor::new(self.vibrato_depth(), self.vibrato_rate()),
            envelope: self.envelope_shape().copied(),
        }
    }
}
