use log::{debug, trace};

use super::error::NoteError;
use crate::dsp::{
    bend::pitch_bend,
    envelope::{Envelope, EnvelopeDefinition},
    fixed::{
        amplitude_to_scaled, frequency_to_scaled, rate_to_phase_increment, BEND_CENTER, SCALE_ONE,
    },
    lfo::{LfoDescriptor, LfoState},
    waveform::Waveform,
};

/// Highest note frequency in Hz.
pub const MAX_FREQUENCY: f32 = 32767.0;

const UNITY: i32 = BEND_CENTER as i32;

/// One synthesizer voice: base pitch and gain plus tremolo and vibrato.
///
/// Setters validate and update the scaled values immediately. Anything that
/// depends on the sample rate is derived in [`Note::recalculate`], which the
/// renderer reaches through [`Note::start`] before the first
/// [`Note::step`].
///
/// The waveform is borrowed for `'w`; the note never copies sample data.
///
/// # Example
/// ```
/// use fxvoice::Note;
///
/// let mut note = Note::new(440.0)?;
/// note.set_vibrato_depth(0.1)?;
/// note.set_vibrato_rate(5.0)?;
/// note.start(48_000);
///
/// let mut loudness = note.envelope();
/// let bent = note.step(48_000, 256, &mut loudness);
/// assert!(bent > 0);
/// # Ok::<(), fxvoice::NoteError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Note<'w> {
    frequency: f32,
    frequency_scaled: u32,
    amplitude: f32,
    amplitude_scaled: u16,

    tremolo_descr: LfoDescriptor,
    tremolo: LfoState,
    vibrato_descr: LfoDescriptor,
    vibrato: LfoState,

    envelope: Option<Envelope>,
    envelope_def: EnvelopeDefinition,
    waveform: Option<Waveform<'w>>,

    // 0 until the first recalculate
    sample_rate: u32,
}

impl<'w> Note<'w> {
    pub fn new(frequency: f32) -> Result<Self, NoteError> {
        let mut note = Self::silent();
        note.set_frequency(frequency)?;
        Ok(note)
    }

    fn silent() -> Self {
        Self {
            frequency: 0.0,
            frequency_scaled: 0,
            amplitude: 1.0,
            amplitude_scaled: SCALE_ONE,
            tremolo_descr: LfoDescriptor::default(),
            tremolo: LfoState {
                offset: UNITY,
                ..LfoState::default()
            },
            vibrato_descr: LfoDescriptor::default(),
            vibrato: LfoState {
                offset: UNITY,
                ..LfoState::default()
            },
            envelope: None,
            envelope_def: EnvelopeDefinition::default(),
            waveform: None,
            sample_rate: 0,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Base frequency in 16.16 fixed point.
    pub fn frequency_scaled(&self) -> u32 {
        self.frequency_scaled
    }

    pub fn set_frequency(&mut self, value: f32) -> Result<(), NoteError> {
        let value = NoteError::check_range("frequency", value, 0.0, MAX_FREQUENCY)?;
        self.frequency = value;
        self.frequency_scaled = frequency_to_scaled(value);
        trace!("note frequency set to {} Hz", value);
        Ok(())
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn amplitude_scaled(&self) -> u16 {
        self.amplitude_scaled
    }

    pub fn set_amplitude(&mut self, value: f32) -> Result<(), NoteError> {
        let value = NoteError::check_range("amplitude", value, 0.0, 1.0)?;
        self.amplitude = value;
        self.amplitude_scaled = amplitude_to_scaled(value);
        trace!("note amplitude set to {}", value);
        Ok(())
    }

    pub fn tremolo_depth(&self) -> f32 {
        self.tremolo_descr.depth
    }

    /// Set tremolo depth; the tremolo swing stays anchored at unity gain.
    pub fn set_tremolo_depth(&mut self, value: f32) -> Result<(), NoteError> {
        let value =
            NoteError::check_range("tremolo_depth", value, 0.0, LfoDescriptor::MAX_DEPTH)?;
        self.tremolo_descr.depth = value;
        self.tremolo.amplitude_scaled = amplitude_to_scaled(value);
        self.tremolo.offset = UNITY - i32::from(self.tremolo.amplitude_scaled);
        trace!("note tremolo depth set to {}", value);
        Ok(())
    }

    pub fn tremolo_rate(&self) -> f32 {
        self.tremolo_descr.rate
    }

    pub fn set_tremolo_rate(&mut self, value: f32) -> Result<(), NoteError> {
        let value = NoteError::check_range("tremolo_rate", value, 0.0, LfoDescriptor::MAX_RATE)?;
        self.tremolo_descr.rate = value;
        if self.sample_rate != 0 {
            self.tremolo.phase_increment = rate_to_phase_increment(value, self.sample_rate);
        }
        trace!("note tremolo rate set to {} Hz", value);
        Ok(())
    }

    pub fn vibrato_depth(&self) -> f32 {
        self.vibrato_descr.depth
    }

    pub fn set_vibrato_depth(&mut self, value: f32) -> Result<(), NoteError> {
        let value =
            NoteError::check_range("vibrato_depth", value, 0.0, LfoDescriptor::MAX_DEPTH)?;
        self.vibrato_descr.depth = value;
        self.vibrato.amplitude_scaled = amplitude_to_scaled(value);
        trace!("note vibrato depth set to {}", value);
        Ok(())
    }

    pub fn vibrato_rate(&self) -> f32 {
        self.vibrato_descr.rate
    }

    pub fn set_vibrato_rate(&mut self, value: f32) -> Result<(), NoteError> {
        let value = NoteError::check_range("vibrato_rate", value, 0.0, LfoDescriptor::MAX_RATE)?;
        self.vibrato_descr.rate = value;
        if self.sample_rate != 0 {
            self.vibrato.phase_increment = rate_to_phase_increment(value, self.sample_rate);
        }
        trace!("note vibrato rate set to {} Hz", value);
        Ok(())
    }

    /// Runtime tremolo state.
    pub fn tremolo(&self) -> &LfoState {
        &self.tremolo
    }

    /// Runtime vibrato state.
    pub fn vibrato(&self) -> &LfoState {
        &self.vibrato
    }

    /// The envelope shape attached to this note, if any.
    pub fn envelope_shape(&self) -> Option<&Envelope> {
        self.envelope.as_ref()
    }

    /// Runtime envelope steps for the renderer.
    ///
    /// The instant default definition while no envelope is attached.
    pub fn envelope_definition(&self) -> &EnvelopeDefinition {
        &self.envelope_def
    }

    /// Attach or detach an envelope.
    ///
    /// Before the first `start` the definition is derived later, by
    /// `recalculate`.
    pub fn set_envelope(&mut self, envelope: Option<Envelope>) -> Result<(), NoteError> {
        match envelope {
            Some(envelope) => {
                envelope
                    .validate()
                    .map_err(|err| NoteError::InvalidArgument {
                        parameter: "envelope",
                        reason: envelope_field_reason(&err),
                    })?;
                if self.sample_rate != 0 {
                    self.envelope_def = EnvelopeDefinition::define(&envelope, self.sample_rate);
                }
                self.envelope = Some(envelope);
            }
            None => {
                self.envelope = None;
                self.envelope_def = EnvelopeDefinition::default();
            }
        }
        Ok(())
    }

    pub fn waveform(&self) -> Option<Waveform<'w>> {
        self.waveform
    }

    /// Samples of the current waveform; empty (silence) when none is set.
    pub fn waveform_buffer(&self) -> &'w [i16] {
        match self.waveform {
            Some(waveform) => waveform.samples(),
            None => &[],
        }
    }

    /// Borrow `samples` as this note's waveform, or clear it with `None`.
    pub fn set_waveform(&mut self, samples: Option<&'w [i16]>) -> Result<(), NoteError> {
        self.waveform = samples.map(Waveform::new).transpose()?;
        Ok(())
    }

    /// Sample rate the derived state was last computed for, 0 if never.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Re-derive rate-dependent state. A no-op if `sample_rate` is unchanged.
    pub fn recalculate(&mut self, sample_rate: u32) {
        if sample_rate == self.sample_rate {
            return;
        }
        debug!(
            "deriving note state for {} Hz (was {} Hz)",
            sample_rate, self.sample_rate
        );
        self.sample_rate = sample_rate;

        if let Some(envelope) = &self.envelope {
            self.envelope_def = EnvelopeDefinition::define(envelope, sample_rate);
        }

        self.tremolo.set(&self.tremolo_descr, sample_rate);
        self.tremolo.offset = UNITY - i32::from(self.tremolo.amplitude_scaled);
        self.vibrato.set(&self.vibrato_descr, sample_rate);
        self.vibrato.offset = UNITY;
    }

    /// Prepare the note for playback at `sample_rate`.
    ///
    /// Same work as [`Note::recalculate`]. Envelope phase and other
    /// per-attack state belong to the renderer.
    pub fn start(&mut self, sample_rate: u32) {
        self.recalculate(sample_rate);
    }

    /// Static note gain in 1.15 fixed point.
    pub fn envelope(&self) -> u16 {
        self.amplitude_scaled
    }

    /// Advance both LFOs by `duration` ticks, apply tremolo to `loudness` in
    /// place and return the vibrato-bent frequency (16.16).
    ///
    /// `sample_rate` must be the rate the note was started at.
    #[inline]
    pub fn step(&mut self, sample_rate: u32, duration: u16, loudness: &mut u16) -> u32 {
        debug_assert!(
            self.sample_rate == 0 || self.sample_rate == sample_rate,
            "note started at {} Hz, stepped at {} Hz",
            self.sample_rate,
            sample_rate
        );

        let tremolo = self.tremolo.step(duration).clamp(0, UNITY) as u32;
        let vibrato = self.vibrato.step(duration).clamp(0, i32::from(u16::MAX)) as u16;

        *loudness = ((u32::from(*loudness) * tremolo) >> 15) as u16;
        pitch_bend(self.frequency_scaled, vibrato)
    }
}

impl Default for Note<'_> {
    fn default() -> Self {
        Self::silent()
    }
}

fn envelope_field_reason(err: &NoteError) -> &'static str {
    if let NoteError::InvalidArgument { .. } = err {
        return "envelope fields must be numbers";
    }
    match err.parameter() {
        "attack_time" => "attack_time must be a non-negative number of seconds",
        "decay_time" => "decay_time must be a non-negative number of seconds",
        "release_time" => "release_time must be a non-negative number of seconds",
        "attack_level" => "attack_level must be in range 0-1",
        "sustain_level" => "sustain_level must be in range 0-1",
        _ => "envelope field out of range",
    }
}
