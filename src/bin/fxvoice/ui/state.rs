//! Shared state types for UI communication
//!
//! Designed for real-time safety: the audio thread only ever sends small
//! `Copy` values.

use fxvoice::{
    dsp::lfo::LfoDescriptor, patch::NoteSettings, synth::note::MAX_FREQUENCY, synth::NoteMessage,
};

/// Snapshot sent from the audio thread once per callback
#[derive(Clone, Copy, Debug, Default)]
pub struct VoiceStatus {
    /// Vibrato-bent frequency of the last block (16.16 Hz)
    pub bent_frequency: u32,
    /// Note gain after tremolo, 1.15
    pub loudness: u16,
    /// Control messages the voice refused so far
    pub rejected: u32,
}

/// One-semitone frequency ratio
const SEMITONE: f32 = 1.059_463_1;

/// Knob the user can turn from the keyboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Knob {
    Pitch,
    Amplitude,
    VibratoDepth,
    VibratoRate,
    TremoloDepth,
    TremoloRate,
}

/// UI-side mirror of the note settings.
///
/// Values are clamped here so every message sent to the audio thread is
/// valid.
pub struct Controls {
    pub settings: NoteSettings,
}

impl Controls {
    pub fn new(settings: NoteSettings) -> Self {
        Self { settings }
    }

    /// Nudge `knob` up or down one notch and return the message to send.
    pub fn nudge(&mut self, knob: Knob, up: bool) -> NoteMessage {
        let sign = if up { 1.0 } else { -1.0 };
        let s = &mut self.settings;
        match knob {
            Knob::Pitch => {
                let ratio = if up { SEMITONE } else { 1.0 / SEMITONE };
                s.frequency = (s.frequency * ratio).clamp(20.0, MAX_FREQUENCY);
                NoteMessage::SetFrequency(s.frequency)
            }
            Knob::Amplitude => {
                s.amplitude = (s.amplitude + 0.05 * sign).clamp(0.0, 1.0);
                NoteMessage::SetAmplitude(s.amplitude)
            }
            Knob::VibratoDepth => {
                s.vibrato.depth = step_depth(s.vibrato.depth, 0.01 * sign);
                NoteMessage::SetVibratoDepth(s.vibrato.depth)
            }
            Knob::VibratoRate => {
                s.vibrato.rate = step_rate(s.vibrato.rate, 0.5 * sign);
                NoteMessage::SetVibratoRate(s.vibrato.rate)
            }
            Knob::TremoloDepth => {
                s.tremolo.depth = step_depth(s.tremolo.depth, 0.05 * sign);
                NoteMessage::SetTremoloDepth(s.tremolo.depth)
            }
            Knob::TremoloRate => {
                s.tremolo.rate = step_rate(s.tremolo.rate, 0.5 * sign);
                NoteMessage::SetTremoloRate(s.tremolo.rate)
            }
        }
    }
}

fn step_depth(depth: f32, delta: f32) -> f32 {
    (depth + delta).clamp(0.0, LfoDescriptor::MAX_DEPTH)
}

fn step_rate(rate: f32, delta: f32) -> f32 {
    (rate + delta).clamp(0.0, LfoDescriptor::MAX_RATE)
}
