#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use super::{error::NoteError, note::Note};
use crate::dsp::envelope::Envelope;

/// Parameter change sent from a control thread to the thread that steps a note.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NoteMessage {
    SetFrequency(f32),
    SetAmplitude(f32),
    SetTremoloDepth(f32),
    SetTremoloRate(f32),
    SetVibratoDepth(f32),
    SetVibratoRate(f32),
    SetEnvelope(Option<Envelope>),
    Start { sample_rate: u32 },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<NoteMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<NoteMessage> {
    fn pop(&mut self) -> Option<NoteMessage> {
        Consumer::pop(self).ok()
    }
}

impl Note<'_> {
    /// Apply one control message through the matching setter.
    pub fn apply(&mut self, message: NoteMessage) -> Result<(), NoteError> {
        match message {
            NoteMessage::SetFrequency(hz) => self.set_frequency(hz),
            NoteMessage::SetAmplitude(amplitude) => self.set_amplitude(amplitude),
            NoteMessage::SetTremoloDepth(depth) => self.set_tremolo_depth(depth),
            NoteMessage::SetTremoloRate(rate) => self.set_tremolo_rate(rate),
            NoteMessage::SetVibratoDepth(depth) => self.set_vibrato_depth(depth),
            NoteMessage::SetVibratoRate(rate) => self.set_vibrato_rate(rate),
            NoteMessage::SetEnvelope(envelope) => self.set_envelope(envelope),
            NoteMessage::Start { sample_rate } => {
                self.start(sample_rate);
                Ok(())
            }
        }
    }
}
