use log::warn;

use super::{
    message::{MessageReceiver, NoteMessage},
    note::Note,
};

/// A note plus the queue of parameter changes aimed at it.
///
/// The control side pushes [`NoteMessage`]s; the audio side calls
/// [`Voice::step`], which applies everything pending before stepping. Only
/// the audio thread ever touches the note.
pub struct Voice<'w, R: MessageReceiver> {
    note: Note<'w>,
    rx: R,
    sample_rate: u32,
    rejected: u32,
}

impl<'w, R: MessageReceiver> Voice<'w, R> {
    pub fn new(mut note: Note<'w>, rx: R, sample_rate: u32) -> Self {
        note.start(sample_rate);
        Self {
            note,
            rx,
            sample_rate,
            rejected: 0,
        }
    }

    /// Apply every queued message. Invalid ones are counted and dropped.
    pub fn drain(&mut self) {
        while let Some(message) = self.rx.pop() {
            if let NoteMessage::Start { sample_rate } = message {
                self.sample_rate = sample_rate;
            }
            if let Err(err) = self.note.apply(message) {
                warn!("voice dropped {:?}: {}", message, err);
                self.rejected = self.rejected.saturating_add(1);
            }
        }
    }

    /// Drain pending messages, then step the note by `duration` ticks.
    ///
    /// Returns the bent frequency (16.16) and the note gain with tremolo
    /// applied.
    pub fn step(&mut self, duration: u16) -> (u32, u16) {
        self.drain();
        let mut loudness = self.note.envelope();
        let frequency = self.note.step(self.sample_rate, duration, &mut loudness);
        (frequency, loudness)
    }

    pub fn note(&self) -> &Note<'w> {
        &self.note
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Messages dropped because their value was rejected.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }
}
