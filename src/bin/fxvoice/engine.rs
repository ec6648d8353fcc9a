//! Audio-thread side: steps the voice once per block and renders it.

use fxvoice::{
    synth::{NoteMessage, Voice},
    MAX_BLOCK_TICKS,
};
use rtrb::{Consumer, Producer};

use super::ui::VoiceStatus;

/// Reads a single-cycle waveform at a 16.16 frequency.
pub struct WavetableOsc {
    phase: u32,
}

impl WavetableOsc {
    pub fn new() -> Self {
        Self { phase: 0 }
    }

    /// Fill `out` with `waveform` played at `frequency_scaled`, scaled by `loudness`.
    pub fn render(
        &mut self,
        out: &mut [f32],
        waveform: &[i16],
        frequency_scaled: u32,
        loudness: u16,
        sample_rate: u32,
    ) {
        if waveform.is_empty() || sample_rate == 0 {
            out.fill(0.0);
            return;
        }

        // phase is a full cycle in 2^32 units; frequency is Hz << 16
        let increment = ((u64::from(frequency_scaled) << 16) / u64::from(sample_rate))
            .min(u64::from(u32::MAX)) as u32;
        let gain = f32::from(loudness) / (32768.0 * 32768.0);
        let len = waveform.len() as u64;

        for sample in out.iter_mut() {
            let index = ((u64::from(self.phase) * len) >> 32) as usize;
            *sample = f32::from(waveform[index]) * gain;
            self.phase = self.phase.wrapping_add(increment);
        }
    }
}

/// Everything the output stream callback owns.
pub struct AudioEngine {
    voice: Voice<'static, Consumer<NoteMessage>>,
    osc: WavetableOsc,
    block: Vec<f32>,
    scope_tx: Producer<f32>,
    status_tx: Producer<VoiceStatus>,
    status: VoiceStatus,
}

impl AudioEngine {
    pub fn new(
        voice: Voice<'static, Consumer<NoteMessage>>,
        scope_tx: Producer<f32>,
        status_tx: Producer<VoiceStatus>,
    ) -> Self {
        Self {
            voice,
            osc: WavetableOsc::new(),
            block: vec![0.0; MAX_BLOCK_TICKS as usize],
            scope_tx,
            status_tx,
            status: VoiceStatus::default(),
        }
    }

    /// Render interleaved output, mono copied to every channel.
    pub fn process(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames = (total_frames - frames_written).min(MAX_BLOCK_TICKS as usize);

            let (frequency, loudness) = self.voice.step(frames as u16);
            let block = &mut self.block[..frames];
            self.osc.render(
                block,
                self.voice.note().waveform_buffer(),
                frequency,
                loudness,
                self.voice.sample_rate(),
            );

            let out_off = frames_written * channels;
            for (i, &s) in block.iter().enumerate() {
                for ch in 0..channels {
                    data[out_off + i * channels + ch] = s;
                }
            }

            // The scope only needs recent samples; drop what doesn't fit
            for &s in block.iter() {
                if self.scope_tx.push(s).is_err() {
                    break;
                }
            }

            self.status = VoiceStatus {
                bent_frequency: frequency,
                loudness,
                rejected: self.voice.rejected(),
            };
            frames_written += frames;
        }

        let _ = self.status_tx.push(self.status);
    }
}
