//! App builder: one note, the default output device, and the TUI

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use fxvoice::{
    dsp::lfo::LfoDescriptor,
    patch::NoteSettings,
    synth::{NoteMessage, Voice},
};
use log::{error, info};
use rtrb::RingBuffer;

use super::engine::AudioEngine;
use super::ui::{Controls, UiApp, VoiceStatus, VIS_BUFFER_SIZE};

/// Samples in the demo waveform
const WAVEFORM_LEN: usize = 256;

/// Main application builder
pub struct FxVoice {
    settings: NoteSettings,
}

impl FxVoice {
    pub fn new(frequency: f32) -> Self {
        Self {
            settings: NoteSettings::new(frequency),
        }
    }

    pub fn amplitude(mut self, amplitude: f32) -> Self {
        self.settings.amplitude = amplitude;
        self
    }

    pub fn vibrato(mut self, depth: f32, rate: f32) -> Self {
        self.settings.vibrato = LfoDescriptor::new(depth, rate);
        self
    }

    pub fn tremolo(mut self, depth: f32, rate: f32) -> Self {
        self.settings.tremolo = LfoDescriptor::new(depth, rate);
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        info!("output at {} Hz, {} channels", sample_rate, channels);

        // The stream callback outlives this frame, so the waveform lives forever
        let waveform: &'static [i16] = Box::leak(sine_table(WAVEFORM_LEN).into_boxed_slice());
        let mut note = self.settings.build().wrap_err("invalid note settings")?;
        note.set_waveform(Some(waveform))?;

        let (control_tx, control_rx) = RingBuffer::<NoteMessage>::new(64);
        let (scope_tx, scope_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * 8);
        let (status_tx, status_rx) = RingBuffer::<VoiceStatus>::new(64);

        let voice = Voice::new(note, control_rx, sample_rate);
        let mut engine = AudioEngine::new(voice, scope_tx, status_tx);

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| engine.process(data, channels),
            |err| error!("audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        let mut terminal = ratatui::init();
        let mut ui = UiApp::new(
            scope_rx,
            status_rx,
            control_tx,
            Controls::new(self.settings),
            sample_rate,
        );
        let result = ui.run(&mut terminal);
        ratatui::restore();
        result
    }
}

/// One cycle of a sine at just under full scale
fn sine_table(len: usize) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let phase = i as f32 / len as f32 * std::f32::consts::TAU;
            (phase.sin() * 30_000.0) as i16
        })
        .collect()
}
