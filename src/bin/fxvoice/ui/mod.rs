//! TUI module for fxvoice
//!
//! Shows the playing note, its live modulation and the rendered audio, and
//! turns key presses into control messages.

pub mod state;
mod spectrum;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use fxvoice::synth::NoteMessage;
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::collections::VecDeque;
use std::time::Duration;

pub use state::{Controls, Knob, VoiceStatus};

use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size
pub const VIS_BUFFER_SIZE: usize = 1024;

/// Status snapshots kept for the loudness trace
const LOUDNESS_HISTORY: usize = 256;

/// UI application state
pub struct UiApp {
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Ring buffer receiver for voice status updates
    status_rx: Consumer<VoiceStatus>,
    /// Ring buffer sender for parameter changes
    control_tx: Producer<NoteMessage>,
    controls: Controls,
    status: VoiceStatus,
    loudness: VecDeque<u16>,
    sample_rate: u32,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        status_rx: Consumer<VoiceStatus>,
        control_tx: Producer<NoteMessage>,
        controls: Controls,
        sample_rate: u32,
    ) -> Self {
        Self {
            audio_rx,
            status_rx,
            control_tx,
            controls,
            status: VoiceStatus::default(),
            loudness: VecDeque::with_capacity(LOUDNESS_HISTORY),
            sample_rate,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate as f32),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_status();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Keep the last VIS_BUFFER_SIZE samples from the audio thread
    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }

        if received {
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
            self.spectrum.update(&self.audio_buffer);
        }
    }

    /// Keep the latest status and a short loudness history
    fn poll_status(&mut self) {
        while let Ok(status) = self.status_rx.pop() {
            if self.loudness.len() == LOUDNESS_HISTORY {
                self.loudness.pop_front();
            }
            self.loudness.push_back(status.loudness);
            self.status = status;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let (knob, up) = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Up => (Knob::Pitch, true),
            KeyCode::Down => (Knob::Pitch, false),
            KeyCode::Char('A') => (Knob::Amplitude, true),
            KeyCode::Char('a') => (Knob::Amplitude, false),
            KeyCode::Char('V') => (Knob::VibratoDepth, true),
            KeyCode::Char('v') => (Knob::VibratoDepth, false),
            KeyCode::Char('B') => (Knob::VibratoRate, true),
            KeyCode::Char('b') => (Knob::VibratoRate, false),
            KeyCode::Char('T') => (Knob::TremoloDepth, true),
            KeyCode::Char('t') => (Knob::TremoloDepth, false),
            KeyCode::Char('Y') => (Knob::TremoloRate, true),
            KeyCode::Char('y') => (Knob::TremoloRate, false),
            _ => return,
        };

        let message = self.controls.nudge(knob, up);
        if self.control_tx.push(message).is_err() {
            warn!("control queue full, dropped {:?}", message);
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Status
                Constraint::Min(8),    // Scope
                Constraint::Min(8),    // Spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(
            frame,
            chunks[0],
            &self.controls,
            &self.status,
            self.sample_rate,
            &stats,
        );
        render_waveform(frame, chunks[1], &self.audio_buffer, &self.loudness);
        render_spectrum(frame, chunks[2], self.spectrum.data());

        let help = Paragraph::new(
            " [Q] Quit  [Up/Down] Pitch  [a/A] Gain  [v/V] Vib depth  [b/B] Vib rate  [t/T] Trem depth  [y/Y] Trem rate",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
