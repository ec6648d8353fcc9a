//! Status bar widget - note settings next to what the audio thread reports

use fxvoice::dsp::fixed::scaled_to_frequency;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{Controls, VoiceStatus};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the status bar
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    controls: &Controls,
    status: &VoiceStatus,
    sample_rate: u32,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" fxvoice ").borders(Borders::ALL);
    let s = &controls.settings;

    let pitch = Line::from(vec![
        Span::styled(
            format!(" {:.2} Hz", s.frequency),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(" -> {:.2} Hz  ", scaled_to_frequency(status.bent_frequency)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("gain {:.2} -> {:.2}  ", s.amplitude, f32::from(status.loudness) / 32767.0),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate as f32 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let modulation = Line::from(vec![
        Span::styled(
            format!(" vibrato {:.2} @ {:.1} Hz  ", s.vibrato.depth, s.vibrato.rate),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("tremolo {:.2} @ {:.1} Hz  ", s.tremolo.depth, s.tremolo.rate),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("rejected {}", status.rejected),
            Style::default().fg(if status.rejected == 0 {
                Color::DarkGray
            } else {
                Color::Red
            }),
        ),
    ]);

    let paragraph = Paragraph::new(vec![pitch, modulation]).block(block);
    frame.render_widget(paragraph, area);
}
