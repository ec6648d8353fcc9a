//! Scope pane: recent output samples with the tremolo gain traced over them

use std::collections::VecDeque;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Spread `values` evenly across `0.0..=1.0` on the x axis.
fn spread(values: impl ExactSizeIterator<Item = f64>) -> Vec<(f64, f64)> {
    let last = values.len().saturating_sub(1).max(1) as f64;
    values.enumerate().map(|(i, v)| (i as f64 / last, v)).collect()
}

/// 1.15 gain as a fraction of full scale.
fn gain(loudness: u16) -> f64 {
    f64::from(loudness) / 32767.0
}

fn gain_trace(data: &[(f64, f64)]) -> Dataset<'_> {
    Dataset::default()
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(data)
}

fn axis(bounds: [f64; 2]) -> Axis<'static> {
    Axis::default()
        .bounds(bounds)
        .style(Style::default().fg(Color::DarkGray))
}

pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32], loudness: &VecDeque<u16>) {
    let scope = spread(samples.iter().map(|&s| f64::from(s)));
    // Mirror the gain so it hugs the waveform from both sides
    let upper = spread(loudness.iter().map(|&l| gain(l)));
    let lower = spread(loudness.iter().map(|&l| -gain(l)));

    let title = match loudness.back() {
        Some(&l) => format!(" Scope  gain {:.3} ", gain(l)),
        None => " Scope ".to_string(),
    };

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&scope),
        gain_trace(&upper),
        gain_trace(&lower),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(axis([0.0, 1.0]))
        .y_axis(axis([-1.0, 1.0]));

    frame.render_widget(chart, area);
}
