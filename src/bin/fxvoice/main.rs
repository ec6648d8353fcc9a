//! fxvoice - play one fixed-point voice and watch its modulation
//!
//! Run with: cargo run
//! Set FXVOICE_LOG=debug (or trace) for more logging.

mod app;
mod engine;
mod ui;

use app::FxVoice;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let level = std::env::var("FXVOICE_LOG")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(log::Level::Warn);
    simple_logger::init_with_level(level)?;

    FxVoice::new(220.0)
        .amplitude(0.6)
        .vibrato(0.01, 5.5)
        .tremolo(0.2, 3.0)
        .run()
}
