//! Benchmarks for stepping a bank of modulated notes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use fxvoice::{dsp::lfo::LfoDescriptor, patch::NoteSettings, Note};

use crate::{BLOCK_SIZES, VOICE_COUNTS};

const SAMPLE_RATE: u32 = 48_000;

fn bank(count: usize) -> Vec<Note<'static>> {
    (0..count)
        .map(|i| {
            let settings = NoteSettings {
                frequency: 110.0 * (1.0 + i as f32 * 0.25),
                amplitude: 0.8,
                tremolo: LfoDescriptor::new(0.3, 4.0),
                vibrato: LfoDescriptor::new(0.02, 5.5),
                envelope: None,
            };
            let mut note = settings.build().expect("valid bench settings");
            note.start(SAMPLE_RATE);
            note
        })
        .collect()
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        for &count in VOICE_COUNTS {
            let mut notes = bank(count);
            let id = BenchmarkId::new(format!("step/{}", size), count);

            group.bench_with_input(id, &count, |b, _| {
                b.iter(|| {
                    let mut mix = 0u64;
                    for note in notes.iter_mut() {
                        let mut loudness = note.envelope();
                        let bent = note.step(SAMPLE_RATE, black_box(size), &mut loudness);
                        mix = mix.wrapping_add(u64::from(bent) * u64::from(loudness));
                    }
                    mix
                })
            });
        }
    }

    group.finish();
}
