#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::fixed::SCALE_ONE;
use crate::{synth::error::NoteError, MAX_BLOCK_TICKS};

/*
Envelope Definitions
====================

An envelope is described in seconds and levels, the way a musician thinks
about it, and run in scaled integer steps, the way the audio path wants it.
This module only does the translation; walking through the stages belongs
to the renderer.

Vocabulary
----------

  attack_time     seconds to climb from 0 to attack_level
  decay_time      seconds to fall from attack_level to sustain_level
  release_time    seconds to fall from the held level to 0
  attack_level    peak level, 0.0 - 1.0
  sustain_level   level held while the note is down, 0.0 - 1.0

  step            level change per MAX_BLOCK_TICKS ticks, in 1.15 units.
                  Renderers scale by their actual block length.


The Math: Time to Step
----------------------

    samples = round(time * sample_rate)
    step    = difference * MAX_BLOCK_TICKS / samples

Example: attack of 0.1 s to full level at 48 kHz
  - samples = 4800
  - step    = 32767 * 256 / 4800 = 1747 per 256-tick block
  - after 4800 / 256 = 18.75 blocks the level reaches 32767

The step magnitude is clamped to 1..=32767. A stage shorter than one block
jumps in one block, and a stage with something to cover always moves by at
least 1, so it cannot stall. Only the magnitude depends on the distance;
the sign follows the direction of travel, so a decay towards a sustain level
above the attack level climbs.

Release always starts from the sustain level; that is where the held note
sits when the key goes up.
*/

/// Envelope shape, in seconds and `0.0..=1.0` levels.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub attack_time: f32,
    pub decay_time: f32,
    pub release_time: f32,
    pub attack_level: f32,
    pub sustain_level: f32,
}

/// Scaled per-block steps derived from an [`Envelope`] at one sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeDefinition {
    pub attack_level: i16,
    pub sustain_level: i16,
    pub attack_step: i32,
    pub decay_step: i32,
    pub release_step: i32,
}

impl Envelope {
    pub fn new(
        attack_time: f32,
        decay_time: f32,
        release_time: f32,
        attack_level: f32,
        sustain_level: f32,
    ) -> Result<Self, NoteError> {
        let envelope = Self {
            attack_time,
            decay_time,
            release_time,
            attack_level,
            sustain_level,
        };
        envelope.validate()?;
        Ok(envelope)
    }

    /// Check every field against its range.
    pub fn validate(&self) -> Result<(), NoteError> {
        NoteError::check_range("attack_time", self.attack_time, 0.0, f32::MAX)?;
        NoteError::check_range("decay_time", self.decay_time, 0.0, f32::MAX)?;
        NoteError::check_range("release_time", self.release_time, 0.0, f32::MAX)?;
        NoteError::check_range("attack_level", self.attack_level, 0.0, 1.0)?;
        NoteError::check_range("sustain_level", self.sustain_level, 0.0, 1.0)?;
        Ok(())
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack_time: 0.1,
            decay_time: 0.05,
            release_time: 0.2,
            attack_level: 1.0,
            sustain_level: 0.8,
        }
    }
}

/// Step magnitude covering `difference` in `time` seconds, in `1..=32767`.
fn time_to_step(sample_rate: u32, time: f32, difference: i32) -> i32 {
    let samples = (f64::from(time) * f64::from(sample_rate)).round();
    if samples < 1.0 {
        return i32::from(SCALE_ONE);
    }
    let samples = samples.min(f64::from(i32::MAX)) as i64;
    let step = i64::from(difference).abs() * i64::from(MAX_BLOCK_TICKS) / samples;
    step.clamp(1, i64::from(SCALE_ONE)) as i32
}

impl EnvelopeDefinition {
    /// Derive runtime steps for `envelope` at `sample_rate`.
    pub fn define(envelope: &Envelope, sample_rate: u32) -> Self {
        let attack_level = (f32::from(SCALE_ONE) * envelope.attack_level) as i16;
        let sustain_level = (f32::from(SCALE_ONE) * envelope.sustain_level) as i16;

        let attack_step = time_to_step(sample_rate, envelope.attack_time, i32::from(attack_level));
        let decay = i32::from(sustain_level) - i32::from(attack_level);
        let decay_step = time_to_step(sample_rate, envelope.decay_time, decay);
        let decay_step = if decay > 0 { decay_step } else { -decay_step };
        let release_step =
            -time_to_step(sample_rate, envelope.release_time, i32::from(sustain_level));

        Self {
            attack_level,
            sustain_level,
            attack_step,
            decay_step,
            release_step,
        }
    }
}

impl Default for EnvelopeDefinition {
    /// Instant full-level envelope, used when a note has none.
    fn default() -> Self {
        let full = i32::from(SCALE_ONE);
        Self {
            attack_level: full as i16,
            sustain_level: full as i16,
            attack_step: full,
            decay_step: -full,
            release_step: -full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 48_000;

    #[test]
    fn attack_step_matches_worked_example() {
        let env = Envelope::new(0.1, 0.05, 0.2, 1.0, 0.8).unwrap();
        let def = EnvelopeDefinition::define(&env, SAMPLE_RATE);
        assert_eq!(def.attack_level, 32767);
        assert_eq!(def.attack_step, 32767 * 256 / 4800);
    }

    #[test]
    fn levels_truncate() {
        let env = Envelope::new(0.1, 0.05, 0.2, 1.0, 0.5).unwrap();
        let def = EnvelopeDefinition::define(&env, SAMPLE_RATE);
        assert_eq!(def.sustain_level, 16383);
    }

    #[test]
    fn zero_time_jumps_in_one_block() {
        let env = Envelope::new(0.0, 0.0, 0.0, 1.0, 0.5).unwrap();
        let def = EnvelopeDefinition::define(&env, SAMPLE_RATE);
        assert_eq!(def.attack_step, 32767);
        assert_eq!(def.decay_step, -32767);
        assert_eq!(def.release_step, -32767);
    }

    #[test]
    fn short_stages_cap_at_full_scale() {
        for samples in [1u32, 2, 17, 128, 255] {
            let time = samples as f32 / SAMPLE_RATE as f32;
            let env = Envelope::new(time, time, time, 1.0, 0.5).unwrap();
            let def = EnvelopeDefinition::define(&env, SAMPLE_RATE);
            assert_eq!(def.attack_step, 32767, "{samples} samples");
            assert!(-def.decay_step <= 32767 && def.decay_step < 0);
            assert!(-def.release_step <= 32767 && def.release_step < 0);
        }

        // 256 samples is one block: exactly the full distance
        let time = 256.0 / SAMPLE_RATE as f32;
        let env = Envelope::new(time, 0.0, 0.0, 1.0, 0.5).unwrap();
        assert_eq!(
            EnvelopeDefinition::define(&env, SAMPLE_RATE).attack_step,
            32767
        );
    }

    #[test]
    fn decay_climbs_to_a_higher_sustain() {
        let env = Envelope::new(0.01, 0.01, 0.1, 0.2, 1.0).unwrap();
        let def = EnvelopeDefinition::define(&env, SAMPLE_RATE);
        assert_eq!(def.attack_level, 6553);
        assert_eq!(def.sustain_level, 32767);
        // 480 samples to climb 26214
        assert_eq!(def.decay_step, 26214 * 256 / 480);

        let falling = Envelope::new(0.01, 0.01, 0.1, 1.0, 0.2).unwrap();
        let def = EnvelopeDefinition::define(&falling, SAMPLE_RATE);
        assert_eq!(def.decay_step, -(26214 * 256 / 480));
    }

    #[test]
    fn release_starts_from_sustain() {
        let env = Envelope::new(0.0, 0.0, 0.1, 1.0, 0.5).unwrap();
        let def = EnvelopeDefinition::define(&env, SAMPLE_RATE);
        assert_eq!(def.release_step, -(16383 * 256 / 4800));
    }

    #[test]
    fn slow_stages_never_stall() {
        let env = Envelope::new(100.0, 100.0, 100.0, 0.001, 0.0).unwrap();
        let def = EnvelopeDefinition::define(&env, SAMPLE_RATE);
        assert_eq!(def.attack_step, 1);
        assert_eq!(def.decay_step, -1);
        assert_eq!(def.release_step, -1);
    }

    #[test]
    fn steps_scale_with_sample_rate() {
        let env = Envelope::default();
        let slow = EnvelopeDefinition::define(&env, 22_050);
        let fast = EnvelopeDefinition::define(&env, 44_100);
        assert!(slow.attack_step > fast.attack_step);
        assert!((slow.attack_step - 2 * fast.attack_step).abs() <= 2);
    }

    #[test]
    fn validate_rejects_bad_fields() {
        assert!(matches!(
            Envelope::new(-0.1, 0.0, 0.0, 1.0, 1.0),
            Err(NoteError::OutOfRange {
                parameter: "attack_time",
                ..
            })
        ));
        assert!(matches!(
            Envelope::new(0.1, 0.0, 0.0, 1.0, 1.5),
            Err(NoteError::OutOfRange {
                parameter: "sustain_level",
                ..
            })
        ));
        assert!(matches!(
            Envelope::new(f32::NAN, 0.0, 0.0, 1.0, 1.0),
            Err(NoteError::InvalidArgument {
                parameter: "attack_time",
                ..
            })
        ));
        assert!(Envelope::default().validate().is_ok());
    }

    #[test]
    fn default_definition_is_instant() {
        let def = EnvelopeDefinition::default();
        assert_eq!(def.attack_level, 32767);
        assert_eq!(def.sustain_level, 32767);
        assert_eq!(def.attack_step, 32767);
        assert_eq!(def.release_step, -32767);
    }
}
