//! Low Frequency Oscillator (LFO) engine for tremolo and vibrato.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::fixed::{amplitude_to_scaled, rate_to_phase_increment};

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running at sub-audio rates whose output moves a
parameter instead of being heard. A note carries two of them:

  tremolo     LFO -> loudness      (centered on unity gain)
  vibrato     LFO -> pitch bend    (centered on "no bend")


Vocabulary
----------

  descriptor  What the caller asks for: depth (0..1) and rate (0..60 Hz).
              Floating point, validated by the note's setters.

  state       What the audio path runs on: scaled depth, phase increment,
              offset and the phase accumulator itself. Integer only.

  tick        One output sample. `step(duration)` advances `duration` ticks
              at once; the renderer calls it once per block.

  offset      Value the LFO swings around. The consumer owns it:
                tremolo  offset = 32768 - amplitude_scaled
                vibrato  offset = 32768


Phase Accumulator
-----------------

The phase is a u32 where 2^32 is one full cycle, so overflow *is* the
wrap-around. Each tick adds the phase increment:

    increment = rate_hz * 2^32 / sample_rate

At 5 Hz and 48 kHz that is ~447_392 per tick; a 256 tick block adds
~114.5 million, about 1/37 of a cycle.


Triangle Shape
--------------

Only the top 16 bits of phase matter for the shape:

    w = phase >> 16                       0..65535

    w < 16384            tri = 2w                 0 -> 32767
    w < 49152            tri = 65535 - 2w     32767 -> -32767
    otherwise            tri = 2w - 131072   -32768 -> -2

         32767 ┐   ╱╲
               │  ╱  ╲
             0 ┼─╱────╲────╱──
               │       ╲  ╱
        -32768 ┘        ╲╱

A triangle is cheap (no table, no multiply) and its linear slopes are fine
at control rate.


Output
------

    value = ((tri * amplitude_scaled) >> 15) + offset

Depth 0 makes amplitude_scaled 0, so the output is exactly `offset` on every
step. The shift is arithmetic: negative triangle values round toward minus
infinity, which keeps the swing symmetric within one unit.
*/

/// Caller-facing LFO parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LfoDescriptor {
    /// Modulation depth, `0.0..=1.0`.
    pub depth: f32,
    /// Rate in Hz, `0.0..=60.0`.
    pub rate: f32,
}

/// Runtime state derived from an [`LfoDescriptor`] and a sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LfoState {
    pub amplitude_scaled: u16,
    pub phase_increment: u32,
    pub offset: i32,
    pub phase: u32,
}

impl LfoDescriptor {
    pub const MAX_DEPTH: f32 = 1.0;
    pub const MAX_RATE: f32 = 60.0;

    pub fn new(depth: f32, rate: f32) -> Self {
        Self { depth, rate }
    }
}

impl LfoState {
    /// Derive scaled depth and phase increment for `sample_rate`.
    ///
    /// Phase and offset are left alone.
    pub fn set(&mut self, descr: &LfoDescriptor, sample_rate: u32) {
        self.amplitude_scaled = amplitude_to_scaled(descr.depth);
        self.phase_increment = rate_to_phase_increment(descr.rate, sample_rate);
    }

    /// Current triangle value in `-32768..=32767`.
    #[inline]
    pub fn triangle(&self) -> i32 {
        let whole = (self.phase >> 16) as i32;
        if whole < 16384 {
            whole * 2
        } else if whole < 49152 {
            65535 - whole * 2
        } else {
            whole * 2 - 131072
        }
    }

    /// Read the modulation value and advance by `duration` ticks.
    #[inline]
    pub fn step(&mut self, duration: u16) -> i32 {
        let tri = self.triangle();
        self.phase = self
            .phase
            .wrapping_add(self.phase_increment.wrapping_mul(u32::from(duration)));
        ((tri * i32::from(self.amplitude_scaled)) >> 15) + self.offset
    }

    /// Rewind to the start of the cycle.
    pub fn reset_phase(&mut self) {
        self.phase = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(depth: f32, rate: f32, sample_rate: u32, offset: i32) -> LfoState {
        let mut state = LfoState {
            offset,
            ..LfoState::default()
        };
        state.set(&LfoDescriptor::new(depth, rate), sample_rate);
        state
    }

    #[test]
    fn zero_depth_holds_offset() {
        let mut lfo = running(0.0, 7.0, 48_000, 32768);
        for _ in 0..1000 {
            assert_eq!(lfo.step(64), 32768);
        }
    }

    #[test]
    fn zero_rate_never_moves() {
        let mut lfo = running(1.0, 0.0, 48_000, 0);
        let first = lfo.step(256);
        for _ in 0..100 {
            assert_eq!(lfo.step(256), first);
        }
        assert_eq!(lfo.phase, 0);
    }

    #[test]
    fn triangle_corners() {
        let mut lfo = LfoState::default();
        let at = |lfo: &mut LfoState, w: u32| {
            lfo.phase = w << 16;
            lfo.triangle()
        };
        assert_eq!(at(&mut lfo, 0), 0);
        assert_eq!(at(&mut lfo, 16383), 32766);
        assert_eq!(at(&mut lfo, 16384), 32767);
        assert_eq!(at(&mut lfo, 32768), -1);
        assert_eq!(at(&mut lfo, 49152), -32768);
        assert_eq!(at(&mut lfo, 65535), -2);
    }

    #[test]
    fn full_depth_swings_around_offset() {
        // 1 Hz at 1024 Hz, stepping 1 tick at a time covers a whole cycle
        let mut lfo = running(1.0, 1.0, 1024, 32768);
        let values: Vec<i32> = (0..1024).map(|_| lfo.step(1)).collect();

        let max = *values.iter().max().unwrap();
        let min = *values.iter().min().unwrap();
        assert!(max > 65000 && max <= 65535, "max {}", max);
        assert!(min < 600 && min >= 0, "min {}", min);
    }

    #[test]
    fn step_advances_by_duration() {
        let mut a = running(0.5, 5.0, 48_000, 0);
        let mut b = a;
        a.step(256);
        for _ in 0..4 {
            b.step(64);
        }
        assert_eq!(a.phase, b.phase);
    }

    #[test]
    fn set_keeps_phase_and_offset() {
        let mut lfo = running(0.5, 5.0, 48_000, 1234);
        lfo.step(1000);
        let phase = lfo.phase;
        lfo.set(&LfoDescriptor::new(0.25, 2.0), 44_100);
        assert_eq!(lfo.phase, phase);
        assert_eq!(lfo.offset, 1234);
        assert_eq!(lfo.amplitude_scaled, 8192);
    }
}
