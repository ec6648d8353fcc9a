//! Fixed-point conversions between real-valued parameters and the integer
//! representations used on the audio path.

/*
Scaled Values
=============

The audio path never touches floating point. Every real-valued parameter a
caller sets is converted once, at configuration time, into an integer with a
known binary point:

  frequency_scaled    Hz in 16.16 fixed point (u32).
                      100 Hz -> 100 * 65536 = 6_553_600
                      The largest legal note frequency (32767 Hz) still fits
                      in 31 bits, leaving headroom for the pitch bend.

  amplitude_scaled    Gain in 1.15 fixed point (u16), 0..=32767.
                      1.0 -> 32767, 0.5 -> 16384

  phase increment     LFO phase advance per tick. A full LFO cycle is 2^32
                      phase units, so the accumulator wraps naturally:
                      increment = rate_hz * 2^32 / sample_rate

  unity               32768 (BEND_CENTER) is "multiply by 1.0" for both the
                      tremolo multiplier (>> 15) and the bend ratio.

All conversions round half up. Inputs are already range-checked by the
caller, so the values handed in here are finite and non-negative.
*/

/// Largest 1.15 fixed-point value, the scaled form of 1.0.
pub const SCALE_ONE: u16 = 32767;

/// Unity in the 17-bit ratio domain, and the "no bend" bend value.
pub const BEND_CENTER: u32 = 32768;

/// Number of fractional bits in a scaled frequency.
pub const FREQUENCY_FRAC_BITS: u32 = 16;

#[inline]
fn round_to_u64(value: f64) -> u64 {
    (value + 0.5) as u64
}

/// Convert a frequency in Hz into 16.16 fixed point.
///
/// # Example
/// ```
/// use fxvoice::dsp::fixed::frequency_to_scaled;
/// assert_eq!(frequency_to_scaled(100.0), 6_553_600);
/// assert_eq!(frequency_to_scaled(0.5), 32_768);
/// ```
#[inline]
pub fn frequency_to_scaled(frequency_hz: f32) -> u32 {
    let scaled = round_to_u64(f64::from(frequency_hz) * f64::from(1u32 << FREQUENCY_FRAC_BITS));
    scaled.min(u64::from(u32::MAX)) as u32
}

/// Convert a 16.16 scaled frequency back into Hz.
#[inline]
pub fn scaled_to_frequency(frequency_scaled: u32) -> f32 {
    (f64::from(frequency_scaled) / f64::from(1u32 << FREQUENCY_FRAC_BITS)) as f32
}

/// Convert a gain in `0.0..=1.0` into 1.15 fixed point.
///
/// # Example
/// ```
/// use fxvoice::dsp::fixed::amplitude_to_scaled;
/// assert_eq!(amplitude_to_scaled(1.0), 32767);
/// assert_eq!(amplitude_to_scaled(0.0), 0);
/// ```
#[inline]
pub fn amplitude_to_scaled(amplitude: f32) -> u16 {
    let scaled = round_to_u64(f64::from(amplitude) * f64::from(SCALE_ONE));
    scaled.min(u64::from(SCALE_ONE)) as u16
}

/// Phase increment per tick for an LFO running at `rate_hz`.
///
/// Returns 0 while no sample rate is known.
///
/// # Example
/// ```
/// use fxvoice::dsp::fixed::rate_to_phase_increment;
/// // 1 Hz at 65536 Hz advances 1/65536 of a cycle per tick
/// assert_eq!(rate_to_phase_increment(1.0, 65_536), 65_536);
/// ```
#[inline]
pub fn rate_to_phase_increment(rate_hz: f32, sample_rate: u32) -> u32 {
    if sample_rate == 0 {
        return 0;
    }
    let cycle = (1u64 << 32) as f64;
    let increment = round_to_u64(f64::from(rate_hz) * cycle / f64::from(sample_rate));
    increment.min(u64::from(u32::MAX)) as u32
}
