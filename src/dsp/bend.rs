//! Pitch bend by table interpolation.

use super::fixed::BEND_CENTER;

/*
Pitch Bend
==========

A bend value is a 16-bit pitch offset:

       0            32768            65535
       |--------------|----------------|
    one octave      no bend        one octave
       down                            up

One bend unit is 1/32768 of an octave, so the exact answer is

    bent = frequency * 2^((bend - 32768) / 32768)

Computing 2^x per block is too expensive for small targets, so we keep a
13-entry table holding the fractional part of the ratio at each semitone of
one octave, in 1.15 fixed point:

    BEND_TABLE[i] = round(32768 * (2^(i/12) - 1))      i = 0..=12

    i      0     1     2   ...    11     12
    ratio  1.0  1.059 1.122 ... 1.888   2.0
    entry  0    1948  4013  ... 29090  32768


Locating a Semitone
-------------------

After folding the bend into a distance from center (0..=32767), multiplying
by 24 turns it into semitones with a 16-bit fraction:

    32768 units = 12 semitones   =>   1 semitone = 65536 / 24 units

    seminote = distance * 24
    semitone = seminote >> 16        (0..=11)
    fraction = seminote & 0xffff     (weight of the upper entry)

The ratio is the linear blend of the two neighbouring entries plus unity:

    ratio = ((lo * (65535 - fraction) + hi * fraction) >> 16) + 32768

The table has 13 entries so `semitone + 1` never needs a bounds check.


Up vs Down
----------

Bending up multiplies by the ratio:         f * ratio >> 15
Bending down uses the same table but measured from one octave below, then
halves the result:                          f * ratio >> 16

At bend 0 the ratio is exactly 1.0, giving f / 2. Just below center the ratio
approaches 2.0, giving back f. The extra shift is what makes the down branch
land an octave lower; keep it.
*/

/// Fractional semitone ratios for one octave, 1.15 fixed point.
pub const BEND_TABLE: [u16; 13] = [
    0, 1948, 4013, 6200, 8517, 10972, 13573, 16329, 19248, 22341, 25618, 29090, 32768,
];

/// Bend `frequency_scaled` by `bend_value` (32768 = no bend, ±1 octave range).
///
/// Integer-only; safe to call from the audio callback. Results that would
/// not fit in a `u32` saturate.
///
/// # Example
/// ```
/// use fxvoice::dsp::bend::pitch_bend;
/// let a4 = 440 << 16;
/// assert_eq!(pitch_bend(a4, 32768), a4);
/// assert_eq!(pitch_bend(a4, 0), a4 / 2);
/// ```
#[inline]
pub fn pitch_bend(frequency_scaled: u32, bend_value: u16) -> u32 {
    let down = u32::from(bend_value) < BEND_CENTER;
    let distance = if down {
        u32::from(bend_value)
    } else {
        u32::from(bend_value) - BEND_CENTER
    };

    let seminote = distance * 24;
    let semitone = (seminote >> 16) as usize;
    let fraction = seminote & 0xffff;

    let lo = u32::from(BEND_TABLE[semitone]);
    let hi = u32::from(BEND_TABLE[semitone + 1]);
    let ratio = ((lo * (65535 - fraction) + hi * fraction) >> 16) + BEND_CENTER;

    let shift = 15 + u32::from(down);
    let bent = (u64::from(frequency_scaled) * u64::from(ratio)) >> shift;
    u32::try_from(bent).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4: u32 = 440 << 16;

    #[test]
    fn table_matches_equal_temperament() {
        for (i, &entry) in BEND_TABLE.iter().enumerate() {
            let exact = 32768.0 * (2f64.powf(i as f64 / 12.0) - 1.0);
            assert!(
                (f64::from(entry) - exact).abs() <= 1.0,
                "entry {} = {}, expected ~{}",
                i,
                entry,
                exact
            );
        }
        assert_eq!(BEND_TABLE[0], 0);
        assert_eq!(BEND_TABLE[12], 32768);
    }

    #[test]
    fn table_is_increasing() {
        assert!(BEND_TABLE.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn center_is_identity() {
        for f in [0, 1, 6_553_600, A4, 32_767 << 16] {
            assert_eq!(pitch_bend(f, 32768), f);
        }
    }

    #[test]
    fn full_range_spans_two_octaves() {
        assert_eq!(pitch_bend(A4, 0), A4 / 2);

        let up = pitch_bend(A4, 65535);
        let expected = u64::from(A4) * 2;
        let error = (u64::from(up)).abs_diff(expected) as f64 / expected as f64;
        assert!(error < 1e-3, "up bend off by {}", error);
    }

    #[test]
    fn semitone_steps_land_on_table_entries() {
        // 32768 / 12 is not an integer; 7 semitones = 7 * 65536 / 24 units exactly
        let fifth = (7 * 65536 / 24) as u16;
        let bent = pitch_bend(A4, 32768 + fifth);
        let exact = f64::from(A4) * 2f64.powf(7.0 / 12.0);
        assert!((f64::from(bent) - exact).abs() / exact < 1e-3);
    }

    #[test]
    fn tracks_exponential_curve() {
        for bend in (0..=65535u32).step_by(1024) {
            let bent = pitch_bend(A4, bend as u16);
            let exact = f64::from(A4) * 2f64.powf((bend as f64 - 32768.0) / 32768.0);
            let error = (f64::from(bent) - exact).abs() / exact;
            assert!(error < 2e-3, "bend {} off by {}", bend, error);
        }
    }

    #[test]
    fn monotonic_in_bend_value() {
        let mut previous = 0;
        for bend in 0..=u16::MAX {
            let bent = pitch_bend(A4, bend);
            assert!(bent >= previous, "bend {} decreased", bend);
            previous = bent;
        }
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        assert_eq!(pitch_bend(u32::MAX, 65535), u32::MAX);
    }
}
