//! Borrowed single-cycle waveform buffers.
//!
//! A note never copies its waveform. It keeps a `&[i16]` view into a buffer
//! the caller owns, which the borrow checker keeps alive and unchanged for as
//! long as the note holds it.

use crate::synth::error::NoteError;

/// Shortest accepted waveform, in samples.
pub const MIN_WAVEFORM_LEN: usize = 2;
/// Longest accepted waveform, in samples.
pub const MAX_WAVEFORM_LEN: usize = 1024;

/// A validated view of one waveform cycle of signed 16-bit samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waveform<'w> {
    samples: &'w [i16],
}

impl<'w> Waveform<'w> {
    pub fn new(samples: &'w [i16]) -> Result<Self, NoteError> {
        if samples.len() < MIN_WAVEFORM_LEN {
            return Err(NoteError::InvalidArgument {
                parameter: "waveform",
                reason: "needs at least 2 samples",
            });
        }
        if samples.len() > MAX_WAVEFORM_LEN {
            return Err(NoteError::InvalidArgument {
                parameter: "waveform",
                reason: "holds more than 1024 samples",
            });
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &'w [i16] {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_buffers_in_range() {
        let square = [i16::MAX, i16::MIN];
        let wave = Waveform::new(&square).unwrap();
        assert_eq!(wave.samples(), &square);
        assert_eq!(wave.len(), 2);

        let long = vec![0i16; MAX_WAVEFORM_LEN];
        assert!(Waveform::new(&long).is_ok());
    }

    #[test]
    fn rejects_bad_lengths() {
        assert!(matches!(
            Waveform::new(&[]),
            Err(NoteError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Waveform::new(&[0]),
            Err(NoteError::InvalidArgument { .. })
        ));
        let too_long = vec![0i16; MAX_WAVEFORM_LEN + 1];
        assert!(matches!(
            Waveform::new(&too_long),
            Err(NoteError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn view_shares_storage() {
        let table: Vec<i16> = (0..256).map(|i| (i * 100) as i16).collect();
        let wave = Waveform::new(&table).unwrap();
        assert!(std::ptr::eq(wave.samples(), table.as_slice()));
    }
}
