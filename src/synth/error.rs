/// Errors raised when configuring a note.
///
/// These are caller bugs: a value outside its documented range or a
/// malformed collaborator. Nothing on the per-block path returns them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteError {
    /// Value lies outside its closed interval `[min, max]`
    OutOfRange {
        parameter: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    /// Value has the wrong shape for its parameter
    InvalidArgument {
        parameter: &'static str,
        reason: &'static str,
    },
}

impl NoteError {
    /// Return `value` if it lies within `[min, max]`.
    pub fn check_range(
        parameter: &'static str,
        value: f32,
        min: f32,
        max: f32,
    ) -> Result<f32, NoteError> {
        if value.is_nan() {
            return Err(NoteError::InvalidArgument {
                parameter,
                reason: "not a number",
            });
        }
        if value < min || value > max {
            return Err(NoteError::OutOfRange {
                parameter,
                value,
                min,
                max,
            });
        }
        Ok(value)
    }

    /// Name of the parameter that was rejected.
    pub fn parameter(&self) -> &'static str {
        match *self {
            NoteError::OutOfRange { parameter, .. } => parameter,
            NoteError::InvalidArgument { parameter, .. } => parameter,
        }
    }
}

impl std::fmt::Display for NoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteError::OutOfRange {
                parameter,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "{} must be in range {}-{}, got {}",
                    parameter, min, max, value
                )
            }
            NoteError::InvalidArgument { parameter, reason } => {
                write!(f, "invalid {}: {}", parameter, reason)
            }
        }
    }
}

impl std::error::Error for NoteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_closed() {
        assert_eq!(NoteError::check_range("amplitude", 0.0, 0.0, 1.0), Ok(0.0));
        assert_eq!(NoteError::check_range("amplitude", 1.0, 0.0, 1.0), Ok(1.0));
        assert!(NoteError::check_range("amplitude", 1.0001, 0.0, 1.0).is_err());
        assert!(NoteError::check_range("amplitude", -0.0001, 0.0, 1.0).is_err());
    }

    #[test]
    fn infinity_is_out_of_range_and_nan_is_invalid() {
        assert!(matches!(
            NoteError::check_range("frequency", f32::INFINITY, 0.0, 32767.0),
            Err(NoteError::OutOfRange { .. })
        ));
        assert!(matches!(
            NoteError::check_range("frequency", f32::NAN, 0.0, 32767.0),
            Err(NoteError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn display_names_the_parameter() {
        let err = NoteError::check_range("tremolo_rate", 61.0, 0.0, 60.0).unwrap_err();
        assert_eq!(err.parameter(), "tremolo_rate");
        assert_eq!(err.to_string(), "tremolo_rate must be in range 0-60, got 61");

        let err = NoteError::InvalidArgument {
            parameter: "waveform",
            reason: "needs at least 2 samples",
        };
        assert_eq!(err.to_string(), "invalid waveform: needs at least 2 samples");
    }
}
