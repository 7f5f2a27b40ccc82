use crate::units::types::Family;
use thiserror::Error;

/// Errors raised by the conversion engine. Both kinds are input-validation
/// failures and are never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value violates a physical constraint (negative, non-finite, or not
    /// strictly positive where the formula requires it).
    #[error("invalid {family} measurement {value}: {reason}")]
    InvalidMeasurement {
        family: Family,
        value: f64,
        reason: &'static str,
    },

    /// The unit token is not part of the family's closed vocabulary.
    #[error("unsupported {family} unit '{unit}'")]
    UnsupportedUnit { family: Family, unit: String },
}

impl ConversionError {
    pub fn family(&self) -> Family {
        match self {
            ConversionError::InvalidMeasurement { family, .. } => *family,
            ConversionError::UnsupportedUnit { family, .. } => *family,
        }
    }

    pub fn is_invalid_measurement(&self) -> bool {
        matches!(self, ConversionError::InvalidMeasurement { .. })
    }

    pub fn is_unsupported_unit(&self) -> bool {
        matches!(self, ConversionError::UnsupportedUnit { .. })
    }
}

/// Rejects negative, NaN and infinite values. Zero passes.
pub(crate) fn ensure_non_negative(family: Family, value: f64) -> Result<(), ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::InvalidMeasurement {
            family,
            value,
            reason: "value must be a finite number",
        });
    }
    if value < 0.0 {
        return Err(ConversionError::InvalidMeasurement {
            family,
            value,
            reason: "value must be non-negative",
        });
    }
    Ok(())
}

/// Rejects anything `ensure_non_negative` rejects, and zero.
pub(crate) fn ensure_positive(family: Family, value: f64) -> Result<(), ConversionError> {
    ensure_non_negative(family, value)?;
    if value == 0.0 {
        return Err(ConversionError::InvalidMeasurement {
            family,
            value,
            reason: "value must be greater than zero",
        });
    }
    Ok(())
}

/// Passes a computed result through, or rejects it if it overflowed. The
/// error carries the input that produced it.
pub(crate) fn ensure_in_range(
    family: Family,
    input: f64,
    result: f64,
) -> Result<f64, ConversionError> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(ConversionError::InvalidMeasurement {
            family,
            value: input,
            reason: "result out of range",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_family_and_input() {
        let err = ConversionError::UnsupportedUnit {
            family: Family::Tensile,
            unit: "psi".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported tensile unit 'psi'");

        let err = ensure_non_negative(Family::Tear, -2.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid tear measurement -2: value must be non-negative"
        );
        assert_eq!(err.family(), Family::Tear);
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(ensure_non_negative(Family::Thickness, f64::NAN)
            .unwrap_err()
            .is_invalid_measurement());
        assert!(ensure_non_negative(Family::Thickness, f64::INFINITY).is_err());
        assert!(ensure_non_negative(Family::Thickness, 0.0).is_ok());
    }

    #[test]
    fn test_positive_rejects_zero() {
        assert!(ensure_positive(Family::Smoothness, 0.0).is_err());
        assert!(ensure_positive(Family::Smoothness, -0.0).is_err());
        assert!(ensure_positive(Family::Smoothness, 1e-9).is_ok());
    }

    #[test]
    fn test_overflowed_result_rejected() {
        assert_eq!(ensure_in_range(Family::Tear, 2.0, 19.6), Ok(19.6));
        assert_eq!(
            ensure_in_range(Family::Thickness, 1e305, f64::INFINITY),
            Err(ConversionError::InvalidMeasurement {
                family: Family::Thickness,
                value: 1e305,
                reason: "result out of range",
            })
        );
    }
}
