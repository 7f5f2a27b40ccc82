//! Smoothness readings and the Bekk ↔ PPS equivalence.
//!
//! Bekk seconds and PPS micrometers move in opposite directions (a smoother
//! sheet reads higher Bekk and lower PPS), so readings are never merged into
//! one scalar. The empirical relation between the two instruments is
//! `pps = 18.65 / bekk^(1/3)`. Bendtsen has no defined relation to either.

use crate::units::error::{ensure_in_range, ensure_non_negative, ensure_positive, ConversionError};
use crate::units::types::{Family, Measurement, SmoothnessMethod, SmoothnessUnit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coefficient of the Bekk/PPS power law, in µm·s^(1/3).
pub const BEKK_PPS_COEFFICIENT: f64 = 18.65;

/// Bekk seconds to the equivalent PPS micrometers.
pub fn bekk_to_pps(bekk_seconds: f64) -> Result<f64, ConversionError> {
    ensure_positive(Family::Smoothness, bekk_seconds)?;
    ensure_in_range(
        Family::Smoothness,
        bekk_seconds,
        BEKK_PPS_COEFFICIENT / bekk_seconds.cbrt(),
    )
}

/// PPS micrometers to the equivalent Bekk seconds.
pub fn pps_to_bekk(pps_micrometers: f64) -> Result<f64, ConversionError> {
    ensure_positive(Family::Smoothness, pps_micrometers)?;
    ensure_in_range(
        Family::Smoothness,
        pps_micrometers,
        (BEKK_PPS_COEFFICIENT / pps_micrometers).powi(3),
    )
}

/// The instrument a smoothness unit belongs to.
pub const fn smoothness_method(unit: SmoothnessUnit) -> SmoothnessMethod {
    match unit {
        SmoothnessUnit::Seconds => SmoothnessMethod::Bekk,
        SmoothnessUnit::MillilitersPerMinute => SmoothnessMethod::Bendtsen,
        SmoothnessUnit::Micrometers => SmoothnessMethod::Pps,
    }
}

/// A smoothness value stored together with its unit and instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothnessReading {
    pub value: f64,
    pub unit: SmoothnessUnit,
    pub method: SmoothnessMethod,
}

impl SmoothnessReading {
    pub fn new(value: f64, unit: SmoothnessUnit) -> Result<Self, ConversionError> {
        ensure_non_negative(Family::Smoothness, value)?;
        Ok(Self {
            value,
            unit,
            method: smoothness_method(unit),
        })
    }

    /// The same surface expressed on the other instrument, where a relation
    /// exists. Bendtsen readings and zero readings have none; a reading whose
    /// equivalent overflows is an error.
    pub fn try_equivalent(&self) -> Result<Option<Measurement<SmoothnessUnit>>, ConversionError> {
        if self.value == 0.0 {
            return Ok(None);
        }
        let equivalent = match self.unit {
            SmoothnessUnit::Seconds => {
                Measurement::new(bekk_to_pps(self.value)?, SmoothnessUnit::Micrometers)
            }
            SmoothnessUnit::Micrometers => {
                Measurement::new(pps_to_bekk(self.value)?, SmoothnessUnit::Seconds)
            }
            SmoothnessUnit::MillilitersPerMinute => return Ok(None),
        };
        Ok(Some(equivalent))
    }

    /// Like [`SmoothnessReading::try_equivalent`], with overflow read as no
    /// equivalent. For display only.
    pub fn equivalent(&self) -> Option<Measurement<SmoothnessUnit>> {
        self.try_equivalent().ok().flatten()
    }
}

impl fmt::Display for SmoothnessReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.value, self.unit, self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_bekk_to_pps_reference_points() {
        assert_abs_diff_eq!(bekk_to_pps(100.0).unwrap(), 4.02, epsilon = 0.005);
        assert_abs_diff_eq!(bekk_to_pps(50.0).unwrap(), 5.06, epsilon = 0.005);
        assert_abs_diff_eq!(bekk_to_pps(200.0).unwrap(), 3.19, epsilon = 0.005);
    }

    #[test]
    fn test_pps_to_bekk_reference_points() {
        assert_abs_diff_eq!(pps_to_bekk(4.02).unwrap(), 100.0, epsilon = 0.5);
        assert_abs_diff_eq!(pps_to_bekk(5.06).unwrap(), 50.0, epsilon = 0.5);
    }

    #[test]
    fn test_round_trip_within_a_tenth_of_a_percent() {
        for bekk in [10.0, 50.0, 75.0, 100.0, 200.0] {
            let back = pps_to_bekk(bekk_to_pps(bekk).unwrap()).unwrap();
            assert_relative_eq!(back, bekk, max_relative = 0.001);
        }
        let back = bekk_to_pps(pps_to_bekk(4.5).unwrap()).unwrap();
        assert_abs_diff_eq!(back, 4.5, epsilon = 0.005);
    }

    #[test]
    fn test_zero_and_negative_rejected() {
        for v in [0.0, -1.0, -10.0] {
            assert!(bekk_to_pps(v).unwrap_err().is_invalid_measurement());
            assert!(pps_to_bekk(v).unwrap_err().is_invalid_measurement());
        }
        assert!(bekk_to_pps(f64::NAN).is_err());
    }

    #[test]
    fn test_method_lookup() {
        assert_eq!(smoothness_method(SmoothnessUnit::Seconds), SmoothnessMethod::Bekk);
        assert_eq!(
            smoothness_method(SmoothnessUnit::MillilitersPerMinute),
            SmoothnessMethod::Bendtsen
        );
        assert_eq!(smoothness_method(SmoothnessUnit::Micrometers), SmoothnessMethod::Pps);
    }

    #[test]
    fn test_reading_equivalents() {
        let bekk = SmoothnessReading::new(100.0, SmoothnessUnit::Seconds).unwrap();
        assert_eq!(bekk.method, SmoothnessMethod::Bekk);
        let pps = bekk.equivalent().unwrap();
        assert_eq!(pps.unit, SmoothnessUnit::Micrometers);
        assert_abs_diff_eq!(pps.value, 4.02, epsilon = 0.005);

        let pps = SmoothnessReading::new(4.02, SmoothnessUnit::Micrometers).unwrap();
        assert_eq!(pps.equivalent().unwrap().unit, SmoothnessUnit::Seconds);

        let bendtsen = SmoothnessReading::new(250.0, SmoothnessUnit::MillilitersPerMinute).unwrap();
        assert_eq!(bendtsen.method, SmoothnessMethod::Bendtsen);
        assert!(bendtsen.equivalent().is_none());

        let zero = SmoothnessReading::new(0.0, SmoothnessUnit::Seconds).unwrap();
        assert!(zero.equivalent().is_none());

        assert!(SmoothnessReading::new(-3.0, SmoothnessUnit::Seconds).is_err());
    }

    #[test]
    fn test_reading_serializes_with_tokens() {
        let reading = SmoothnessReading::new(4.5, SmoothnessUnit::Micrometers).unwrap();
        assert_eq!(
            serde_json::to_string(&reading).unwrap(),
            r#"{"value":4.5,"unit":"µm","method":"PPS"}"#
        );
        assert_eq!(reading.to_string(), "4.5 µm (PPS)");
    }

    #[test]
    fn test_overflowing_equivalents_rejected() {
        let err = pps_to_bekk(1e-200).unwrap_err();
        assert_eq!(
            err,
            ConversionError::InvalidMeasurement {
                family: Family::Smoothness,
                value: 1e-200,
                reason: "result out of range",
            }
        );

        let tiny = SmoothnessReading::new(1e-200, SmoothnessUnit::Micrometers).unwrap();
        assert!(tiny.try_equivalent().unwrap_err().is_invalid_measurement());
        assert!(tiny.equivalent().is_none());
    }
}
