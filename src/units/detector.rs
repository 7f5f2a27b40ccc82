use crate::units::error::ConversionError;
use crate::units::types::{Family, Measurement};
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

lazy_static! {
    /// Number (optional sign, decimals, exponent), optional whitespace, then a
    /// unit token starting with a letter or the micro sign.
    /// Examples: "64 gf", "0.1mm", "1.5e2 µm", "7.2 kN/m", "-3 cN"
    static ref MEASUREMENT_PATTERN: Regex = Regex::new(
        r"^([-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)\s*([A-Za-zµμ][^\s]*)$"
    )
    .unwrap();
}

/// Check if a string looks like "<number> <unit>".
pub fn looks_like_measurement(s: &str) -> bool {
    MEASUREMENT_PATTERN.is_match(s.trim())
}

/// Split a measurement string into its number and raw unit token.
pub fn split_measurement(s: &str) -> Option<(f64, &str)> {
    let caps = MEASUREMENT_PATTERN.captures(s.trim())?;
    let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let unit = caps.get(2)?.as_str();
    Some((value, unit))
}

/// Parse a measurement string against one family's vocabulary.
///
/// Strings that are not "<number> <unit>" at all fail as `UnsupportedUnit`
/// carrying the whole input, since no unit could be read from them.
pub fn parse_measurement<U>(family: Family, s: &str) -> Result<Measurement<U>, ConversionError>
where
    U: FromStr<Err = ConversionError>,
{
    let (value, token) = split_measurement(s).ok_or_else(|| ConversionError::UnsupportedUnit {
        family,
        unit: s.trim().to_string(),
    })?;
    Ok(Measurement::new(value, token.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::types::{SmoothnessUnit, TearUnit, ThicknessUnit};

    #[test]
    fn test_measurement_detection() {
        assert!(looks_like_measurement("64 gf"));
        assert!(looks_like_measurement("0.1mm"));
        assert!(looks_like_measurement("1.5e2 µm"));
        assert!(looks_like_measurement("7.2 kN/m"));
        assert!(looks_like_measurement("12 mN·m"));
        assert!(looks_like_measurement("-3 cN"));
        assert!(looks_like_measurement(".5 mm"));

        assert!(!looks_like_measurement("100"));
        assert!(!looks_like_measurement("gf"));
        assert!(!looks_like_measurement("100-120 gf"));
        assert!(!looks_like_measurement("hello world"));
        assert!(!looks_like_measurement(""));
    }

    #[test]
    fn test_split_measurement() {
        assert_eq!(split_measurement(" 64 gf "), Some((64.0, "gf")));
        assert_eq!(split_measurement("0.1mm"), Some((0.1, "mm")));
        assert_eq!(split_measurement("150 sec"), Some((150.0, "sec")));
        assert_eq!(split_measurement(".5 mm"), Some((0.5, "mm")));
        assert_eq!(split_measurement("12. gf"), Some((12.0, "gf")));
        assert_eq!(split_measurement("N/A"), None);
        assert_eq!(split_measurement(". mm"), None);
    }

    #[test]
    fn test_parse_measurement_by_family() {
        let m: Measurement<TearUnit> = parse_measurement(Family::Tear, "64 gf").unwrap();
        assert_eq!(m, Measurement::new(64.0, TearUnit::GramForce));

        let m: Measurement<SmoothnessUnit> =
            parse_measurement(Family::Smoothness, "4.5 µm").unwrap();
        assert_eq!(m.unit, SmoothnessUnit::Micrometers);

        let err = parse_measurement::<ThicknessUnit>(Family::Thickness, "12 furlongs").unwrap_err();
        assert!(err.is_unsupported_unit());

        let err = parse_measurement::<ThicknessUnit>(Family::Thickness, "thin").unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnsupportedUnit {
                family: Family::Thickness,
                unit: "thin".to_string(),
            }
        );
    }

    #[test]
    fn test_negative_strings_still_split() {
        // The sign is kept so the conversion step can reject it.
        let m: Measurement<TearUnit> = parse_measurement(Family::Tear, "-3 cN").unwrap();
        assert_eq!(m.value, -3.0);
    }
}
