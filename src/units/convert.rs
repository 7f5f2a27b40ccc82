//! Linear conversions to the canonical unit of each family.
//!
//! Every factor is a fixed positive constant and conversion is a single
//! multiplication, so zero maps to zero and nothing is rounded.

use crate::units::error::{ensure_in_range, ensure_non_negative, ConversionError};
use crate::units::types::{
    Family, SmoothnessUnit, StiffnessUnit, TearUnit, TensileUnit, ThicknessUnit,
};
use std::str::FromStr;

/// Standard gravity in m/s², used for gram-force and kilogram-force.
pub const STANDARD_GRAVITY: f64 = 9.80665;
/// Width of the test strip behind the "per 15mm" tensile units, in meters.
pub const STRIP_WIDTH_M: f64 = 0.015;
/// One pound-force in newtons.
pub const POUND_FORCE_N: f64 = 4.44822;
/// One inch in meters.
pub const INCH_M: f64 = 0.0254;

const MICRON_PER_MM: f64 = 1000.0;
const MICRON_PER_MIL: f64 = 25.4;
const MICRON_PER_INCH: f64 = 25400.0;

const KN_M_PER_N_15MM: f64 = 1.0 / STRIP_WIDTH_M / 1000.0;
const KN_M_PER_KGF_15MM: f64 = STANDARD_GRAVITY / STRIP_WIDTH_M / 1000.0;
const KN_M_PER_LB_IN: f64 = POUND_FORCE_N / INCH_M / 1000.0;

const MN_PER_GF: f64 = STANDARD_GRAVITY;
const MN_PER_CN: f64 = 10.0;

// Industry tables round gf·cm to two significant figures of g.
const MN_M_PER_GF_CM: f64 = 0.0981;
const MN_M_PER_MN_MM: f64 = 0.001;

/// A unit whose family converts to its canonical unit by a constant factor.
pub trait LinearUnit: Copy + FromStr<Err = ConversionError> {
    const FAMILY: Family;
    const CANONICAL: Self;

    /// Multiplier from this unit to the canonical unit.
    fn factor(self) -> f64;
}

impl LinearUnit for ThicknessUnit {
    const FAMILY: Family = Family::Thickness;
    const CANONICAL: Self = ThicknessUnit::Micrometer;

    fn factor(self) -> f64 {
        match self {
            ThicknessUnit::Micrometer => 1.0,
            ThicknessUnit::Millimeter => MICRON_PER_MM,
            ThicknessUnit::Mil => MICRON_PER_MIL,
            ThicknessUnit::Inch => MICRON_PER_INCH,
        }
    }
}

impl LinearUnit for TensileUnit {
    const FAMILY: Family = Family::Tensile;
    const CANONICAL: Self = TensileUnit::KilonewtonPerMeter;

    fn factor(self) -> f64 {
        match self {
            TensileUnit::KilonewtonPerMeter => 1.0,
            TensileUnit::NewtonPer15mm => KN_M_PER_N_15MM,
            TensileUnit::KilogramForcePer15mm => KN_M_PER_KGF_15MM,
            TensileUnit::PoundForcePerInch => KN_M_PER_LB_IN,
        }
    }
}

impl LinearUnit for TearUnit {
    const FAMILY: Family = Family::Tear;
    const CANONICAL: Self = TearUnit::Millinewton;

    fn factor(self) -> f64 {
        match self {
            TearUnit::Millinewton => 1.0,
            TearUnit::GramForce => MN_PER_GF,
            TearUnit::Centinewton => MN_PER_CN,
        }
    }
}

impl LinearUnit for StiffnessUnit {
    const FAMILY: Family = Family::Stiffness;
    const CANONICAL: Self = StiffnessUnit::MillinewtonMeter;

    fn factor(self) -> f64 {
        match self {
            StiffnessUnit::MillinewtonMeter => 1.0,
            StiffnessUnit::GramForceCentimeter => MN_M_PER_GF_CM,
            StiffnessUnit::MillinewtonMillimeter => MN_M_PER_MN_MM,
        }
    }
}

/// Converts `value` in `unit` to the family's canonical unit.
pub fn to_canonical<U: LinearUnit>(value: f64, unit: U) -> Result<f64, ConversionError> {
    ensure_non_negative(U::FAMILY, value)?;
    ensure_in_range(U::FAMILY, value, value * unit.factor())
}

/// Parses `token` as a unit of `U`'s family, then converts.
pub fn token_to_canonical<U: LinearUnit>(value: f64, token: &str) -> Result<f64, ConversionError> {
    ensure_non_negative(U::FAMILY, value)?;
    let unit: U = token.parse()?;
    to_canonical(value, unit)
}

/// Thickness (caliper) to micrometers.
pub fn convert_thickness(value: f64, unit: ThicknessUnit) -> Result<f64, ConversionError> {
    to_canonical(value, unit)
}

/// Tensile strength to kN/m.
pub fn convert_tensile(value: f64, unit: TensileUnit) -> Result<f64, ConversionError> {
    to_canonical(value, unit)
}

/// Tear strength to mN.
pub fn convert_tear(value: f64, unit: TearUnit) -> Result<f64, ConversionError> {
    to_canonical(value, unit)
}

/// Bending stiffness to mN·m.
pub fn convert_stiffness(value: f64, unit: StiffnessUnit) -> Result<f64, ConversionError> {
    to_canonical(value, unit)
}

/// String-token entry point for callers holding raw `(value, unit)` pairs.
///
/// Smoothness has no canonical unit; the token is still checked against the
/// smoothness vocabulary and the value comes back unchanged.
pub fn convert(family: Family, value: f64, token: &str) -> Result<f64, ConversionError> {
    match family {
        Family::Thickness => token_to_canonical::<ThicknessUnit>(value, token),
        Family::Tensile => token_to_canonical::<TensileUnit>(value, token),
        Family::Tear => token_to_canonical::<TearUnit>(value, token),
        Family::Stiffness => token_to_canonical::<StiffnessUnit>(value, token),
        Family::Smoothness => {
            ensure_non_negative(family, value)?;
            token.parse::<SmoothnessUnit>()?;
            Ok(value)
        }
    }
}
