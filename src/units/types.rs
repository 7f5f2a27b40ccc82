use crate::units::error::ConversionError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Measurement families handled by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    #[serde(alias = "caliper")]
    Thickness,
    Tensile,
    Tear,
    Stiffness,
    Smoothness,
}

impl Family {
    pub const ALL: [Family; 5] = [
        Family::Thickness,
        Family::Tensile,
        Family::Tear,
        Family::Stiffness,
        Family::Smoothness,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Family::Thickness => "thickness",
            Family::Tensile => "tensile",
            Family::Tear => "tear",
            Family::Stiffness => "stiffness",
            Family::Smoothness => "smoothness",
        }
    }

    /// The unit every reading of this family is stored in. Smoothness has
    /// none: its unit travels with the value.
    pub const fn canonical_unit(self) -> Option<&'static str> {
        match self {
            Family::Thickness => Some(ThicknessUnit::Micrometer.token()),
            Family::Tensile => Some(TensileUnit::KilonewtonPerMeter.token()),
            Family::Tear => Some(TearUnit::Millinewton.token()),
            Family::Stiffness => Some(StiffnessUnit::MillinewtonMeter.token()),
            Family::Smoothness => None,
        }
    }

    /// Accepted unit tokens, canonical spelling only.
    pub fn unit_tokens(self) -> Vec<&'static str> {
        match self {
            Family::Thickness => ThicknessUnit::ALL.iter().map(|u| u.token()).collect(),
            Family::Tensile => TensileUnit::ALL.iter().map(|u| u.token()).collect(),
            Family::Tear => TearUnit::ALL.iter().map(|u| u.token()).collect(),
            Family::Stiffness => StiffnessUnit::ALL.iter().map(|u| u.token()).collect(),
            Family::Smoothness => SmoothnessUnit::ALL.iter().map(|u| u.token()).collect(),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown measurement family '{0}'")]
pub struct UnknownFamily(pub String);

impl FromStr for Family {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thickness" | "caliper" => Ok(Family::Thickness),
            "tensile" => Ok(Family::Tensile),
            "tear" => Ok(Family::Tear),
            "stiffness" => Ok(Family::Stiffness),
            "smoothness" => Ok(Family::Smoothness),
            _ => Err(UnknownFamily(s.to_string())),
        }
    }
}

/// Declares a closed unit vocabulary: the enum, its canonical token per
/// variant, extra spellings of the same symbol, and token-based serde.
macro_rules! unit_enum {
    (
        $(#[$meta:meta])*
        $name:ident in $family:path {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn token(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $name {
            type Err = ConversionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $token $(| $alias)* => Ok($name::$variant), )+
                    other => Err(ConversionError::UnsupportedUnit {
                        family: $family,
                        unit: other.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.token())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let token = String::deserialize(deserializer)?;
                token.parse().map_err(de::Error::custom)
            }
        }
    };
}

unit_enum! {
    /// Caliper units. Canonical: micrometers.
    ThicknessUnit in Family::Thickness {
        Micrometer => "µm" | "μm",
        Millimeter => "mm",
        /// Thousandths of an inch.
        Mil => "mil",
        Inch => "inch",
    }
}

unit_enum! {
    /// Tensile strength units. Canonical: kilonewtons per meter of width.
    TensileUnit in Family::Tensile {
        KilonewtonPerMeter => "kN/m",
        /// Kilogram-force on a 15 mm wide strip.
        KilogramForcePer15mm => "kgf/15mm",
        /// Newtons on a 15 mm wide strip.
        NewtonPer15mm => "N/15mm",
        PoundForcePerInch => "lb/in",
    }
}

unit_enum! {
    /// Tear strength units. Canonical: millinewtons.
    TearUnit in Family::Tear {
        Millinewton => "mN",
        GramForce => "gf",
        Centinewton => "cN",
    }
}

unit_enum! {
    /// Bending stiffness units. Canonical: millinewton-meters.
    StiffnessUnit in Family::Stiffness {
        MillinewtonMeter => "mN·m" | "mN.m" | "mN⋅m",
        GramForceCentimeter => "gf·cm" | "gf.cm" | "gf⋅cm",
        MillinewtonMillimeter => "mN·mm" | "mN.mm" | "mN⋅mm",
    }
}

unit_enum! {
    /// Smoothness units, one per instrument. There is no canonical unit.
    SmoothnessUnit in Family::Smoothness {
        /// Bekk seconds.
        Seconds => "sec",
        /// Bendtsen air flow.
        MillilitersPerMinute => "ml/min",
        /// Parker Print-Surf roughness.
        Micrometers => "µm" | "μm",
    }
}

/// Smoothness instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SmoothnessMethod {
    Bekk,
    Bendtsen,
    #[serde(rename = "PPS")]
    Pps,
}

impl SmoothnessMethod {
    pub const fn name(self) -> &'static str {
        match self {
            SmoothnessMethod::Bekk => "Bekk",
            SmoothnessMethod::Bendtsen => "Bendtsen",
            SmoothnessMethod::Pps => "PPS",
        }
    }
}

impl fmt::Display for SmoothnessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown smoothness method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for SmoothnessMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [
            SmoothnessMethod::Bekk,
            SmoothnessMethod::Bendtsen,
            SmoothnessMethod::Pps,
        ]
        .into_iter()
        .find(|m| m.name().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// A value paired with the unit it was read in.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Measurement<U> {
    pub value: f64,
    pub unit: U,
}

impl<U> Measurement<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }
}

impl<U: fmt::Display> fmt::Display for Measurement<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokens_parse_back() {
        for unit in TensileUnit::ALL {
            assert_eq!(unit.token().parse::<TensileUnit>().unwrap(), *unit);
        }
        for unit in StiffnessUnit::ALL {
            assert_eq!(unit.token().parse::<StiffnessUnit>().unwrap(), *unit);
        }
    }

    #[test]
    fn test_equivalent_symbol_spellings() {
        assert_eq!("μm".parse::<ThicknessUnit>().unwrap(), ThicknessUnit::Micrometer);
        assert_eq!(" mm ".parse::<ThicknessUnit>().unwrap(), ThicknessUnit::Millimeter);
        assert_eq!(
            "gf.cm".parse::<StiffnessUnit>().unwrap(),
            StiffnessUnit::GramForceCentimeter
        );
    }

    #[test]
    fn test_unknown_token_is_unsupported_unit() {
        let err = "not-a-real-unit".parse::<TearUnit>().unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnsupportedUnit {
                family: Family::Tear,
                unit: "not-a-real-unit".to_string(),
            }
        );
        // Case matters: "MM" is not a thickness unit.
        assert!("MM".parse::<ThicknessUnit>().is_err());
    }

    #[test]
    fn test_units_serialize_as_tokens() {
        let m = Measurement::new(12.5, TensileUnit::NewtonPer15mm);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"value":12.5,"unit":"N/15mm"}"#);

        let back: Measurement<TensileUnit> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        let bad: Result<Measurement<TensileUnit>, _> =
            serde_json::from_str(r#"{"value":1,"unit":"psi"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_family_names() {
        assert_eq!("caliper".parse::<Family>().unwrap(), Family::Thickness);
        assert_eq!("Tensile".parse::<Family>().unwrap(), Family::Tensile);
        assert!("weight".parse::<Family>().is_err());
        assert_eq!(Family::Stiffness.canonical_unit(), Some("mN·m"));
        assert_eq!(Family::Smoothness.canonical_unit(), None);
        assert_eq!(Family::Tear.unit_tokens(), vec!["mN", "gf", "cN"]);
    }

    #[test]
    fn test_method_names() {
        assert_eq!("pps".parse::<SmoothnessMethod>().unwrap(), SmoothnessMethod::Pps);
        assert_eq!(SmoothnessMethod::Pps.to_string(), "PPS");
        assert_eq!(
            serde_json::to_string(&SmoothnessMethod::Pps).unwrap(),
            r#""PPS""#
        );
        assert!("Sheffield".parse::<SmoothnessMethod>().is_err());
    }
}
