use crate::units::error::ConversionError;
use crate::units::smoothness::SmoothnessReading;
use crate::units::types::{Measurement, SmoothnessUnit};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A `{value, unit}` pair as handed over by the extractor or a form. Either
/// half may be null; some extractors also send a plain "64 gf" string.
/// Objects with any other key fail to load.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum RawMeasurement {
    Reading {
        #[serde(default)]
        value: Option<f64>,
        #[serde(default)]
        unit: Option<String>,
    },
    Text(String),
}

impl RawMeasurement {
    pub fn reading(value: f64, unit: &str) -> Self {
        RawMeasurement::Reading {
            value: Some(value),
            unit: Some(unit.to_string()),
        }
    }
}

/// Smoothness additionally names the instrument, which is advisory: the
/// unit decides the method.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum RawSmoothness {
    Reading {
        #[serde(default)]
        value: Option<f64>,
        #[serde(default)]
        unit: Option<String>,
        #[serde(default)]
        method: Option<String>,
    },
    Text(String),
}

/// One GSM variant of a product, straight from the extractor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawSpecVariant {
    #[serde(default)]
    pub gsm: Option<f64>,
    #[serde(default)]
    pub caliper: Option<RawMeasurement>,
    #[serde(default)]
    pub tensile_md: Option<RawMeasurement>,
    #[serde(default)]
    pub tensile_cd: Option<RawMeasurement>,
    #[serde(default)]
    pub tear_md: Option<RawMeasurement>,
    #[serde(default)]
    pub tear_cd: Option<RawMeasurement>,
    #[serde(default)]
    pub smoothness: Option<RawSmoothness>,
    #[serde(default)]
    pub stiffness_md: Option<RawMeasurement>,
    #[serde(default)]
    pub stiffness_cd: Option<RawMeasurement>,

    // Unitless properties
    #[serde(default)]
    pub brightness: Option<f64>,
    #[serde(default)]
    pub whiteness: Option<f64>,
    #[serde(default)]
    pub cobb_60: Option<f64>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub moisture: Option<f64>,
    #[serde(default)]
    pub roughness: Option<f64>,

    #[serde(default)]
    pub extra_specs: Map<String, Value>,
}

/// A whole extracted technical data sheet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawSpecSheet {
    #[serde(default)]
    pub mill_name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub category_hint: Option<String>,
    #[serde(default)]
    pub specs: Vec<RawSpecVariant>,
    #[serde(default)]
    pub test_standards: Option<Vec<Value>>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CategoryHint {
    Kraft,
    Liner,
    Medium,
    #[serde(rename = "UWF")]
    Uwf,
    Board,
    #[default]
    Specialty,
}

impl CategoryHint {
    pub const ALL: [CategoryHint; 6] = [
        CategoryHint::Kraft,
        CategoryHint::Liner,
        CategoryHint::Medium,
        CategoryHint::Uwf,
        CategoryHint::Board,
        CategoryHint::Specialty,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CategoryHint::Kraft => "Kraft",
            CategoryHint::Liner => "Liner",
            CategoryHint::Medium => "Medium",
            CategoryHint::Uwf => "UWF",
            CategoryHint::Board => "Board",
            CategoryHint::Specialty => "Specialty",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CategoryHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Smoothness as persisted: the reading in its own unit plus, where a
/// relation exists, the equivalent on the other instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSmoothness {
    #[serde(flatten)]
    pub reading: SmoothnessReading,
    pub equivalent: Option<Measurement<SmoothnessUnit>>,
}

impl TryFrom<SmoothnessReading> for CanonicalSmoothness {
    type Error = ConversionError;

    fn try_from(reading: SmoothnessReading) -> Result<Self, Self::Error> {
        Ok(Self {
            equivalent: reading.try_equivalent()?,
            reading,
        })
    }
}

/// One GSM variant with every measurement in its canonical unit:
/// caliper µm, tensile kN/m, tear mN, stiffness mN·m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSpec {
    pub gsm: f64,
    pub caliper: Option<f64>,
    pub tensile_md: Option<f64>,
    pub tensile_cd: Option<f64>,
    pub tear_md: Option<f64>,
    pub tear_cd: Option<f64>,
    pub smoothness: Option<CanonicalSmoothness>,
    pub stiffness_md: Option<f64>,
    pub stiffness_cd: Option<f64>,
    pub brightness: Option<f64>,
    pub whiteness: Option<f64>,
    pub cobb_60: Option<f64>,
    pub density: Option<f64>,
    pub opacity: Option<f64>,
    pub moisture: Option<f64>,
    pub roughness: Option<f64>,
    pub extra_specs: Map<String, Value>,
}

/// The record handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSheet {
    pub mill_name: String,
    pub product_name: String,
    pub category_hint: CategoryHint,
    pub specs: Vec<CanonicalSpec>,
    pub test_standards: Vec<String>,
    pub notes: Option<String>,
}
