use crate::config::NormalizeConfig;
use crate::sheet::extra::normalize_extra_specs;
use crate::sheet::models::*;
use crate::sheet::validation::ValidationResult;
use crate::units::convert::{to_canonical, LinearUnit};
use crate::units::detector::parse_measurement;
use crate::units::error::{ensure_non_negative, ConversionError};
use crate::units::smoothness::SmoothnessReading;
use crate::units::types::{
    Family, Measurement, SmoothnessMethod, SmoothnessUnit, StiffnessUnit, TearUnit, TensileUnit,
    ThicknessUnit,
};
use std::str::FromStr;
use thiserror::Error;

/// Placeholder stored when a sheet names no mill or product.
pub const UNNAMED: &str = "-";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("no specifications found in sheet")]
    NoSpecs,

    /// At least one field failed; nothing from the sheet may be persisted.
    #[error("spec sheet rejected\n{0}")]
    Rejected(ValidationResult),
}

impl NormalizeError {
    pub fn report(&self) -> Option<&ValidationResult> {
        match self {
            NormalizeError::Rejected(report) => Some(report),
            NormalizeError::NoSpecs => None,
        }
    }
}

/// Turns raw extracted sheets into canonical records.
#[derive(Debug, Clone, Default)]
pub struct SheetNormalizer {
    options: NormalizeConfig,
}

impl SheetNormalizer {
    pub fn new(options: NormalizeConfig) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeConfig {
        &self.options
    }

    /// Normalizes every variant of the sheet. Returns the record and any
    /// warnings, or rejects the sheet as a whole if any field fails.
    pub fn normalize(
        &self,
        raw: &RawSpecSheet,
    ) -> Result<(CanonicalSheet, ValidationResult), NormalizeError> {
        if raw.specs.is_empty() {
            return Err(NormalizeError::NoSpecs);
        }

        let mut validation = ValidationResult::new();

        let category_hint = match raw.category_hint.as_deref().map(str::trim) {
            None | Some("") => CategoryHint::default(),
            Some(name) => CategoryHint::from_name(name).unwrap_or_else(|| {
                validation.add_warning(
                    format!("category '{}' not recognized, using Specialty", name),
                    Some("category_hint".to_string()),
                );
                CategoryHint::Specialty
            }),
        };

        let specs: Vec<CanonicalSpec> = raw
            .specs
            .iter()
            .enumerate()
            .filter_map(|(index, spec)| {
                self.normalize_spec(spec, &format!("specs[{}]", index), &mut validation)
            })
            .collect();

        if !validation.is_valid() {
            return Err(NormalizeError::Rejected(validation));
        }

        let sheet = CanonicalSheet {
            mill_name: name_or_placeholder(raw.mill_name.as_deref()),
            product_name: name_or_placeholder(raw.product_name.as_deref()),
            category_hint,
            specs,
            test_standards: raw
                .test_standards
                .iter()
                .flatten()
                .filter_map(|s| s.as_str().map(str::to_string))
                .collect(),
            notes: raw.notes.clone(),
        };

        log::debug!(
            "normalized {} variant(s) for {} / {}",
            sheet.specs.len(),
            sheet.mill_name,
            sheet.product_name
        );

        Ok((sheet, validation))
    }

    /// Normalizes one variant, recording every failing field under
    /// `location`. Returns `None` if any field failed.
    pub fn normalize_spec(
        &self,
        raw: &RawSpecVariant,
        location: &str,
        validation: &mut ValidationResult,
    ) -> Option<CanonicalSpec> {
        let errors_before = validation.errors.len();
        let mut field = FieldContext {
            location,
            validation: &mut *validation,
            zero_as_absent: self.options.zero_as_absent,
        };

        let gsm = field.gsm(raw.gsm);
        let caliper = field.linear::<ThicknessUnit>("caliper", raw.caliper.as_ref());
        let tensile_md = field.linear::<TensileUnit>("tensile_md", raw.tensile_md.as_ref());
        let tensile_cd = field.linear::<TensileUnit>("tensile_cd", raw.tensile_cd.as_ref());
        let tear_md = field.linear::<TearUnit>("tear_md", raw.tear_md.as_ref());
        let tear_cd = field.linear::<TearUnit>("tear_cd", raw.tear_cd.as_ref());
        let smoothness = field.smoothness(raw.smoothness.as_ref());
        let stiffness_md = field.linear::<StiffnessUnit>("stiffness_md", raw.stiffness_md.as_ref());
        let stiffness_cd = field.linear::<StiffnessUnit>("stiffness_cd", raw.stiffness_cd.as_ref());

        let brightness = field.scalar("brightness", raw.brightness, Bound::Percent);
        let whiteness = field.scalar("whiteness", raw.whiteness, Bound::Percent);
        let cobb_60 = field.scalar("cobb_60", raw.cobb_60, Bound::NonNegative);
        let density = field.scalar("density", raw.density, Bound::Positive);
        let opacity = field.scalar("opacity", raw.opacity, Bound::Percent);
        let moisture = field.scalar("moisture", raw.moisture, Bound::Percent);
        let roughness = field.scalar("roughness", raw.roughness, Bound::NonNegative);

        if validation.errors.len() > errors_before {
            return None;
        }

        Some(CanonicalSpec {
            gsm: gsm?,
            caliper,
            tensile_md,
            tensile_cd,
            tear_md,
            tear_cd,
            smoothness,
            stiffness_md,
            stiffness_cd,
            brightness,
            whiteness,
            cobb_60,
            density,
            opacity,
            moisture,
            roughness,
            extra_specs: normalize_extra_specs(&raw.extra_specs),
        })
    }
}

/// Normalizes with default options.
pub fn normalize_sheet(
    raw: &RawSpecSheet,
) -> Result<(CanonicalSheet, ValidationResult), NormalizeError> {
    SheetNormalizer::default().normalize(raw)
}

fn name_or_placeholder(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => UNNAMED.to_string(),
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    NonNegative,
    Positive,
    Percent,
}

struct FieldContext<'a> {
    location: &'a str,
    validation: &'a mut ValidationResult,
    zero_as_absent: bool,
}

impl FieldContext<'_> {
    fn path(&self, name: &str) -> String {
        format!("{}/{}", self.location, name)
    }

    fn gsm(&mut self, gsm: Option<f64>) -> Option<f64> {
        match gsm {
            Some(g) if g.is_finite() && g > 0.0 => Some(g),
            Some(g) => {
                let path = self.path("gsm");
                self.validation
                    .add_error(format!("GSM must be positive, got {}", g), Some(path));
                None
            }
            None => {
                let path = self.path("gsm");
                self.validation
                    .add_error("GSM is required".to_string(), Some(path));
                None
            }
        }
    }

    fn linear<U: LinearUnit>(&mut self, name: &str, raw: Option<&RawMeasurement>) -> Option<f64> {
        if let Some(RawMeasurement::Reading { value: None, unit }) = raw {
            self.warn_unit_without_value(name, unit.as_deref());
        }
        let result = resolve_measurement::<U>(U::FAMILY, raw)
            .and_then(|m| m.map(|m| to_canonical(m.value, m.unit)).transpose());
        match result {
            Ok(Some(v)) if v == 0.0 && self.zero_as_absent => None,
            Ok(value) => value,
            Err(e) => {
                let path = self.path(name);
                self.validation.add_conversion_error(e, path);
                None
            }
        }
    }

    fn smoothness(&mut self, raw: Option<&RawSmoothness>) -> Option<CanonicalSmoothness> {
        let (measurement, method) = match raw {
            None => (Ok(None), None),
            Some(RawSmoothness::Reading {
                value,
                unit,
                method,
            }) => {
                if value.is_none() {
                    self.warn_unit_without_value("smoothness", unit.as_deref());
                }
                (
                    resolve_reading::<SmoothnessUnit>(Family::Smoothness, *value, unit.as_deref()),
                    method.as_deref(),
                )
            }
            Some(RawSmoothness::Text(text)) => {
                (resolve_text::<SmoothnessUnit>(Family::Smoothness, text), None)
            }
        };

        let reading = measurement
            .and_then(|m| m.map(|m| SmoothnessReading::new(m.value, m.unit)).transpose())
            .and_then(|r| match r {
                Some(r) if r.value == 0.0 && self.zero_as_absent => Ok(None),
                Some(r) => CanonicalSmoothness::try_from(r).map(Some),
                None => Ok(None),
            });

        match reading {
            Ok(Some(smoothness)) => {
                if let Some(method) = method {
                    self.check_method(method, &smoothness.reading);
                }
                Some(smoothness)
            }
            Ok(None) => None,
            Err(e) => {
                let path = self.path("smoothness");
                self.validation.add_conversion_error(e, path);
                None
            }
        }
    }

    /// A unit with no value is kept as "no reading" but flagged, since the
    /// value may have been lost upstream.
    fn warn_unit_without_value(&mut self, name: &str, unit: Option<&str>) {
        let Some(unit) = unit.map(str::trim).filter(|u| !u.is_empty()) else {
            return;
        };
        let path = self.path(name);
        self.validation.add_warning(
            format!("{} has unit '{}' but no value", name, unit),
            Some(path),
        );
    }

    fn check_method(&mut self, claimed: &str, reading: &SmoothnessReading) {
        if claimed.trim().is_empty() {
            return;
        }
        let path = self.path("smoothness/method");
        match claimed.parse::<SmoothnessMethod>() {
            Ok(m) if m == reading.method => {}
            Ok(m) => self.validation.add_warning(
                format!(
                    "method {} does not match unit {}, using {}",
                    m, reading.unit, reading.method
                ),
                Some(path),
            ),
            Err(e) => self.validation.add_warning(
                format!("{}, using {}", e, reading.method),
                Some(path),
            ),
        }
    }

    fn scalar(&mut self, name: &str, value: Option<f64>, bound: Bound) -> Option<f64> {
        let v = value?;
        let problem = if !v.is_finite() {
            Some("must be a finite number")
        } else {
            match bound {
                Bound::NonNegative if v < 0.0 => Some("must be non-negative"),
                Bound::Positive if v <= 0.0 => Some("must be positive"),
                Bound::Percent if !(0.0..=100.0).contains(&v) => Some("must be between 0 and 100"),
                _ => None,
            }
        };
        match problem {
            Some(reason) => {
                let path = self.path(name);
                self.validation
                    .add_error(format!("{} {}, got {}", name, reason, v), Some(path));
                None
            }
            None => Some(v),
        }
    }
}

fn resolve_measurement<U>(
    family: Family,
    raw: Option<&RawMeasurement>,
) -> Result<Option<Measurement<U>>, ConversionError>
where
    U: FromStr<Err = ConversionError>,
{
    match raw {
        None => Ok(None),
        Some(RawMeasurement::Reading { value, unit }) => {
            resolve_reading(family, *value, unit.as_deref())
        }
        Some(RawMeasurement::Text(text)) => resolve_text(family, text),
    }
}

/// A null value means no reading. A value without a unit is rejected: no
/// unit is ever assumed. The value is checked before the unit.
fn resolve_reading<U>(
    family: Family,
    value: Option<f64>,
    unit: Option<&str>,
) -> Result<Option<Measurement<U>>, ConversionError>
where
    U: FromStr<Err = ConversionError>,
{
    let Some(value) = value else {
        return Ok(None);
    };
    ensure_non_negative(family, value)?;
    let unit = unit.unwrap_or_default().parse()?;
    Ok(Some(Measurement::new(value, unit)))
}

/// Blank and "-" mean no reading; anything else must read as "<number> <unit>".
fn resolve_text<U>(family: Family, text: &str) -> Result<Option<Measurement<U>>, ConversionError>
where
    U: FromStr<Err = ConversionError>,
{
    match text.trim() {
        "" | "-" => Ok(None),
        text => parse_measurement(family, text).map(Some),
    }
}
