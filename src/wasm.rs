// WebAssembly bindings for the dashboard's upload and review screens
use crate::config::{Config, NormalizeConfig};
use crate::sheet::{self, NormalizeError, SheetFormat, SheetNormalizer};
use crate::units::{self, Family, SmoothnessUnit};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct PaperSpecWasm {
    normalizer: SheetNormalizer,
}

impl Default for PaperSpecWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_family(family: &str) -> Result<Family, JsValue> {
    family
        .parse()
        .map_err(|e: units::types::UnknownFamily| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
impl PaperSpecWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            normalizer: SheetNormalizer::default(),
        }
    }

    /// Builds the bindings from `paperspec.toml` contents
    #[wasm_bindgen]
    pub fn with_config(config_content: &str) -> Result<PaperSpecWasm, JsValue> {
        let config = Config::load_from_str(config_content)
            .map_err(|e| JsValue::from_str(&format!("Failed to load config: {}", e)))?;
        Ok(Self {
            normalizer: SheetNormalizer::new(config.normalize),
        })
    }

    /// Canonical value of a measurement (smoothness is returned unchanged)
    #[wasm_bindgen]
    pub fn convert(&self, family: &str, value: f64, unit: &str) -> Result<f64, JsValue> {
        let family = parse_family(family)?;
        units::convert(family, value, unit).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn bekk_to_pps(&self, bekk_seconds: f64) -> Result<f64, JsValue> {
        units::bekk_to_pps(bekk_seconds).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn pps_to_bekk(&self, pps_micrometers: f64) -> Result<f64, JsValue> {
        units::pps_to_bekk(pps_micrometers).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// "Bekk", "Bendtsen" or "PPS" for a smoothness unit token
    #[wasm_bindgen]
    pub fn smoothness_method(&self, unit: &str) -> Result<String, JsValue> {
        let unit: SmoothnessUnit = unit
            .parse()
            .map_err(|e: units::ConversionError| JsValue::from_str(&e.to_string()))?;
        Ok(units::smoothness_method(unit).to_string())
    }

    /// Unit tokens accepted for a family, for the upload form's dropdowns
    #[wasm_bindgen]
    pub fn units_for(&self, family: &str) -> Result<js_sys::Array, JsValue> {
        let family = parse_family(family)?;
        Ok(family
            .unit_tokens()
            .into_iter()
            .map(JsValue::from_str)
            .collect())
    }

    #[wasm_bindgen]
    pub fn canonical_unit(&self, family: &str) -> Result<Option<String>, JsValue> {
        let family = parse_family(family)?;
        Ok(family.canonical_unit().map(str::to_string))
    }

    /// Normalize an extracted sheet (JSON string)
    /// Returns JSON string: {"sheet": ..., "issues": [...]}
    /// A rejected sheet is an error carrying the JSON issue list
    #[wasm_bindgen]
    pub fn normalize_sheet_json(&self, sheet_json: &str) -> Result<String, JsValue> {
        let raw = sheet::load_sheet_from_str(sheet_json, SheetFormat::Json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse sheet: {}", e)))?;

        let (canonical, validation) = match self.normalizer.normalize(&raw) {
            Ok(result) => result,
            Err(NormalizeError::Rejected(report)) => {
                let issues = serde_json::to_string(&report.errors).map_err(|e| {
                    JsValue::from_str(&format!("Failed to serialize issues: {}", e))
                })?;
                return Err(JsValue::from_str(&issues));
            }
            Err(e) => return Err(JsValue::from_str(&e.to_string())),
        };

        let result = serde_json::json!({
            "sheet": canonical,
            "issues": validation.warnings,
        });

        serde_json::to_string(&result)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize sheet: {}", e)))
    }

    /// Current normalization options as JSON
    #[wasm_bindgen]
    pub fn options_json(&self) -> Result<String, JsValue> {
        let options: &NormalizeConfig = self.normalizer.options();
        serde_json::to_string(options)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize options: {}", e)))
    }
}
