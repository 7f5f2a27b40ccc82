//! The free-form `extra_specs` bag stored next to the canonical columns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A key/value row as typed into the extra-specs form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtraSpecEntry {
    pub key: String,
    pub value: String,
}

/// Numeric-looking text becomes a JSON number; anything else stays text.
pub fn parse_numeric_value(value: &str) -> Value {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Value::String(value.to_string());
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(|n| match n.as_f64() {
            // Keep integers integral so "42" round-trips as 42, not 42.0.
            Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Value::from(f as i64),
            _ => Value::Number(n),
        })
        .unwrap_or_else(|| Value::String(value.to_string()))
}

/// Builds the bag from form rows. Keys are trimmed; blank keys are dropped
/// and a repeated key keeps the last value.
pub fn extra_specs_from_entries(entries: &[ExtraSpecEntry]) -> Map<String, Value> {
    entries
        .iter()
        .filter_map(|entry| {
            let key = entry.key.trim();
            (!key.is_empty()).then(|| (key.to_string(), parse_numeric_value(&entry.value)))
        })
        .collect()
}

/// Applies the same rules to a bag that arrived as JSON: string values are
/// re-read as numbers where possible, other values are left alone.
pub fn normalize_extra_specs(extra: &Map<String, Value>) -> Map<String, Value> {
    extra
        .iter()
        .filter_map(|(key, value)| {
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = match value {
                Value::String(s) => parse_numeric_value(s),
                other => other.clone(),
            };
            Some((key.to_string(), value))
        })
        .collect()
}
