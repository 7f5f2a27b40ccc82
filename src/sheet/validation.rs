use crate::units::error::ConversionError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub message: String,
    /// Field path such as `specs[0]/tensile_md`.
    pub location: Option<String>,
    /// Engine error behind the issue, when there is one.
    #[serde(skip)]
    pub cause: Option<ConversionError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: String, location: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: IssueSeverity::Error,
            message,
            location,
            cause: None,
        });
    }

    pub fn add_conversion_error(&mut self, error: ConversionError, location: String) {
        self.errors.push(ValidationIssue {
            severity: IssueSeverity::Error,
            message: error.to_string(),
            location: Some(location),
            cause: Some(error),
        });
    }

    pub fn add_warning(&mut self, message: String, location: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: IssueSeverity::Warning,
            message,
            location,
            cause: None,
        });
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// The error reported for `location`, if any.
    pub fn error_at(&self, location: &str) -> Option<&ValidationIssue> {
        self.errors
            .iter()
            .find(|e| e.location.as_deref() == Some(location))
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.errors.is_empty() {
            writeln!(f, "Errors:")?;
            for error in &self.errors {
                if let Some(loc) = &error.location {
                    writeln!(f, "  [{}] {}", loc, error.message)?;
                } else {
                    writeln!(f, "  {}", error.message)?;
                }
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for warning in &self.warnings {
                if let Some(loc) = &warning.location {
                    writeln!(f, "  [{}] {}", loc, warning.message)?;
                } else {
                    writeln!(f, "  {}", warning.message)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::types::Family;

    #[test]
    fn test_display_lists_errors_then_warnings() {
        let mut result = ValidationResult::new();
        result.add_warning("category 'Tissue' not recognized".to_string(), None);
        result.add_conversion_error(
            ConversionError::UnsupportedUnit {
                family: Family::Tear,
                unit: "oz".to_string(),
            },
            "specs[1]/tear_md".to_string(),
        );

        assert!(!result.is_valid());
        assert!(result.has_issues());
        assert_eq!(
            result.to_string(),
            "Errors:\n  [specs[1]/tear_md] unsupported tear unit 'oz'\nWarnings:\n  category 'Tissue' not recognized\n"
        );
        assert!(result
            .error_at("specs[1]/tear_md")
            .and_then(|e| e.cause.as_ref())
            .is_some_and(|c| c.is_unsupported_unit()));
    }

    #[test]
    fn test_empty_result_is_valid() {
        let result = ValidationResult::default();
        assert!(result.is_valid());
        assert!(!result.has_issues());
        assert_eq!(result.to_string(), "");
    }

    #[test]
    fn test_issues_serialize_with_severity() {
        let mut result = ValidationResult::new();
        result.add_conversion_error(
            ConversionError::UnsupportedUnit {
                family: Family::Tear,
                unit: "oz".to_string(),
            },
            "specs[0]/tear_md".to_string(),
        );
        result.add_warning("unit without value".to_string(), None);

        assert_eq!(
            serde_json::to_value(&result.errors[0]).unwrap(),
            serde_json::json!({
                "severity": "error",
                "message": "unsupported tear unit 'oz'",
                "location": "specs[0]/tear_md",
            })
        );
        assert_eq!(
            serde_json::to_value(&result.warnings[0]).unwrap()["severity"],
            "warning"
        );
    }
}
