use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::config::{ConfigSchema, PropertySchema};

crate::literal_enum! {
    pub enum ErrorSeverity {
        Low = "low",
        Medium = "medium",
        High = "high",
        Critical = "critical",
    }
}

crate::literal_enum! {
    pub enum ValidationErrorCode {
        RequiredPropertyMissing = "REQUIRED_PROPERTY_MISSING",
        TypeMismatch = "TYPE_MISMATCH",
        ValueTooSmall = "VALUE_TOO_SMALL",
        ValueTooLarge = "VALUE_TOO_LARGE",
        StringTooShort = "STRING_TOO_SHORT",
        StringTooLong = "STRING_TOO_LONG",
        PatternMismatch = "PATTERN_MISMATCH",
        EnumMismatch = "ENUM_MISMATCH",
        CustomValidationFailed = "CUSTOM_VALIDATION_FAILED",
        InvalidSchema = "INVALID_SCHEMA",
    }
}

impl ValidationErrorCode {
    pub fn default_severity(self) -> ErrorSeverity {
        match self {
            Self::RequiredPropertyMissing | Self::TypeMismatch => ErrorSeverity::High,
            Self::InvalidSchema => ErrorSeverity::Critical,
            _ => ErrorSeverity::Medium,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: String,
    pub message: String,
    pub path: String,
    pub value: Option<Value>,
    pub expected: Option<Value>,
    pub severity: ErrorSeverity,
}

impl ValidationError {
    pub fn new(
        code: ValidationErrorCode,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.as_str().to_string(),
            message: message.into(),
            path: path.into(),
            value: None,
            expected: None,
            severity: code.default_severity(),
        }
    }

    pub fn with_code(
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
        severity: ErrorSeverity,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: path.into(),
            value: None,
            expected: None,
            severity,
        }
    }

    pub fn value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn expected(mut self, expected: Value) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn is(&self, code: ValidationErrorCode) -> bool {
        self.code == code.as_str()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "{} at {}: {}", self.code, self.path, self.message)
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub code: String,
    pub message: String,
    pub path: String,
    pub value: Option<Value>,
    pub suggestion: Option<Value>,
}

impl ValidationWarning {
    pub fn new(code: impl Into<String>, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: path.into(),
            value: None,
            suggestion: None,
        }
    }

    pub fn suggestion(mut self, suggestion: Value) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub data: Option<Value>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    pub fn failed(error: ValidationError) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            ..Self::default()
        }
    }

    pub fn push_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    pub fn push_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_error(&self, code: ValidationErrorCode) -> bool {
        self.errors.iter().any(|error| error.is(code))
    }

    pub fn errors_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |error| error.path == path)
    }

    pub fn max_severity(&self) -> Option<ErrorSeverity> {
        self.errors
            .iter()
            .map(|error| error.severity)
            .max_by_key(|severity| match severity {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 1,
                ErrorSeverity::High => 2,
                ErrorSeverity::Critical => 3,
            })
    }
}

/// Custom check for a single property value.
pub trait Validator: Send + Sync {
    fn validate(&self, value: &Value, schema: &PropertySchema) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn(&Value, &PropertySchema) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &Value, schema: &PropertySchema) -> ValidationResult {
        self(value, schema)
    }
}

#[skip_serializing_none]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOptions {
    pub stop_on_first_error: Option<bool>,
    pub include_warnings: Option<bool>,
    pub validate_additional_properties: Option<bool>,
    pub strict: Option<bool>,
}

impl ValidationOptions {
    pub fn stops_on_first_error(&self) -> bool {
        self.stop_on_first_error.unwrap_or(false)
    }

    pub fn includes_warnings(&self) -> bool {
        self.include_warnings.unwrap_or(true)
    }

    pub fn checks_additional_properties(&self) -> bool {
        self.validate_additional_properties.unwrap_or(true)
    }

    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationContext {
    pub schema: ConfigSchema,
    pub options: ValidationOptions,
    pub path: Vec<String>,
    pub metadata: Option<BTreeMap<String, Value>>,
}

impl ValidationContext {
    pub fn new(schema: ConfigSchema, options: ValidationOptions) -> Self {
        Self {
            schema,
            options,
            path: Vec::new(),
            metadata: None,
        }
    }

    /// Dotted rendering of the current path; index segments attach without a
    /// dot (`hosts[2].port`).
    pub fn path_string(&self) -> String {
        join_path(&self.path)
    }
}

pub(crate) fn join_path(segments: &[String]) -> String {
    let mut joined = String::new();
    for segment in segments {
        if !joined.is_empty() && !segment.starts_with('[') {
            joined.push('.');
        }
        joined.push_str(segment);
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merging_invalid_results_marks_invalid() {
        let mut result = ValidationResult::ok();
        result.merge(ValidationResult::failed(ValidationError::new(
            ValidationErrorCode::TypeMismatch,
            "port",
            "expected number",
        )));

        assert!(!result.valid);
        assert!(result.has_error(ValidationErrorCode::TypeMismatch));
        assert_eq!(result.errors_at("port").count(), 1);
        assert_eq!(result.max_severity(), Some(ErrorSeverity::High));
    }

    #[test]
    fn paths_join_indexes_without_dots() {
        let segments = vec![
            "hosts".to_string(),
            "[2]".to_string(),
            "port".to_string(),
        ];
        assert_eq!(join_path(&segments), "hosts[2].port");
    }

    #[test]
    fn errors_render_code_path_and_message() {
        let error = ValidationError::new(ValidationErrorCode::ValueTooLarge, "pool.max", "too big");
        assert_eq!(error.to_string(), "VALUE_TOO_LARGE at pool.max: too big");
        assert_eq!(error.severity, ErrorSeverity::Medium);
    }
}
