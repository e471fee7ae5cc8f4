use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value, json};

use crate::config::validation::join_path;
use crate::config::{
    ConfigSchema, ErrorSeverity, PropertySchema, PropertyType, ValidationContext,
    ValidationError, ValidationErrorCode, ValidationOptions, ValidationResult, ValidationRules,
    ValidationWarning, Validator,
};

pub const ADDITIONAL_PROPERTY: &str = "ADDITIONAL_PROPERTY";
pub const PROPERTY_DEFAULTED: &str = "PROPERTY_DEFAULTED";

/// Checks JSON values against a [`ConfigSchema`].
#[derive(Clone, Default)]
pub struct SchemaValidator {
    options: ValidationOptions,
    custom: BTreeMap<String, Arc<dyn Validator>>,
}

impl SchemaValidator {
    pub fn new(options: ValidationOptions) -> Self {
        Self {
            options,
            custom: BTreeMap::new(),
        }
    }

    /// Registers a validator for the property at `path` (dotted, e.g.
    /// `database.port`).
    pub fn with_validator(
        mut self,
        path: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Self {
        self.custom.insert(path.into(), Arc::new(validator));
        self
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    pub fn validate(&self, schema: &ConfigSchema, value: &Value) -> ValidationResult {
        let mut context = ValidationContext::new(schema.clone(), self.options);
        let mut result = ValidationResult::ok();

        match value.as_object() {
            Some(object) => {
                let _ = self.check_object(&mut context, schema, object, &mut result);
            }
            None => {
                let _ = self.report(
                    &mut result,
                    ValidationError::new(
                        ValidationErrorCode::TypeMismatch,
                        "",
                        format!("expected object, found {}", PropertyType::of(value)),
                    )
                    .value(value.clone())
                    .expected(json!(PropertyType::Object.as_str())),
                );
            }
        }

        if !self.options.includes_warnings() {
            result.warnings.clear();
        }
        if result.valid {
            result.data = Some(value.clone());
        }

        tracing::debug!(
            schema = %schema.name,
            version = %schema.version,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated value against schema"
        );
        result
    }

    fn report(&self, result: &mut ValidationResult, error: ValidationError) -> ControlFlow<()> {
        result.push_error(error);
        if self.options.stops_on_first_error() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn check_object(
        &self,
        context: &mut ValidationContext,
        schema: &ConfigSchema,
        object: &Map<String, Value>,
        result: &mut ValidationResult,
    ) -> ControlFlow<()> {
        for (name, property) in &schema.properties {
            context.path.push(name.clone());
            let path = context.path_string();
            match object.get(name) {
                None if schema.requires(name) => {
                    self.report(
                        result,
                        ValidationError::new(
                            ValidationErrorCode::RequiredPropertyMissing,
                            path,
                            format!("required property '{name}' is missing"),
                        )
                        .expected(json!(property.property_type.as_str())),
                    )?;
                }
                None => {
                    if let Some(default) = &property.default {
                        result.push_warning(
                            ValidationWarning::new(
                                PROPERTY_DEFAULTED,
                                path,
                                format!("property '{name}' is absent; default applies"),
                            )
                            .suggestion(default.clone()),
                        );
                    }
                }
                Some(value) => self.check_property(context, property, value, result)?,
            }
            context.path.pop();
        }

        for name in schema.required.iter().flatten() {
            if schema.properties.contains_key(name) || object.contains_key(name) {
                continue;
            }
            let path = join_path(&[context.path.clone(), vec![name.clone()]].concat());
            self.report(
                result,
                ValidationError::new(
                    ValidationErrorCode::RequiredPropertyMissing,
                    path,
                    format!("required property '{name}' is missing"),
                ),
            )?;
        }

        if schema.additional_properties == Some(false)
            && self.options.checks_additional_properties()
        {
            for (key, value) in object {
                if schema.properties.contains_key(key) {
                    continue;
                }
                let path = join_path(&[context.path.clone(), vec![key.clone()]].concat());
                let message = format!("property '{key}' is not declared by schema");
                if self.options.is_strict() {
                    self.report(
                        result,
                        ValidationError::with_code(
                            ADDITIONAL_PROPERTY,
                            path,
                            message,
                            ErrorSeverity::Medium,
                        )
                        .value(value.clone()),
                    )?;
                } else {
                    let mut warning = ValidationWarning::new(ADDITIONAL_PROPERTY, path, message);
                    warning.value = Some(value.clone());
                    result.push_warning(warning);
                }
            }
        }

        ControlFlow::Continue(())
    }

    fn check_property(
        &self,
        context: &mut ValidationContext,
        property: &PropertySchema,
        value: &Value,
        result: &mut ValidationResult,
    ) -> ControlFlow<()> {
        let path = context.path_string();
        tracing::trace!(path = %path, expected = %property.property_type, "checking property");

        if !property.property_type.matches(value) {
            return self.report(
                result,
                ValidationError::new(
                    ValidationErrorCode::TypeMismatch,
                    path,
                    format!(
                        "expected {}, found {}",
                        property.property_type,
                        PropertyType::of(value)
                    ),
                )
                .value(value.clone())
                .expected(json!(property.property_type.as_str())),
            );
        }

        if let Some(rules) = &property.validation {
            self.check_rules(&path, rules, value, result)?;
        }

        match (property.property_type, value) {
            (PropertyType::Object, Value::Object(object)) => {
                if let Some(nested) = &property.schema {
                    self.check_object(context, nested, object, result)?;
                }
            }
            (PropertyType::Array, Value::Array(entries)) => {
                if let Some(items) = &property.items {
                    for (index, entry) in entries.iter().enumerate() {
                        context.path.push(format!("[{index}]"));
                        self.check_property(context, items, entry, result)?;
                        context.path.pop();
                    }
                }
            }
            _ => {}
        }

        if let Some(custom) = self.custom.get(&path) {
            let outcome = custom.validate(value, property);
            if !outcome.valid && outcome.errors.is_empty() {
                self.report(
                    result,
                    ValidationError::new(
                        ValidationErrorCode::CustomValidationFailed,
                        path.clone(),
                        "custom validation failed",
                    )
                    .value(value.clone()),
                )?;
            }
            for error in outcome.errors {
                self.report(result, error)?;
            }
            for warning in outcome.warnings {
                result.push_warning(warning);
            }
        }

        ControlFlow::Continue(())
    }

    fn check_rules(
        &self,
        path: &str,
        rules: &ValidationRules,
        value: &Value,
        result: &mut ValidationResult,
    ) -> ControlFlow<()> {
        if let Some(number) = value.as_f64() {
            if let Some(min) = rules.min.filter(|min| number < *min) {
                self.report(
                    result,
                    ValidationError::new(
                        ValidationErrorCode::ValueTooSmall,
                        path,
                        format!("{number} is less than minimum {min}"),
                    )
                    .value(value.clone())
                    .expected(json!(min)),
                )?;
            }
            if let Some(max) = rules.max.filter(|max| number > *max) {
                self.report(
                    result,
                    ValidationError::new(
                        ValidationErrorCode::ValueTooLarge,
                        path,
                        format!("{number} is greater than maximum {max}"),
                    )
                    .value(value.clone())
                    .expected(json!(max)),
                )?;
            }
        }

        if let Some(text) = value.as_str() {
            let length = text.chars().count();
            if let Some(min) = rules.min_length.filter(|min| length < *min) {
                self.report(
                    result,
                    ValidationError::new(
                        ValidationErrorCode::StringTooShort,
                        path,
                        format!("length {length} is shorter than {min}"),
                    )
                    .value(value.clone())
                    .expected(json!(min)),
                )?;
            }
            if let Some(max) = rules.max_length.filter(|max| length > *max) {
                self.report(
                    result,
                    ValidationError::new(
                        ValidationErrorCode::StringTooLong,
                        path,
                        format!("length {length} is longer than {max}"),
                    )
                    .value(value.clone())
                    .expected(json!(max)),
                )?;
            }
            if let Some(pattern) = &rules.pattern {
                match Regex::new(pattern) {
                    Ok(regex) if !regex.is_match(text) => {
                        self.report(
                            result,
                            ValidationError::new(
                                ValidationErrorCode::PatternMismatch,
                                path,
                                format!("'{text}' does not match /{pattern}/"),
                            )
                            .value(value.clone())
                            .expected(json!(pattern)),
                        )?;
                    }
                    Ok(_) => {}
                    Err(error) => {
                        self.report(
                            result,
                            ValidationError::new(
                                ValidationErrorCode::InvalidSchema,
                                path,
                                format!("invalid pattern /{pattern}/: {error}"),
                            ),
                        )?;
                    }
                }
            }
        }

        if let Some(allowed) = rules.allowed.as_ref().filter(|allowed| !allowed.contains(value)) {
            self.report(
                result,
                ValidationError::new(
                    ValidationErrorCode::EnumMismatch,
                    path,
                    "value is not one of the allowed values",
                )
                .value(value.clone())
                .expected(Value::Array(allowed.clone())),
            )?;
        }

        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_schema() -> ConfigSchema {
        ConfigSchema::new("server", "1")
            .property(
                "host",
                PropertySchema::of_type(PropertyType::String).required(),
            )
            .property(
                "port",
                PropertySchema::of_type(PropertyType::Number).with_rules(ValidationRules {
                    min: Some(1.0),
                    max: Some(65535.0),
                    ..ValidationRules::default()
                }),
            )
            .property(
                "mode",
                PropertySchema::of_type(PropertyType::String)
                    .with_default(json!("fast"))
                    .with_rules(ValidationRules {
                        allowed: Some(vec![json!("fast"), json!("safe")]),
                        ..ValidationRules::default()
                    }),
            )
    }

    #[test]
    fn valid_values_carry_data() {
        let value = json!({"host": "localhost", "port": 8080});
        let result = SchemaValidator::default().validate(&server_schema(), &value);

        assert!(result.valid, "{:?}", result.errors);
        assert_eq!(result.data, Some(value));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, PROPERTY_DEFAULTED);
        assert_eq!(result.warnings[0].suggestion, Some(json!("fast")));
    }

    #[test]
    fn non_object_root_is_type_mismatch() {
        let result = SchemaValidator::default().validate(&server_schema(), &json!([1, 2]));
        assert!(!result.valid);
        assert!(result.has_error(ValidationErrorCode::TypeMismatch));
        assert_eq!(result.errors[0].path, "");
    }

    #[test]
    fn stop_on_first_error_reports_one() {
        let value = json!({"port": 0, "mode": "slow"});
        let all = SchemaValidator::default().validate(&server_schema(), &value);
        assert_eq!(all.errors.len(), 3);

        let first = SchemaValidator::new(ValidationOptions {
            stop_on_first_error: Some(true),
            ..ValidationOptions::default()
        })
        .validate(&server_schema(), &value);
        assert_eq!(first.errors.len(), 1);
        assert!(first.data.is_none());
    }

    #[test]
    fn invalid_pattern_is_critical() {
        let schema = ConfigSchema::new("s", "1").property(
            "name",
            PropertySchema::of_type(PropertyType::String).with_rules(ValidationRules {
                pattern: Some("([a-z".to_string()),
                ..ValidationRules::default()
            }),
        );

        let result = SchemaValidator::default().validate(&schema, &json!({"name": "x"}));
        assert!(result.has_error(ValidationErrorCode::InvalidSchema));
        assert_eq!(result.max_severity(), Some(ErrorSeverity::Critical));
    }

    #[test]
    fn custom_validators_run_on_their_path() {
        let validator = SchemaValidator::default().with_validator(
            "host",
            |value: &Value, _: &PropertySchema| {
                if value.as_str().is_some_and(|host| host.ends_with(".internal")) {
                    ValidationResult::ok()
                } else {
                    ValidationResult {
                        valid: false,
                        ..ValidationResult::default()
                    }
                }
            },
        );

        let ok = validator.validate(&server_schema(), &json!({"host": "db.internal"}));
        assert!(ok.valid);

        let rejected = validator.validate(&server_schema(), &json!({"host": "example.com"}));
        assert!(rejected.has_error(ValidationErrorCode::CustomValidationFailed));
    }
}
