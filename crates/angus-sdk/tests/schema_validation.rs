use angus_sdk::config::{
    ConfigSchema, PropertySchema, PropertyType, SchemaValidator, ValidationErrorCode,
    ValidationOptions, ValidationRules,
};
use serde_json::json;

fn database_schema() -> ConfigSchema {
    let pool = ConfigSchema::new("pool", "1")
        .property(
            "max",
            PropertySchema::of_type(PropertyType::Number)
                .required()
                .with_rules(ValidationRules {
                    min: Some(1.0),
                    max: Some(100.0),
                    ..ValidationRules::default()
                }),
        )
        .closed();

    ConfigSchema::new("database", "2")
        .property(
            "name",
            PropertySchema::of_type(PropertyType::String).with_rules(ValidationRules {
                min_length: Some(2),
                max_length: Some(8),
                pattern: Some("^[a-z_]+$".to_string()),
                ..ValidationRules::default()
            }),
        )
        .property(
            "pool",
            PropertySchema::of_type(PropertyType::Object).with_schema(pool),
        )
        .property(
            "hosts",
            PropertySchema::of_type(PropertyType::Array)
                .with_items(PropertySchema::of_type(PropertyType::String)),
        )
}

#[test]
fn nested_errors_report_dotted_and_indexed_paths() {
    let value = json!({
        "name": "Angus-DB-Main",
        "pool": {"max": 500, "idle": 3},
        "hosts": ["a", 7]
    });

    let result = SchemaValidator::default().validate(&database_schema(), &value);

    assert!(!result.valid);
    assert!(result.errors_at("name").any(|e| e.is(ValidationErrorCode::StringTooLong)));
    assert!(result.errors_at("name").any(|e| e.is(ValidationErrorCode::PatternMismatch)));
    assert!(result.errors_at("pool.max").any(|e| e.is(ValidationErrorCode::ValueTooLarge)));
    assert!(result.errors_at("hosts[1]").any(|e| e.is(ValidationErrorCode::TypeMismatch)));
    assert!(result.warnings.iter().any(|w| w.path == "pool.idle"));
}

#[test]
fn strict_mode_turns_unknown_properties_into_errors() {
    let value = json!({"pool": {"max": 5, "idle": 3}});

    let strict = SchemaValidator::new(ValidationOptions {
        strict: Some(true),
        ..ValidationOptions::default()
    })
    .validate(&database_schema(), &value);
    assert!(!strict.valid);
    assert_eq!(strict.errors[0].path, "pool.idle");

    let relaxed = SchemaValidator::new(ValidationOptions {
        strict: Some(true),
        validate_additional_properties: Some(false),
        ..ValidationOptions::default()
    })
    .validate(&database_schema(), &value);
    assert!(relaxed.valid);
}

#[test]
fn warnings_can_be_suppressed() {
    let value = json!({"pool": {"max": 5, "idle": 3}});
    let result = SchemaValidator::new(ValidationOptions {
        include_warnings: Some(false),
        ..ValidationOptions::default()
    })
    .validate(&database_schema(), &value);

    assert!(result.valid);
    assert!(result.warnings.is_empty());
}

#[test]
fn missing_nested_required_property_is_reported() {
    let value = json!({"pool": {}});
    let result = SchemaValidator::default().validate(&database_schema(), &value);

    assert!(result.errors_at("pool.max").any(|e| e.is(ValidationErrorCode::RequiredPropertyMissing)));
}
