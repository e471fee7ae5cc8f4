use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::common::StringRecord;

crate::literal_enum! {
    pub enum PropertyType {
        String = "string",
        Number = "number",
        Boolean = "boolean",
        Object = "object",
        Array = "array",
        Null = "null",
    }
}

impl PropertyType {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Null => value.is_null(),
        }
    }

    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

crate::literal_enum! {
    pub enum ConfigSource {
        Environment = "environment",
        File = "file",
        CommandLine = "command_line",
        Default = "default",
        Database = "database",
        Remote = "remote",
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    #[serde(rename = "enum")]
    pub allowed: Option<Vec<Value>>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub default: Option<Value>,
    pub validation: Option<ValidationRules>,
    pub schema: Option<Box<ConfigSchema>>,
    pub items: Option<Box<PropertySchema>>,
}

impl PropertySchema {
    pub fn of_type(property_type: PropertyType) -> Self {
        Self {
            property_type,
            description: None,
            required: None,
            default: None,
            validation: None,
            schema: None,
            items: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.validation = Some(rules);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_schema(mut self, schema: ConfigSchema) -> Self {
        self.schema = Some(Box::new(schema));
        self
    }

    pub fn with_items(mut self, items: PropertySchema) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSchema {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub properties: StringRecord<PropertySchema>,
    pub required: Option<Vec<String>>,
    pub additional_properties: Option<bool>,
}

impl ConfigSchema {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
            properties: StringRecord::new(),
            required: None,
            additional_properties: None,
        }
    }

    pub fn property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn closed(mut self) -> Self {
        self.additional_properties = Some(false);
        self
    }

    /// Whether `name` must be present, either via the `required` list or the
    /// property's own flag.
    pub fn requires(&self, name: &str) -> bool {
        let listed = self
            .required
            .as_ref()
            .is_some_and(|required| required.iter().any(|entry| entry == name));
        listed
            || self
                .properties
                .get(name)
                .is_some_and(PropertySchema::is_required)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigValue {
    pub key: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub value_type: PropertyType,
    pub sensitive: Option<bool>,
    pub source: Option<ConfigSource>,
    pub timestamp: Option<String>,
}

impl ConfigValue {
    pub fn new(key: impl Into<String>, value: Value, source: ConfigSource) -> Self {
        Self {
            key: key.into(),
            value_type: PropertyType::of(&value),
            value,
            sensitive: None,
            source: Some(source),
            timestamp: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigSection {
    pub name: String,
    pub description: Option<String>,
    pub properties: StringRecord<ConfigValue>,
    pub sections: Option<StringRecord<ConfigSection>>,
}

impl ConfigSection {
    /// Resolves a dotted key such as `database.pool.max` through nested
    /// sections.
    pub fn lookup(&self, key: &str) -> Option<&ConfigValue> {
        match key.split_once('.') {
            Some((head, rest)) => {
                if let Some(section) = self.sections.as_ref().and_then(|s| s.get(head)) {
                    if let Some(found) = section.lookup(rest) {
                        return Some(found);
                    }
                }
                self.properties.get(key)
            }
            None => self.properties.get(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn schema_reads_enum_and_default_keywords() {
        let schema: ConfigSchema = serde_json::from_value(json!({
            "name": "server",
            "version": "1",
            "required": ["host"],
            "properties": {
                "host": {"type": "string"},
                "mode": {"type": "string", "default": "fast", "validation": {"enum": ["fast", "safe"]}}
            }
        }))
        .unwrap();

        assert!(schema.requires("host"));
        assert!(!schema.requires("mode"));
        let mode = &schema.properties["mode"];
        assert_eq!(mode.default, Some(json!("fast")));
        assert_eq!(
            mode.validation.as_ref().and_then(|rules| rules.allowed.clone()),
            Some(vec![json!("fast"), json!("safe")])
        );
    }

    #[test]
    fn sections_resolve_dotted_keys() {
        let pool = ConfigSection {
            name: "pool".to_string(),
            description: None,
            properties: [(
                "max".to_string(),
                ConfigValue::new("max", json!(10), ConfigSource::File),
            )]
            .into_iter()
            .collect(),
            sections: None,
        };
        let root = ConfigSection {
            name: "root".to_string(),
            description: None,
            properties: StringRecord::new(),
            sections: Some([("pool".to_string(), pool)].into_iter().collect()),
        };

        let found = root.lookup("pool.max").unwrap();
        assert_eq!(found.value, json!(10));
        assert_eq!(found.value_type, PropertyType::Number);
        assert!(root.lookup("pool.min").is_none());
    }
}
