use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::models::{AnyExtraction, Extensions};

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datasource {
    pub name: String,
    #[serde(rename = "type")]
    pub datasource_type: Option<String>,
    pub url: Option<String>,
    pub config: Option<BTreeMap<String, Value>>,
    pub description: Option<String>,
    pub extensions: Option<Extensions>,
}

/// Values the engine resolves for a variable or parameter at run time.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValueProjection {
    pub actual_value: Option<String>,
    pub has_mock_value: Option<bool>,
    pub extractable: Option<bool>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub value: Option<String>,
    pub password_value: Option<bool>,
    pub extraction: Option<AnyExtraction>,
    pub extensions: Option<Extensions>,
    #[serde(skip)]
    pub projection: ValueProjection,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn extracted(name: impl Into<String>, extraction: impl Into<AnyExtraction>) -> Self {
        Self {
            name: name.into(),
            extraction: Some(extraction.into()),
            ..Self::default()
        }
    }

    /// Sensitive variables are masked by editors and logs.
    pub fn is_sensitive(&self) -> bool {
        self.password_value.unwrap_or(false)
    }

    /// Value for display: masked when sensitive.
    pub fn display_value(&self) -> Option<&str> {
        if self.is_sensitive() {
            self.value.as_ref().map(|_| "******")
        } else {
            self.value.as_deref()
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetParameter {
    pub name: String,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub value: Option<String>,
    pub extensions: Option<Extensions>,
}

impl DatasetParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            extensions: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Vec<DatasetParameter>,
    pub extraction: Option<AnyExtraction>,
    pub extensions: Option<Extensions>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, parameters: Vec<DatasetParameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
            ..Self::default()
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&DatasetParameter> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|parameter| parameter.name.as_str())
    }

    /// First parameter name that appears more than once.
    pub fn duplicate_parameter(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.parameter_names().find(|name| !seen.insert(*name))
    }

    pub fn is_extractable(&self) -> bool {
        self.extraction.is_some()
    }
}
