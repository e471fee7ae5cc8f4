use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::models::{
    Datasource, ExtractionFileType, ExtractionMethod, ExtractionSource, Extensions,
    HttpExtractionLocation,
};
use crate::protocols::http::Request;

/// Values the engine computes while extracting. Never serialized.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtractionOutcome {
    pub value: Option<String>,
    pub final_value: Option<String>,
    pub failure_message: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultExtraction {
    pub name: Option<String>,
    pub method: Option<ExtractionMethod>,
    pub source: Option<ExtractionSource>,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub expression: Option<String>,
    pub match_item: Option<u32>,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub default_value: Option<String>,
    pub extensions: Option<Extensions>,
    #[serde(skip)]
    pub outcome: ExtractionOutcome,
}

impl DefaultExtraction {
    pub fn exact(value: impl Into<String>) -> Self {
        Self {
            method: Some(ExtractionMethod::ExactValue),
            source: Some(ExtractionSource::Value),
            expression: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn regex(expression: impl Into<String>, match_item: u32) -> Self {
        Self {
            method: Some(ExtractionMethod::Regex),
            expression: Some(expression.into()),
            match_item: Some(match_item),
            ..Self::default()
        }
    }

    pub fn json_path(expression: impl Into<String>) -> Self {
        Self {
            method: Some(ExtractionMethod::JsonPath),
            expression: Some(expression.into()),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: ExtractionSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Common access to the shared extraction fields of every extraction shape.
pub trait Extraction {
    fn base(&self) -> &DefaultExtraction;

    fn name(&self) -> Option<&str> {
        self.base().name.as_deref()
    }

    fn method(&self) -> Option<ExtractionMethod> {
        self.base().method
    }

    fn source(&self) -> Option<ExtractionSource> {
        self.base().source
    }

    fn outcome(&self) -> &ExtractionOutcome {
        &self.base().outcome
    }
}

impl Extraction for DefaultExtraction {
    fn base(&self) -> &DefaultExtraction {
        self
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileExtraction {
    #[serde(flatten)]
    pub base: DefaultExtraction,
    pub file_type: Option<ExtractionFileType>,
    pub path: Option<String>,
    pub encoding: Option<String>,
    pub quote_char: Option<String>,
    pub escape_char: Option<String>,
    pub separator_char: Option<String>,
    pub row_index: Option<u32>,
    pub column_index: Option<u32>,
}

impl Extraction for FileExtraction {
    fn base(&self) -> &DefaultExtraction {
        &self.base
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpExtraction {
    #[serde(flatten)]
    pub base: DefaultExtraction,
    pub request: Option<Box<Request>>,
    pub location: Option<HttpExtractionLocation>,
    pub parameter_name: Option<String>,
}

impl Extraction for HttpExtraction {
    fn base(&self) -> &DefaultExtraction {
        &self.base
    }
}

/// Extraction from the sampled exchange of the owning HTTP target.
pub type HttpSamplingExtraction = HttpExtraction;

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdbcExtraction {
    #[serde(flatten)]
    pub base: DefaultExtraction,
    pub datasource: Option<Datasource>,
    pub select: Option<String>,
    pub row_index: Option<u32>,
    pub column_index: Option<u32>,
}

impl Extraction for JdbcExtraction {
    fn base(&self) -> &DefaultExtraction {
        &self.base
    }
}

/// Any extraction shape, selected by its `source` field. A missing source
/// reads as a plain value extraction.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyExtraction {
    Value(DefaultExtraction),
    File(FileExtraction),
    Http(HttpExtraction),
    HttpSampling(HttpSamplingExtraction),
    HttpAssertion(DefaultExtraction),
    Jdbc(JdbcExtraction),
}

impl AnyExtraction {
    pub fn source(&self) -> ExtractionSource {
        match self {
            Self::Value(_) => ExtractionSource::Value,
            Self::File(_) => ExtractionSource::File,
            Self::Http(_) => ExtractionSource::Http,
            Self::HttpSampling(_) => ExtractionSource::HttpSampling,
            Self::HttpAssertion(_) => ExtractionSource::HttpAssertion,
            Self::Jdbc(_) => ExtractionSource::Jdbc,
        }
    }
}

impl Extraction for AnyExtraction {
    fn base(&self) -> &DefaultExtraction {
        match self {
            Self::Value(extraction) | Self::HttpAssertion(extraction) => extraction,
            Self::File(extraction) => &extraction.base,
            Self::Http(extraction) | Self::HttpSampling(extraction) => &extraction.base,
            Self::Jdbc(extraction) => &extraction.base,
        }
    }
}

impl From<DefaultExtraction> for AnyExtraction {
    fn from(value: DefaultExtraction) -> Self {
        match value.source {
            Some(ExtractionSource::HttpAssertion) => Self::HttpAssertion(value),
            _ => Self::Value(value),
        }
    }
}

impl From<FileExtraction> for AnyExtraction {
    fn from(value: FileExtraction) -> Self {
        Self::File(value)
    }
}

impl From<JdbcExtraction> for AnyExtraction {
    fn from(value: JdbcExtraction) -> Self {
        Self::Jdbc(value)
    }
}

impl Serialize for AnyExtraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(extraction) | Self::HttpAssertion(extraction) => {
                extraction.serialize(serializer)
            }
            Self::File(extraction) => extraction.serialize(serializer),
            Self::Http(extraction) | Self::HttpSampling(extraction) => {
                extraction.serialize(serializer)
            }
            Self::Jdbc(extraction) => extraction.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AnyExtraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let source = match raw.get("source") {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                ExtractionSource::deserialize(value.clone()).map_err(D::Error::custom)?,
            ),
        };

        let parsed = match source {
            None | Some(ExtractionSource::Value) => {
                serde_json::from_value(raw).map(Self::Value)
            }
            Some(ExtractionSource::File) => serde_json::from_value(raw).map(Self::File),
            Some(ExtractionSource::Http) => serde_json::from_value(raw).map(Self::Http),
            Some(ExtractionSource::HttpSampling) => {
                serde_json::from_value(raw).map(Self::HttpSampling)
            }
            Some(ExtractionSource::HttpAssertion) => {
                serde_json::from_value(raw).map(Self::HttpAssertion)
            }
            Some(ExtractionSource::Jdbc) => serde_json::from_value(raw).map(Self::Jdbc),
        };
        parsed.map_err(D::Error::custom)
    }
}
