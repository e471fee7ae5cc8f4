use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{Extensions, LineEndingType, StorageLocation};
use crate::protocols::PostRequest;

pub const DEFAULT_BATCH_ROWS: u32 = 200;

fn default_batch_rows() -> u32 {
    DEFAULT_BATCH_ROWS
}

/// One generated column. `value` may hold mock function templates such as
/// `@Uuid()`.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct MockField {
    #[builder(setter(into))]
    pub name: String,
    #[serde(rename = "type")]
    #[builder(setter(into))]
    pub field_type: String,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    #[builder(default, setter(strip_option, into))]
    pub value: Option<String>,
    #[builder(default, setter(strip_option))]
    pub extensions: Option<Extensions>,
}

/// Settings shared by every output format.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockSettingBase {
    pub rows: u64,
    #[serde(default = "default_batch_rows")]
    pub batch_rows: u32,
    pub location: StorageLocation,
    pub store_request: Option<PostRequest>,
    pub extensions: Option<Extensions>,
}

impl MockSettingBase {
    pub fn new(rows: u64, location: StorageLocation) -> Self {
        Self {
            rows,
            batch_rows: DEFAULT_BATCH_ROWS,
            location,
            store_request: None,
            extensions: None,
        }
    }

    /// Number of batches needed to write every row.
    pub fn batches(&self) -> u64 {
        self.rows.div_ceil(u64::from(self.batch_rows.max(1)))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct CsvSetting {
    #[serde(flatten)]
    pub base: MockSettingBase,
    #[builder(default = LineEndingType::UnitLf)]
    pub line_ending: LineEndingType,
    #[builder(default = true)]
    pub include_header: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct JsonSetting {
    #[serde(flatten)]
    pub base: MockSettingBase,
    #[builder(default = LineEndingType::UnitLf)]
    pub line_ending: LineEndingType,
    #[builder(default)]
    pub include_null: bool,
    #[builder(default)]
    pub rows_to_array: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelSetting {
    #[serde(flatten)]
    pub base: MockSettingBase,
    pub line_ending: LineEndingType,
    pub include_header: bool,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlSetting {
    #[serde(flatten)]
    pub base: MockSettingBase,
    pub table_name: Option<String>,
    pub create_table: bool,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XmlSetting {
    #[serde(flatten)]
    pub base: MockSettingBase,
    pub root_element: Option<String>,
    pub row_element: Option<String>,
    pub line_ending: LineEndingType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSetting {
    #[serde(flatten)]
    pub base: MockSettingBase,
    pub line_ending: LineEndingType,
    pub include_header: bool,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSetting {
    #[serde(flatten)]
    pub base: MockSettingBase,
    pub template: Option<String>,
    pub line_ending: LineEndingType,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtSetting {
    #[serde(flatten)]
    pub base: MockSettingBase,
    pub ext_config: Option<serde_json::Map<String, Value>>,
}

/// Output format settings, selected by the `format` tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format")]
pub enum MockSetting {
    #[serde(rename = "CSV")]
    Csv(CsvSetting),
    #[serde(rename = "JSON")]
    Json(JsonSetting),
    #[serde(rename = "EXCEL")]
    Excel(ExcelSetting),
    #[serde(rename = "SQL")]
    Sql(SqlSetting),
    #[serde(rename = "XML")]
    Xml(XmlSetting),
    #[serde(rename = "TAB")]
    Tab(TabSetting),
    #[serde(rename = "CUSTOM")]
    Custom(CustomSetting),
    #[serde(rename = "EXT")]
    Ext(ExtSetting),
}

impl MockSetting {
    pub fn format(&self) -> &'static str {
        match self {
            Self::Csv(_) => "CSV",
            Self::Json(_) => "JSON",
            Self::Excel(_) => "EXCEL",
            Self::Sql(_) => "SQL",
            Self::Xml(_) => "XML",
            Self::Tab(_) => "TAB",
            Self::Custom(_) => "CUSTOM",
            Self::Ext(_) => "EXT",
        }
    }

    pub fn base(&self) -> &MockSettingBase {
        match self {
            Self::Csv(setting) => &setting.base,
            Self::Json(setting) => &setting.base,
            Self::Excel(setting) => &setting.base,
            Self::Sql(setting) => &setting.base,
            Self::Xml(setting) => &setting.base,
            Self::Tab(setting) => &setting.base,
            Self::Custom(setting) => &setting.base,
            Self::Ext(setting) => &setting.base,
        }
    }

    /// Line ending for text formats; `None` for formats without one.
    pub fn line_ending(&self) -> Option<LineEndingType> {
        match self {
            Self::Csv(setting) => Some(setting.line_ending),
            Self::Json(setting) => Some(setting.line_ending),
            Self::Excel(setting) => Some(setting.line_ending),
            Self::Xml(setting) => Some(setting.line_ending),
            Self::Tab(setting) => Some(setting.line_ending),
            Self::Custom(setting) => Some(setting.line_ending),
            Self::Sql(_) | Self::Ext(_) => None,
        }
    }
}

impl From<CsvSetting> for MockSetting {
    fn from(value: CsvSetting) -> Self {
        Self::Csv(value)
    }
}

impl From<JsonSetting> for MockSetting {
    fn from(value: JsonSetting) -> Self {
        Self::Json(value)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct MockData {
    #[builder(setter(into))]
    pub name: String,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    pub fields: Vec<MockField>,
    #[builder(setter(into))]
    pub settings: MockSetting,
    #[builder(default, setter(strip_option))]
    pub extensions: Option<Extensions>,
}

impl MockData {
    pub fn field(&self, name: &str) -> Option<&MockField> {
        self.fields.iter().find(|field| field.name == name)
    }
}
