use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{
    ColumnType, DefaultExtraction, Extensions, InputOutputType, JdbcExtraction, QueryType,
    TargetBase, TargetProjection, TargetSampling, TimeLine,
};

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdbcArgument {
    #[serde(rename = "type")]
    pub column_type: Option<ColumnType>,
    pub inout: InputOutputType,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub value: Option<String>,
    pub extensions: Option<Extensions>,
}

impl JdbcArgument {
    pub fn input(column_type: ColumnType, value: impl Into<String>) -> Self {
        Self {
            column_type: Some(column_type),
            inout: InputOutputType::In,
            value: Some(value.into()),
            extensions: None,
        }
    }

    pub fn output(column_type: ColumnType) -> Self {
        Self {
            column_type: Some(column_type),
            inout: InputOutputType::Out,
            value: None,
            extensions: None,
        }
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type.unwrap_or_default()
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdbcResponse {
    pub success: Option<bool>,
    pub update_count: Option<i64>,
    pub rows: Option<Vec<BTreeMap<String, Value>>>,
    pub column_labels: Option<Vec<String>>,
    pub size: Option<u64>,
    pub timeline: Option<TimeLine>,
    pub extensions: Option<Extensions>,
}

impl JdbcResponse {
    /// Cell at the given row and column position, ordered by `column_labels`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        let label = self.column_labels.as_ref()?.get(column)?;
        self.rows.as_ref()?.get(row)?.get(label)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdbcRequest0 {
    pub sql: Option<String>,
    pub arguments: Option<Vec<JdbcArgument>>,
    pub size: Option<u64>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Jdbc {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    #[builder(default, setter(strip_option, into))]
    pub condition: Option<String>,
    #[serde(rename = "type")]
    pub query_type: QueryType,
    #[builder(setter(into))]
    pub sql: String,
    #[builder(default, setter(strip_option))]
    pub max_result_rows: Option<u32>,
    #[builder(default, setter(strip_option))]
    pub timeout_in_second: Option<u32>,
    #[builder(default, setter(strip_option))]
    pub arguments: Option<Vec<JdbcArgument>>,
    #[builder(default, setter(strip_option))]
    pub response: Option<JdbcResponse>,
    #[serde(flatten)]
    #[builder(default)]
    pub sampling: TargetSampling<JdbcExtraction, DefaultExtraction>,
    #[serde(skip)]
    #[builder(default, setter(skip))]
    pub projection: TargetProjection,
}

impl Jdbc {
    pub fn arguments(&self) -> &[JdbcArgument] {
        self.arguments.as_deref().unwrap_or_default()
    }

    /// Parameterized and callable statements must bind arguments.
    pub fn is_missing_arguments(&self) -> bool {
        self.query_type.takes_arguments() && self.arguments().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prepared_statements_need_arguments() {
        let mut jdbc = Jdbc::builder()
            .base(TargetBase::named("Find user"))
            .query_type(QueryType::PreparedSelect)
            .sql("select * from users where id = ?")
            .build();
        assert!(jdbc.is_missing_arguments());

        jdbc.arguments = Some(vec![JdbcArgument::input(ColumnType::Bigint, "42")]);
        assert!(!jdbc.is_missing_arguments());

        let written = serde_json::to_value(&jdbc).unwrap();
        assert_eq!(written["type"], "PREPARED_SELECT");
        assert_eq!(
            written["arguments"],
            json!([{"type": "BIGINT", "inout": "IN", "value": "42"}])
        );
    }

    #[test]
    fn response_cells_follow_column_labels() {
        let response: JdbcResponse = serde_json::from_value(json!({
            "success": true,
            "columnLabels": ["id", "name"],
            "rows": [{"id": 1, "name": "ada"}, {"id": 2, "name": "alan"}],
            "timeline": {"startTime": 10, "endTime": 25}
        }))
        .unwrap();

        assert_eq!(response.cell(1, 1), Some(&json!("alan")));
        assert_eq!(response.cell(0, 3), None);
        assert_eq!(
            response.timeline.and_then(|timeline| timeline.elapsed_millis()),
            Some(15)
        );
    }

    #[test]
    fn argument_type_defaults_to_varchar() {
        let argument: JdbcArgument = serde_json::from_value(json!({"inout": "OUT"})).unwrap();
        assert_eq!(argument.column_type(), ColumnType::Varchar);
    }
}
