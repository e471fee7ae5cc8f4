use std::cmp::Reverse;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{
    Extensions, FullMatchCondition, HttpMethod, MatchParameterIn, ResponseDelayMode, TimeValue,
};
use crate::protocols::{Parameter, RequestBody};

pub const DEFAULT_MATCH_PRIORITY: u32 = 1000;

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPath {
    pub condition: FullMatchCondition,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub expression: Option<String>,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub expected: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: MatchParameterIn,
    pub condition: FullMatchCondition,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub expression: Option<String>,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub expected: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBody {
    pub condition: FullMatchCondition,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub expression: Option<String>,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub expected: Option<String>,
}

/// Rules a request must satisfy to receive a response. Higher priority wins
/// when several responses match.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[builder(default, setter(strip_option))]
    pub path: Option<MatchPath>,
    #[builder(default, setter(strip_option))]
    pub parameters: Option<Vec<MatchParameter>>,
    #[builder(default, setter(strip_option))]
    pub body: Option<MatchBody>,
    #[builder(default, setter(strip_option))]
    pub priority: Option<u32>,
    #[builder(default, setter(strip_option))]
    pub extensions: Option<Extensions>,
}

impl MatchRequest {
    pub fn priority(&self) -> u32 {
        self.priority.unwrap_or(DEFAULT_MATCH_PRIORITY)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDelay {
    pub mode: ResponseDelayMode,
    pub fixed_time: Option<TimeValue>,
    pub min_random_time: Option<TimeValue>,
    pub max_random_time: Option<TimeValue>,
}

impl ResponseDelay {
    pub fn fixed(time: TimeValue) -> Self {
        Self {
            mode: ResponseDelayMode::Fixed,
            fixed_time: Some(time),
            ..Self::default()
        }
    }

    pub fn random(min: TimeValue, max: TimeValue) -> Self {
        Self {
            mode: ResponseDelayMode::Random,
            min_random_time: Some(min),
            max_random_time: Some(max),
            ..Self::default()
        }
    }

    /// Lower and upper delay for the configured mode.
    pub fn bounds(&self) -> (Duration, Duration) {
        let duration =
            |time: Option<TimeValue>| time.and_then(TimeValue::as_duration).unwrap_or_default();
        match self.mode {
            ResponseDelayMode::None => (Duration::ZERO, Duration::ZERO),
            ResponseDelayMode::Fixed => {
                let fixed = duration(self.fixed_time);
                (fixed, fixed)
            }
            ResponseDelayMode::Random => {
                (duration(self.min_random_time), duration(self.max_random_time))
            }
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockHeader {
    pub name: String,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub value: Option<String>,
}

impl MockHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct MockResponseContent {
    pub status: u16,
    #[builder(default, setter(strip_option))]
    pub headers: Option<Vec<MockHeader>>,
    /// Any RFC 4648 encoding name, such as `base64` or `base64url`.
    #[builder(default, setter(strip_option, into))]
    pub content_encoding: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub content: Option<String>,
    #[builder(default, setter(strip_option))]
    pub delay: Option<ResponseDelay>,
    #[builder(default, setter(strip_option))]
    pub extensions: Option<Extensions>,
}

/// Callback sent after the mock response has been returned.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockResponsePushback {
    pub auto_push: bool,
    pub method: HttpMethod,
    pub url: String,
    pub parameters: Option<Vec<Parameter>>,
    pub body: Option<RequestBody>,
    pub delay: Option<ResponseDelay>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct MockResponse {
    #[builder(setter(into))]
    pub name: String,
    #[serde(rename = "match")]
    #[builder(default, setter(strip_option))]
    pub match_request: Option<MatchRequest>,
    pub content: MockResponseContent,
    #[builder(default, setter(strip_option))]
    pub pushback: Option<MockResponsePushback>,
    #[builder(default, setter(strip_option))]
    pub extensions: Option<Extensions>,
}

/// Engine-assigned identity of the mock service hosting an API.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MockServiceProjection {
    pub mock_service_id: Option<String>,
    pub mock_service_url: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct MockApis {
    #[builder(setter(into))]
    pub name: String,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    pub method: HttpMethod,
    #[builder(setter(into))]
    pub endpoint: String,
    pub responses: Vec<MockResponse>,
    #[builder(default, setter(strip_option))]
    pub extensions: Option<Extensions>,
    #[serde(skip)]
    #[builder(default, setter(skip))]
    pub projection: MockServiceProjection,
}

impl MockApis {
    /// Responses in match order: those with match rules by descending
    /// priority, then responses without rules. Ties keep document order.
    pub fn responses_by_priority(&self) -> Vec<&MockResponse> {
        let mut ordered: Vec<&MockResponse> = self.responses.iter().collect();
        ordered.sort_by_key(|response| match &response.match_request {
            Some(rule) => (false, Reverse(rule.priority())),
            None => (true, Reverse(0)),
        });
        ordered
    }

    /// First response name used more than once.
    pub fn duplicate_response(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.responses
            .iter()
            .map(|response| response.name.as_str())
            .find(|name| !seen.insert(*name))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(name: &str, priority: Option<u32>) -> MockResponse {
        MockResponse {
            name: name.to_string(),
            match_request: priority.map(|priority| MatchRequest {
                priority: Some(priority),
                ..MatchRequest::default()
            }),
            content: MockResponseContent::builder().status(200).build(),
            pushback: None,
            extensions: None,
        }
    }

    #[test]
    fn responses_order_by_descending_priority() {
        let mut fallback_rule = response("default rule", None);
        fallback_rule.match_request = Some(MatchRequest::default());

        let apis = MockApis::builder()
            .name("users")
            .method(HttpMethod::Get)
            .endpoint("/users")
            .responses(vec![
                response("catch all", None),
                response("low", Some(10)),
                fallback_rule,
                response("high", Some(5000)),
                response("also low", Some(10)),
            ])
            .build();

        let names: Vec<&str> = apis
            .responses_by_priority()
            .into_iter()
            .map(|response| response.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["high", "default rule", "low", "also low", "catch all"]
        );
    }

    #[test]
    fn match_rule_reads_reserved_names() {
        let response: MockResponse = serde_json::from_value(json!({
            "name": "vip",
            "match": {
                "parameters": [{
                    "name": "tier",
                    "in": "query",
                    "condition": "EQUAL",
                    "expected": "vip"
                }],
                "priority": 2000
            },
            "content": {
                "status": 200,
                "headers": [{"name": "Content-Type", "value": "application/json"}],
                "content": "{\"vip\": true}",
                "delay": {"mode": "FIXED", "fixedTime": "150ms"}
            }
        }))
        .unwrap();

        let rule = response.match_request.as_ref().unwrap();
        assert_eq!(rule.priority(), 2000);
        assert_eq!(
            rule.parameters.as_ref().unwrap()[0].location,
            MatchParameterIn::Query
        );
        let delay = response.content.delay.as_ref().unwrap();
        assert_eq!(
            delay.bounds(),
            (Duration::from_millis(150), Duration::from_millis(150))
        );
    }

    #[test]
    fn response_content_keeps_any_encoding_name() {
        for encoding in ["base64url", "BASE64", "gzip_base64"] {
            let content: MockResponseContent = serde_json::from_value(json!({
                "status": 200,
                "contentEncoding": encoding,
                "content": "eyJvayI6dHJ1ZX0"
            }))
            .unwrap();
            assert_eq!(content.content_encoding.as_deref(), Some(encoding));
            assert_eq!(serde_json::to_value(&content).unwrap()["contentEncoding"], encoding);
        }
    }

    #[test]
    fn duplicate_response_names_are_found() {
        let apis = MockApis::builder()
            .name("orders")
            .method(HttpMethod::Post)
            .endpoint("/orders")
            .responses(vec![response("ok", None), response("ok", Some(1))])
            .build();
        assert_eq!(apis.duplicate_response(), Some("ok"));
    }
}
