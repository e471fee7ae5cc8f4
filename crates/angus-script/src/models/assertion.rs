use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{AssertionCondition, AssertionType, Extensions};

pub const MAX_MATCH_ITEM: u32 = 2000;

pub struct AssertionResultConstants;

impl AssertionResultConstants {
    pub const RESPONSE_IS_NULL: &'static str = "Response is null";
    pub const ASSERTION_VALUE_IS_EMPTY: &'static str = "Assertion value is empty";
    pub const EXPECTED_VALUE_IS_EMPTY: &'static str = "Expected value is empty";
    pub const EXPECTED_REGEXP_IS_EMPTY: &'static str = "Expected regular expression is empty";
    pub const EXPECTED_XPATH_EXP_IS_EMPTY: &'static str = "Expected XPath expression is empty";
    pub const EXPECTED_JSONPATH_EXP_IS_EMPTY: &'static str =
        "Expected JSONPath expression is empty";
    pub const ASSERTION_VALUE_IS_NOT_NUMBER: &'static str = "Assertion value is not number";
    pub const EXPECTED_VALUE_IS_NOT_NUMBER: &'static str = "Expected value is not number";
    pub const RESPONSE_HEADER_NOT_FOUND: &'static str = "RequestHeader not found in response";
    pub const BINARY_ASSERTION_NOT_SUPPORTED: &'static str = "Binary assertion not supported";
    pub const ASSERTION_EXCEPTION: &'static str = "An exception occurred in the assertion: ";
    pub const ASSERTION_SUCCESS: &'static str = "Success";
    pub const ASSERTION_FAILED: &'static str = "Failed";
    pub const ASSERTION_IGNORED: &'static str = "Ignored";

    /// Message for a pattern condition whose expression is missing.
    pub fn missing_expression(condition: AssertionCondition) -> Option<&'static str> {
        match condition {
            AssertionCondition::RegMatch => Some(Self::EXPECTED_REGEXP_IS_EMPTY),
            AssertionCondition::XpathMatch => Some(Self::EXPECTED_XPATH_EXP_IS_EMPTY),
            AssertionCondition::JsonPathMatch => Some(Self::EXPECTED_JSONPATH_EXP_IS_EMPTY),
            _ => None,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AssertionResult {
    pub failure: Option<bool>,
    pub ignored: Option<bool>,
    pub message: Option<String>,
    pub extensions: Option<Extensions>,
}

impl AssertionResult {
    pub fn success() -> Self {
        Self {
            failure: Some(false),
            message: Some(AssertionResultConstants::ASSERTION_SUCCESS.to_string()),
            ..Self::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            failure: Some(true),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn ignored() -> Self {
        Self {
            ignored: Some(true),
            message: Some(AssertionResultConstants::ASSERTION_IGNORED.to_string()),
            ..Self::default()
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.unwrap_or(false)
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored.unwrap_or(false)
    }
}

/// Values the engine fills while evaluating an assertion.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AssertionProjection {
    pub actual_condition: Option<String>,
    pub actual_expected: Option<String>,
    pub extract_value: Option<String>,
    pub result: Option<AssertionResult>,
}

/// A check on one sampled value. `E` is the extraction shape the owning
/// target accepts.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Assertion<E> {
    #[builder(setter(into))]
    pub name: String,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    #[builder(default, setter(strip_option))]
    pub enabled: Option<bool>,
    #[serde(rename = "type")]
    pub assertion_type: AssertionType,
    #[builder(default, setter(strip_option, into))]
    pub parameter_name: Option<String>,
    /// Precondition expression; the assertion is skipped when it is false.
    #[builder(default, setter(strip_option, into))]
    pub condition: Option<String>,
    pub assertion_condition: AssertionCondition,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    #[builder(default, setter(strip_option, into))]
    pub expression: Option<String>,
    #[builder(default, setter(strip_option))]
    pub match_item: Option<u32>,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    #[builder(default, setter(strip_option, into))]
    pub expected: Option<String>,
    #[builder(default, setter(strip_option))]
    pub extraction: Option<E>,
    #[builder(default, setter(strip_option))]
    pub extensions: Option<Extensions>,
    #[serde(skip)]
    #[builder(default, setter(skip))]
    pub projection: AssertionProjection,
}

impl<E> Assertion<E> {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn is_extractable(&self) -> bool {
        self.extraction.is_some()
    }

    /// Whether `expected` may be omitted for this condition.
    pub fn is_optional_expected(&self) -> bool {
        !self.assertion_condition.needs_expected()
    }
}
