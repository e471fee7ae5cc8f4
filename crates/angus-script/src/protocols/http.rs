use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{
    ApisCaseType, CaseTestMethod, ClientIn, Extensions, HttpExtraction, HttpMethod, ParameterIn,
    SecurityIn, SecurityType, TargetBase, TargetProjection, TargetSampling,
};

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default, deserialize_with = "angus_sdk::common::optional_scalar_text")]
    pub value: Option<String>,
    #[serde(rename = "in")]
    pub location: ParameterIn,
    pub required: Option<bool>,
    pub description: Option<String>,
    pub extensions: Option<Extensions>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: ParameterIn, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            location,
            required: None,
            description: None,
            extensions: None,
        }
    }

    pub fn query(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ParameterIn::Query, value)
    }

    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ParameterIn::Header, value)
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormParameter {
    pub name: String,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    #[serde(rename = "type")]
    pub form_type: Option<String>,
    pub format: Option<String>,
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
    pub file_name: Option<String>,
    pub value: Option<String>,
    pub extensions: Option<Extensions>,
}

impl FormParameter {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn is_file(&self) -> bool {
        self.file_name.is_some() || self.format.as_deref() == Some("binary")
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub format: Option<String>,
    pub content_encoding: Option<String>,
    pub forms: Option<Vec<FormParameter>>,
    pub raw_content: Option<String>,
    pub file_name: Option<String>,
    pub extensions: Option<Extensions>,
}

impl RequestBody {
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            raw_content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn enabled_forms(&self) -> impl Iterator<Item = &FormParameter> {
        self.forms.iter().flatten().filter(|form| form.is_enabled())
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerVariable {
    pub allowable_values: Vec<String>,
    pub default_value: String,
    pub description: Option<String>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub url: String,
    pub description: Option<String>,
    pub variables: Option<BTreeMap<String, ServerVariable>>,
    pub extensions: Option<Extensions>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Server url with `{name}` placeholders replaced by variable defaults.
    pub fn resolved_url(&self) -> String {
        self.variables
            .iter()
            .flatten()
            .fold(self.url.clone(), |url, (name, variable)| {
                url.replace(&format!("{{{name}}}"), &variable.default_value)
            })
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub name: String,
    pub value: Option<String>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Flow {
    pub token_url: Option<String>,
    pub refresh_url: Option<String>,
    pub scopes: Option<Vec<String>>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub client_in: Option<ClientIn>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Flows {
    pub client_credentials: Option<OAuth2Flow>,
    pub password: Option<OAuth2Flow>,
    pub auth_flow: Option<String>,
    pub new_token: Option<bool>,
    pub token: Option<String>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    #[serde(rename = "type")]
    pub security_type: Option<SecurityType>,
    #[serde(rename = "in")]
    pub location: Option<SecurityIn>,
    pub scheme: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub value: Option<String>,
    pub api_keys: Option<Vec<ApiKey>>,
    pub oauth2: Option<OAuth2Flows>,
    pub extensions: Option<Extensions>,
}

impl Security {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn security_type(&self) -> SecurityType {
        self.security_type.unwrap_or_default()
    }

    pub fn location(&self) -> SecurityIn {
        self.location.unwrap_or_default()
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSetting {
    pub connect_timeout: Option<u64>,
    pub read_timeout: Option<u64>,
    pub write_timeout: Option<u64>,
    pub follow_redirects: Option<bool>,
    pub max_redirects: Option<u32>,
    pub verify_ssl: Option<bool>,
    pub user_agent: Option<String>,
    pub keep_alive: Option<bool>,
    pub max_connections: Option<u32>,
    pub extensions: Option<Extensions>,
}

/// Values the engine resolves for a request before sending it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestProjection {
    pub operation_id: Option<String>,
    pub request_id: Option<String>,
    pub mock_tokens: BTreeMap<String, String>,
    pub has_mock_value: Option<bool>,
    pub has_variable_value: Option<bool>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub method: HttpMethod,
    pub url: Option<String>,
    pub server: Option<Server>,
    pub endpoint: Option<String>,
    pub authentication: Option<Security>,
    pub parameters: Option<Vec<Parameter>>,
    pub content_type: Option<String>,
    pub body: Option<RequestBody>,
    pub setting: Option<HttpSetting>,
    pub extensions: Option<Extensions>,
    #[serde(skip)]
    pub projection: RequestProjection,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: Some(url.into()),
            server: None,
            endpoint: None,
            authentication: None,
            parameters: None,
            content_type: None,
            body: None,
            setting: None,
            extensions: None,
            projection: RequestProjection::default(),
        }
    }

    /// Target url: `url` when set, else the resolved server url joined with
    /// `endpoint`.
    pub fn target_url(&self) -> Option<String> {
        if let Some(url) = &self.url {
            return Some(url.clone());
        }
        let server = self.server.as_ref()?.resolved_url();
        let endpoint = self.endpoint.as_deref().unwrap_or_default();
        Some(format!(
            "{}/{}",
            server.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        ))
    }

    pub fn parameters_in(&self, location: ParameterIn) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .flatten()
            .filter(move |parameter| parameter.location == location)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: Option<u16>,
    pub headers: Option<BTreeMap<String, String>>,
    pub body: Option<String>,
    pub response_time: Option<u64>,
    pub size: Option<u64>,
    pub encoding: Option<String>,
    pub content_type: Option<String>,
    pub extensions: Option<Extensions>,
}

impl Response {
    /// Header lookup, case-insensitive on the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .flatten()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The request as it was actually sent.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request0 {
    pub method: Option<String>,
    pub url: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
    pub body: Option<String>,
    pub parameters: Option<Vec<Parameter>>,
    pub forms: Option<Vec<FormParameter>>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Http {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    #[builder(default, setter(strip_option, into))]
    pub condition: Option<String>,
    #[builder(default, setter(strip_option))]
    pub apis_id: Option<i64>,
    #[builder(default, setter(strip_option))]
    pub case_id: Option<i64>,
    #[builder(default, setter(strip_option))]
    pub case_type: Option<ApisCaseType>,
    #[builder(default, setter(strip_option))]
    pub case_test_method: Option<CaseTestMethod>,
    pub request: Request,
    #[builder(default, setter(strip_option))]
    pub response: Option<Response>,
    #[serde(flatten)]
    #[builder(default)]
    pub sampling: TargetSampling<HttpExtraction, HttpExtraction>,
    #[serde(skip)]
    #[builder(default, setter(skip))]
    pub projection: TargetProjection,
}

impl Http {
    pub fn has_status_assertion(&self) -> bool {
        self.sampling
            .assertions()
            .iter()
            .any(|assertion| assertion.assertion_type == crate::models::AssertionType::Status)
    }
}

/// Callback request issued after a mock response or a generated batch.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    #[builder(setter(into))]
    pub url: String,
    #[builder(default, setter(strip_option))]
    pub authentication: Option<Security>,
    #[builder(default, setter(strip_option))]
    pub parameters: Option<Vec<Parameter>>,
    #[builder(default, setter(strip_option, into))]
    pub content_type: Option<String>,
    #[builder(default, setter(strip_option))]
    pub body: Option<RequestBody>,
    #[builder(default, setter(strip_option))]
    pub setting: Option<HttpSetting>,
    #[builder(default, setter(strip_option))]
    pub extensions: Option<Extensions>,
}
