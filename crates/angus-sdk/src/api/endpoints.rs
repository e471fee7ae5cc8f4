use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::api::HttpMethod;
use crate::common::{Id, ScalarValue, StringRecord};
use crate::error::{SdkError, SdkErrorKind, SdkResult};

pub mod auth {
    pub const LOGIN: &str = "/auth/login";
    pub const LOGOUT: &str = "/auth/logout";
    pub const REFRESH: &str = "/auth/refresh";
    pub const REGISTER: &str = "/auth/register";
    pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
    pub const RESET_PASSWORD: &str = "/auth/reset-password";
}

pub mod users {
    use crate::common::Id;

    pub const BASE: &str = "/users";
    pub const PROFILE: &str = "/users/profile";
    pub const UPDATE_PROFILE: &str = "/users/profile";
    pub const CHANGE_PASSWORD: &str = "/users/change-password";

    pub fn by_id(id: &Id) -> String {
        format!("{BASE}/{id}")
    }
}

pub mod config {
    pub const BASE: &str = "/config";

    pub fn by_key(key: &str) -> String {
        format!("{BASE}/{key}")
    }

    pub fn by_category(category: &str) -> String {
        format!("{BASE}/category/{category}")
    }
}

pub mod resources {
    use crate::common::Id;

    pub const BASE: &str = "/resources";

    pub fn by_id(id: &Id) -> String {
        format!("{BASE}/{id}")
    }

    pub fn by_type(resource_type: &str) -> String {
        format!("{BASE}/type/{resource_type}")
    }
}

pub mod health {
    pub const BASE: &str = "/health";
    pub const READY: &str = "/health/ready";
    pub const LIVE: &str = "/health/live";
}

#[skip_serializing_none]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEndpoint {
    pub resource: String,
    pub base_path: String,
    pub methods: Vec<String>,
    pub requires_auth: bool,
    pub description: Option<String>,
}

impl ResourceEndpoint {
    pub fn allows(&self, method: HttpMethod) -> bool {
        self.methods
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(method.as_str()))
    }

    pub fn item_path(&self, id: &Id) -> String {
        format!("{}/{id}", self.base_path.trim_end_matches('/'))
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointParams {
    pub path: Option<StringRecord<ScalarValue>>,
    pub query: Option<StringRecord<ScalarValue>>,
    pub body: Option<Value>,
    pub headers: Option<StringRecord<String>>,
}

impl EndpointParams {
    /// Substitutes `{name}` segments of `template` with path parameters.
    pub fn expand(&self, template: &str) -> SdkResult<String> {
        let mut expanded = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            expanded.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                SdkError::new(
                    SdkErrorKind::InvalidInput,
                    format!("unterminated parameter in path template '{template}'"),
                )
            })?;
            let name = &after[..close];
            let value = self
                .path
                .as_ref()
                .and_then(|params| params.get(name))
                .ok_or_else(|| {
                    SdkError::new(
                        SdkErrorKind::InvalidInput,
                        format!("missing path parameter '{name}' for '{template}'"),
                    )
                })?;
            expanded.push_str(&value.to_string());
            rest = &after[close + 1..];
        }
        expanded.push_str(rest);
        Ok(expanded)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointResponse<T = Value> {
    pub data: T,
    pub status: u16,
    pub headers: StringRecord<String>,
    pub timestamp: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRetry {
    pub max_attempts: u32,
    pub delay: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RateLimit {
    pub requests: u32,
    /// Window length in milliseconds.
    pub window: u64,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    pub path: String,
    pub method: String,
    pub requires_auth: bool,
    pub timeout: Option<u64>,
    pub retry: Option<EndpointRetry>,
    pub rate_limit: Option<RateLimit>,
}

impl EndpointConfig {
    pub fn http_method(&self) -> Option<HttpMethod> {
        self.method.to_ascii_uppercase().parse().ok()
    }
}
