use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::api::ApiRequest;
use crate::common::{Id, StringRecord};
use crate::error::SdkResult;

crate::literal_enum! {
    #[derive(Default)]
    pub enum AuthType {
        #[default]
        None = "none",
        ApiKey = "api_key",
        Bearer = "bearer",
        Basic = "basic",
        Oauth2 = "oauth2",
    }
}

/// Produces a fresh access token when the current one is rejected.
pub trait TokenRefresher: Send + Sync {
    fn refresh(&self) -> SdkResult<String>;
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    #[serde(rename = "type")]
    pub auth_type: AuthType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip)]
    pub refresh_token: Option<Arc<dyn TokenRefresher>>,
}

impl Debug for AuthConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("auth_type", &self.auth_type)
            .field("api_key", &self.api_key.as_ref().map(|_| "******"))
            .field("token", &self.token.as_ref().map(|_| "******"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "******"))
            .field("refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}

impl AuthConfig {
    /// Header name and value to attach for this auth scheme, if any.
    pub fn authorization_header(&self) -> Option<(String, String)> {
        match self.auth_type {
            AuthType::None => None,
            AuthType::ApiKey => self
                .api_key
                .as_ref()
                .map(|key| ("X-API-Key".to_string(), key.clone())),
            AuthType::Bearer | AuthType::Oauth2 => self
                .token
                .as_ref()
                .map(|token| ("Authorization".to_string(), format!("Bearer {token}"))),
            AuthType::Basic => {
                let username = self.username.as_deref()?;
                let password = self.password.as_deref().unwrap_or_default();
                Some((
                    "Authorization".to_string(),
                    format!("Basic {}", STANDARD.encode(format!("{username}:{password}"))),
                ))
            }
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: u64,
    pub max_delay: Option<u64>,
    pub exponential_backoff: Option<bool>,
    pub retryable_statuses: Option<Vec<u16>>,
}

impl RetryConfig {
    pub fn is_retryable(&self, status: u16) -> bool {
        match &self.retryable_statuses {
            Some(statuses) => statuses.contains(&status),
            None => status >= 500,
        }
    }

    /// Delay in milliseconds before retry number `retry` (1-based), capped at
    /// `maxDelay`.
    pub fn backoff(&self, retry: u32) -> u64 {
        let delay = if self.exponential_backoff.unwrap_or(false) {
            let shift = retry.saturating_sub(1).min(16);
            self.base_delay.saturating_mul(1 << shift)
        } else {
            self.base_delay
        };
        match self.max_delay {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[builder(setter(into))]
    pub base_url: String,
    #[builder(default, setter(strip_option, into))]
    pub version: Option<String>,
    #[builder(default, setter(strip_option))]
    pub timeout: Option<u64>,
    #[builder(default, setter(strip_option))]
    pub default_headers: Option<StringRecord<String>>,
    #[builder(default, setter(strip_option))]
    pub auth: Option<AuthConfig>,
    #[builder(default, setter(strip_option))]
    pub retry: Option<RetryConfig>,
    #[builder(default, setter(strip_option))]
    pub enable_logging: Option<bool>,
}

impl ClientConfig {
    /// Joins `path` onto the base URL, inserting the API version segment when
    /// one is configured.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        match self.version.as_deref() {
            Some(version) if !version.is_empty() => format!("{base}/{version}/{path}"),
            _ => format!("{base}/{path}"),
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSession {
    pub session_id: String,
    pub user_id: Option<Id>,
    pub created_at: String,
    pub expires_at: String,
    pub metadata: Option<BTreeMap<String, Value>>,
}

pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: ApiRequest) -> ApiRequest;
}

pub trait ResponseInterceptor: Send + Sync {
    fn intercept(&self, response: Value) -> Value;
}

/// Ordered interceptors applied around every request.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    requests: Vec<Arc<dyn RequestInterceptor>>,
    responses: Vec<Arc<dyn ResponseInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_request(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.requests.push(interceptor);
        self
    }

    pub fn on_response(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.responses.push(interceptor);
        self
    }

    pub fn apply_request(&self, request: ApiRequest) -> ApiRequest {
        self.requests
            .iter()
            .fold(request, |request, interceptor| interceptor.intercept(request))
    }

    pub fn apply_response(&self, response: Value) -> Value {
        self.responses
            .iter()
            .fold(response, |response, interceptor| interceptor.intercept(response))
    }

    pub fn len(&self) -> usize {
        self.requests.len() + self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

crate::literal_enum! {
    pub enum ClientEventType {
        RequestStart = "request_start",
        RequestSuccess = "request_success",
        RequestError = "request_error",
        RequestRetry = "request_retry",
        SessionCreated = "session_created",
        SessionExpired = "session_expired",
        AuthRequired = "auth_required",
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEvent {
    #[serde(rename = "type")]
    pub event_type: ClientEventType,
    pub timestamp: String,
    pub data: Option<BTreeMap<String, Value>>,
    pub request_id: Option<String>,
}
