use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::common::{ScalarValue, StringRecord};
use crate::error::{SdkError, SdkErrorKind};

crate::literal_enum! {
    pub enum HttpMethod {
        Get = "GET",
        Post = "POST",
        Put = "PUT",
        Patch = "PATCH",
        Delete = "DELETE",
        Head = "HEAD",
        Options = "OPTIONS",
    }
}

impl HttpMethod {
    pub fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum HttpStatus {
    Ok,
    Created,
    NoContent,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnprocessableEntity,
    InternalServerError,
    BadGateway,
    ServiceUnavailable,
}

impl HttpStatus {
    pub const ALL: [HttpStatus; 12] = [
        Self::Ok,
        Self::Created,
        Self::NoContent,
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::Conflict,
        Self::UnprocessableEntity,
        Self::InternalServerError,
        Self::BadGateway,
        Self::ServiceUnavailable,
    ];

    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::UnprocessableEntity => 422,
            Self::InternalServerError => 500,
            Self::BadGateway => 502,
            Self::ServiceUnavailable => 503,
        }
    }

    pub fn is_success(self) -> bool {
        (200..300).contains(&self.code())
    }

    pub fn is_server_error(self) -> bool {
        self.code() >= 500
    }
}

impl From<HttpStatus> for u16 {
    fn from(value: HttpStatus) -> Self {
        value.code()
    }
}

impl TryFrom<u16> for HttpStatus {
    type Error = SdkError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == value)
            .ok_or_else(|| {
                SdkError::new(
                    SdkErrorKind::InvalidInput,
                    format!("unsupported http status code {value}"),
                )
            })
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRequest {
    pub headers: Option<StringRecord<String>>,
    pub query: Option<StringRecord<ScalarValue>>,
    pub timeout: Option<u64>,
    pub request_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathRequest {
    #[serde(flatten)]
    pub base: BaseRequest,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyRequest<T> {
    #[serde(flatten)]
    pub base: BaseRequest,
    pub path: String,
    pub body: T,
}

/// Outgoing request, discriminated by `method`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "UPPERCASE")]
pub enum ApiRequest<T = Value> {
    Get(PathRequest),
    Post(BodyRequest<T>),
    Put(BodyRequest<T>),
    Patch(BodyRequest<T>),
    Delete(PathRequest),
}

impl<T> ApiRequest<T> {
    pub fn get(path: impl Into<String>) -> Self {
        Self::Get(PathRequest {
            base: BaseRequest::default(),
            path: path.into(),
        })
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::Delete(PathRequest {
            base: BaseRequest::default(),
            path: path.into(),
        })
    }

    pub fn post(path: impl Into<String>, body: T) -> Self {
        Self::Post(BodyRequest {
            base: BaseRequest::default(),
            path: path.into(),
            body,
        })
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Get(_) => HttpMethod::Get,
            Self::Post(_) => HttpMethod::Post,
            Self::Put(_) => HttpMethod::Put,
            Self::Patch(_) => HttpMethod::Patch,
            Self::Delete(_) => HttpMethod::Delete,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Get(request) | Self::Delete(request) => &request.path,
            Self::Post(request) | Self::Put(request) | Self::Patch(request) => &request.path,
        }
    }

    pub fn base(&self) -> &BaseRequest {
        match self {
            Self::Get(request) | Self::Delete(request) => &request.base,
            Self::Post(request) | Self::Put(request) | Self::Patch(request) => &request.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseRequest {
        match self {
            Self::Get(request) | Self::Delete(request) => &mut request.base,
            Self::Post(request) | Self::Put(request) | Self::Patch(request) => &mut request.base,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.base_mut()
            .headers
            .get_or_insert_with(StringRecord::new)
            .insert(name.into(), value.into());
        self
    }
}

crate::literal_enum! {
    #[derive(Default)]
    pub enum RequestPriority {
        Low = "low",
        #[default]
        Normal = "normal",
        High = "high",
        Urgent = "urgent",
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRetryConfig {
    pub max_attempts: u32,
    pub delay: u64,
    pub exponential_backoff: Option<bool>,
    pub retryable_statuses: Option<Vec<HttpStatus>>,
}

impl RequestRetryConfig {
    /// Whether a failed attempt (1-based) with `status` should be retried.
    pub fn should_retry(&self, attempt: u32, status: HttpStatus) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        match &self.retryable_statuses {
            Some(statuses) => statuses.contains(&status),
            None => status.is_server_error(),
        }
    }

    /// Delay in milliseconds before the attempt following `attempt`.
    pub fn delay_after(&self, attempt: u32) -> u64 {
        if self.exponential_backoff.unwrap_or(false) {
            let shift = attempt.saturating_sub(1).min(16);
            self.delay.saturating_mul(1 << shift)
        } else {
            self.delay
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    pub timeout: Option<u64>,
    pub retry: Option<RequestRetryConfig>,
    pub headers: Option<StringRecord<String>>,
    pub with_credentials: Option<bool>,
    pub priority: Option<RequestPriority>,
}
