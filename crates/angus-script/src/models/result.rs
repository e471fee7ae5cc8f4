use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::models::{
    Assertion, DefaultExtraction, HttpExtraction, MailProtocol, SampleResultConstants,
};
use crate::protocols::{
    FtpRequest0, FtpResponse, JdbcRequest0, JdbcResponse, LdapRequest0, LdapResponse,
    MailRequest0, MailResponses, Request0, Response, SmtpMail, SmtpResponse, TcpRequest0,
    TcpResponse, WebSocketRequest0, WebSocketResponse,
};

/// Fields every sample result carries.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleOutcome {
    pub name: String,
    pub success: bool,
    pub fail_message: Option<String>,
}

impl SampleOutcome {
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            fail_message: None,
        }
    }

    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            fail_message: Some(message.into()),
        }
    }
}

/// Result of one protocol sample: the request as sent, the response and
/// the evaluated assertions.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSample<Q, R, E = DefaultExtraction> {
    #[serde(flatten)]
    pub outcome: SampleOutcome,
    pub request0: Option<Q>,
    pub response: Option<R>,
    pub assertions: Option<Vec<Assertion<E>>>,
}

impl<Q, R, E> ProtocolSample<Q, R, E> {
    pub fn new(outcome: SampleOutcome) -> Self {
        Self {
            outcome,
            request0: None,
            response: None,
            assertions: None,
        }
    }

    pub fn assertions(&self) -> &[Assertion<E>] {
        self.assertions.as_deref().unwrap_or_default()
    }
}

pub type SampleHttpResult = ProtocolSample<Request0, Response, HttpExtraction>;
pub type SampleJdbcResult = ProtocolSample<JdbcRequest0, JdbcResponse>;
pub type SampleFtpResult = ProtocolSample<FtpRequest0, FtpResponse>;
pub type SampleWebSocketResult = ProtocolSample<WebSocketRequest0, WebSocketResponse>;
pub type SampleTcpResult = ProtocolSample<TcpRequest0, TcpResponse>;
pub type SampleSmtpResult = ProtocolSample<SmtpMail, SmtpResponse>;
pub type SampleLdapResult = ProtocolSample<LdapRequest0, LdapResponse>;

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleMailResult {
    #[serde(flatten)]
    pub sample: ProtocolSample<MailRequest0, MailResponses>,
    pub protocol: Option<MailProtocol>,
}

/// Result of a plugin-defined target; `result` is plugin specific.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleExtensionResult {
    #[serde(flatten)]
    pub outcome: SampleOutcome,
    pub result: Option<BTreeMap<String, Value>>,
    pub assertions: Option<Vec<Assertion<DefaultExtraction>>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target")]
pub enum SampleResult {
    #[serde(rename = "EXTENSION")]
    Extension(SampleExtensionResult),
    #[serde(rename = "HTTP")]
    Http(SampleHttpResult),
    #[serde(rename = "JDBC")]
    Jdbc(SampleJdbcResult),
    #[serde(rename = "FTP")]
    Ftp(SampleFtpResult),
    #[serde(rename = "WEBSOCKET")]
    WebSocket(SampleWebSocketResult),
    #[serde(rename = "TCP")]
    Tcp(SampleTcpResult),
    #[serde(rename = "SMTP")]
    Smtp(SampleSmtpResult),
    #[serde(rename = "MAIL")]
    Mail(SampleMailResult),
    #[serde(rename = "LDAP")]
    Ldap(SampleLdapResult),
}

impl SampleResult {
    pub fn target(&self) -> &'static str {
        match self {
            Self::Extension(_) => SampleResultConstants::TYPE_TARGET_EXTENSION,
            Self::Http(_) => SampleResultConstants::TYPE_TARGET_HTTP,
            Self::Jdbc(_) => SampleResultConstants::TYPE_TARGET_JDBC,
            Self::Ftp(_) => SampleResultConstants::TYPE_TARGET_FTP,
            Self::WebSocket(_) => SampleResultConstants::TYPE_TARGET_WEBSOCKET,
            Self::Tcp(_) => SampleResultConstants::TYPE_TARGET_TCP,
            Self::Smtp(_) => SampleResultConstants::TYPE_TARGET_SMTP,
            Self::Mail(_) => SampleResultConstants::TYPE_TARGET_MAIL,
            Self::Ldap(_) => SampleResultConstants::TYPE_TARGET_LDAP,
        }
    }

    pub fn outcome(&self) -> &SampleOutcome {
        match self {
            Self::Extension(result) => &result.outcome,
            Self::Http(result) => &result.outcome,
            Self::Jdbc(result) => &result.outcome,
            Self::Ftp(result) => &result.outcome,
            Self::WebSocket(result) => &result.outcome,
            Self::Tcp(result) => &result.outcome,
            Self::Smtp(result) => &result.outcome,
            Self::Mail(result) => &result.sample.outcome,
            Self::Ldap(result) => &result.outcome,
        }
    }

    pub fn name(&self) -> &str {
        &self.outcome().name
    }

    pub fn is_success(&self) -> bool {
        self.outcome().success
    }

    pub fn fail_message(&self) -> Option<&str> {
        self.outcome().fail_message.as_deref()
    }
}
