use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{
    DefaultExtraction, Extensions, MailProtocol, SecurityUse, TargetBase, TargetProjection,
    TargetSampling, TimeValue,
};

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailServerSecurity {
    #[serde(rename = "use")]
    pub security_use: SecurityUse,
    pub trust_all_certs: Option<bool>,
    #[serde(rename = "enforceStartTLS")]
    pub enforce_start_tls: Option<bool>,
    pub use_local_trust_store: Option<bool>,
    pub trust_store_path: Option<String>,
    pub trust_store_base64_content: Option<String>,
    pub tls_protocols: Option<String>,
    pub extensions: Option<Extensions>,
}

/// Mail server connection shared by the SMTP and mailbox targets.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailServer {
    pub server: String,
    pub port: u16,
    pub security: MailServerSecurity,
    pub use_auth: Option<bool>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub server_timeout: Option<TimeValue>,
    pub server_connection_timeout: Option<TimeValue>,
    pub extensions: Option<Extensions>,
}

impl MailServer {
    pub fn new(server: impl Into<String>, port: u16) -> Self {
        Self {
            server: server.into(),
            port,
            security: MailServerSecurity::default(),
            use_auth: None,
            username: None,
            password: None,
            server_timeout: None,
            server_connection_timeout: None,
            extensions: None,
        }
    }

    pub fn is_secure(&self) -> bool {
        self.security.security_use != SecurityUse::None
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailBoxSetting {
    pub folder: Option<String>,
    pub delete_message: Option<bool>,
    pub store_mime_message: Option<bool>,
    pub num_messages: Option<i32>,
    pub header_only: Option<bool>,
    pub extensions: Option<Extensions>,
}

impl MailBoxSetting {
    pub fn folder(&self) -> &str {
        self.folder.as_deref().unwrap_or("INBOX")
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailResponse {
    pub headers: Option<String>,
    pub data: Option<String>,
    pub save_mail_path: Option<String>,
    pub content_data: Option<String>,
    pub content_data_encoding: Option<String>,
    pub data_size: Option<u64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailResponses {
    pub responses: Option<Vec<MailResponse>>,
    pub total_count: Option<u32>,
    pub success_count: Option<u32>,
    pub failure_count: Option<u32>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailRequest0 {
    pub data: Option<String>,
    pub size: Option<u64>,
    pub headers: Option<String>,
}

/// Reads messages from a POP3 or IMAP mailbox.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Mail {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    pub protocol: MailProtocol,
    pub server: MailServer,
    #[builder(default)]
    pub mail: MailBoxSetting,
    #[builder(default, setter(strip_option))]
    pub response: Option<MailResponses>,
    #[serde(flatten)]
    #[builder(default)]
    pub sampling: TargetSampling<DefaultExtraction, DefaultExtraction>,
    #[serde(skip)]
    #[builder(default, setter(skip))]
    pub projection: TargetProjection,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn security_keeps_irregular_names() {
        let security = MailServerSecurity {
            security_use: SecurityUse::Starttls,
            enforce_start_tls: Some(true),
            trust_store_base64_content: Some("AAAA".to_string()),
            ..MailServerSecurity::default()
        };

        assert_eq!(
            serde_json::to_value(&security).unwrap(),
            json!({"use": "STARTTLS", "enforceStartTLS": true, "trustStoreBase64Content": "AAAA"})
        );
    }

    #[test]
    fn imap_target_defaults_to_inbox() {
        let mail = Mail::builder()
            .protocol(MailProtocol::Imap)
            .server(MailServer::new("imap.example.com", 993))
            .build();

        assert_eq!(mail.mail.folder(), "INBOX");
        assert!(!mail.server.is_secure());
    }
}
