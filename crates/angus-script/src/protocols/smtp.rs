use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{
    DefaultExtraction, Extensions, TargetBase, TargetProjection, TargetSampling, TimeLine,
};
use crate::protocols::MailServer;

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpMailContent {
    pub subject: Option<String>,
    pub suppress_subject: Option<bool>,
    pub message: Option<String>,
    pub plain_body: Option<bool>,
    pub include_timestamp: Option<bool>,
    pub local_attach_files: Option<Vec<String>>,
    pub local_attach_base64_contents: Option<Vec<String>>,
    pub message_size_statistics: Option<bool>,
    pub header_fields: Option<BTreeMap<String, String>>,
    pub send_eml_message: Option<bool>,
    pub local_eml_message_file: Option<String>,
    pub local_eml_message_base64_content: Option<String>,
    pub enable_debug_logging: Option<bool>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpMail {
    pub mail_from: Option<String>,
    pub reply_to: Option<String>,
    /// Comma separated recipients.
    pub receiver_to: String,
    #[serde(rename = "receiverCC")]
    pub receiver_cc: Option<String>,
    #[serde(rename = "receiverBCC")]
    pub receiver_bcc: Option<String>,
    pub content: SmtpMailContent,
    pub extensions: Option<Extensions>,
}

impl SmtpMail {
    /// Every recipient across to, cc and bcc.
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.receiver_to.as_str()),
            self.receiver_cc.as_deref(),
            self.receiver_bcc.as_deref(),
        ]
        .into_iter()
        .flatten()
        .flat_map(|list| list.split(','))
        .map(str::trim)
        .filter(|address| !address.is_empty())
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpResponse {
    pub timeline: Option<TimeLine>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Smtp {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    pub server: MailServer,
    pub mail: SmtpMail,
    #[builder(default, setter(strip_option))]
    pub response: Option<SmtpResponse>,
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
    fn recipients_span_all_lists() {
        let mail: SmtpMail = serde_json::from_value(json!({
            "receiverTo": "a@example.com, b@example.com",
            "receiverCC": "c@example.com",
            "receiverBCC": "",
            "content": {"subject": "hi"}
        }))
        .unwrap();

        assert_eq!(
            mail.recipients().collect::<Vec<_>>(),
            vec!["a@example.com", "b@example.com", "c@example.com"]
        );
        let written = serde_json::to_value(&mail).unwrap();
        assert_eq!(written["receiverCC"], "c@example.com");
    }
}
