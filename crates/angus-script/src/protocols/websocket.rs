use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{
    ContentEncoding, DefaultExtraction, Extensions, TargetBase, TargetProjection, TargetSampling,
    TimeLine, TimeValue, WebSocketMessageMode,
};
use crate::protocols::{Parameter, Server};

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSocketSetting {
    pub connect_timeout: Option<TimeValue>,
    pub response_timeout: Option<TimeValue>,
    pub max_reconnections: Option<u32>,
    pub reconnection_interval: Option<TimeValue>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSocketResponse {
    pub data: Option<String>,
    pub size: Option<u64>,
    pub timeline: Option<TimeLine>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSocketRequest0 {
    pub data: Option<String>,
    pub size: Option<u64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct WebSocket {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    #[builder(default, setter(strip_option))]
    pub apis_id: Option<i64>,
    #[builder(default, setter(strip_option, into))]
    pub url: Option<String>,
    #[builder(default, setter(strip_option))]
    pub server: Option<Server>,
    #[builder(default, setter(strip_option, into))]
    pub endpoint: Option<String>,
    #[builder(default, setter(strip_option))]
    pub parameters: Option<Vec<Parameter>>,
    #[builder(default)]
    pub mode: WebSocketMessageMode,
    #[builder(default, setter(strip_option, into))]
    pub message: Option<String>,
    #[builder(default, setter(strip_option))]
    pub message_encoding: Option<ContentEncoding>,
    #[builder(default, setter(strip_option))]
    pub setting: Option<WebSocketSetting>,
    #[builder(default, setter(strip_option))]
    pub response: Option<WebSocketResponse>,
    #[serde(flatten)]
    #[builder(default)]
    pub sampling: TargetSampling<DefaultExtraction, DefaultExtraction>,
    #[serde(skip)]
    #[builder(default, setter(skip))]
    pub projection: TargetProjection,
}

impl WebSocket {
    /// Sending modes need a message to send.
    pub fn is_missing_message(&self) -> bool {
        self.mode.sends() && self.message.is_none()
    }

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
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn receive_only_sockets_need_no_message() {
        let socket = WebSocket::builder()
            .url("ws://localhost:8080/feed")
            .mode(WebSocketMessageMode::OnlyReceive)
            .build();
        assert!(!socket.is_missing_message());

        let chatty = WebSocket::builder().url("ws://localhost:8080/chat").build();
        assert_eq!(chatty.mode, WebSocketMessageMode::SendAndReceive);
        assert!(chatty.is_missing_message());
    }

    #[test]
    fn settings_accept_mixed_time_forms() {
        let setting: WebSocketSetting = serde_json::from_value(json!({
            "connectTimeout": "3s",
            "reconnectionInterval": {"value": 1, "unit": "m"},
            "maxReconnections": 5
        }))
        .unwrap();

        assert_eq!(setting.connect_timeout, Some(TimeValue::seconds(3)));
        assert_eq!(setting.reconnection_interval, Some(TimeValue::minutes(1)));
    }

    #[test]
    fn url_falls_back_to_server_and_endpoint() {
        let socket = WebSocket::builder()
            .server(Server::new("ws://push.example.com/"))
            .endpoint("/v1/stream")
            .build();
        assert_eq!(
            socket.target_url().as_deref(),
            Some("ws://push.example.com/v1/stream")
        );
    }
}
