use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{
    ContentEncoding, DefaultExtraction, Extensions, TargetBase, TargetProjection, TargetSampling,
    TimeLine, TimeValue,
};

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpServer {
    pub server: String,
    pub port: u16,
    pub connect_timeout: Option<TimeValue>,
    pub response_timeout: Option<TimeValue>,
    pub extensions: Option<Extensions>,
}

impl TcpServer {
    pub fn new(server: impl Into<String>, port: u16) -> Self {
        Self {
            server: server.into(),
            port,
            connect_timeout: None,
            response_timeout: None,
            extensions: None,
        }
    }
}

/// Socket options and framing for the raw TCP client.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpSetting {
    pub tcp_client_impl_class: String,
    pub re_use_connection: Option<bool>,
    pub set_no_delay: Option<bool>,
    pub so_linger: Option<i32>,
    pub eol_byte: Option<u8>,
    pub eom_byte: Option<u8>,
    pub binary_prefix_length: Option<u32>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpResponse {
    pub data: Option<String>,
    pub size: Option<u64>,
    pub timeline: Option<TimeLine>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpRequest0 {
    pub data: Option<String>,
    pub size: Option<u64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Tcp {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    pub server: TcpServer,
    #[builder(default, setter(strip_option, into))]
    pub data: Option<String>,
    #[builder(default, setter(strip_option))]
    pub data_encoding: Option<ContentEncoding>,
    #[builder(default, setter(strip_option))]
    pub setting: Option<TcpSetting>,
    #[builder(default, setter(strip_option))]
    pub response: Option<TcpResponse>,
    #[serde(flatten)]
    #[builder(default)]
    pub sampling: TargetSampling<DefaultExtraction, DefaultExtraction>,
    #[serde(skip)]
    #[builder(default, setter(skip))]
    pub projection: TargetProjection,
}
