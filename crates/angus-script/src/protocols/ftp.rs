use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{
    ContentEncoding, DefaultExtraction, Extensions, FtpFileSource, TargetBase, TargetProjection,
    TargetSampling, TimeLine, TimeValue,
};

pub const DEFAULT_FTP_PORT: u16 = 21;

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FtpServer {
    pub server: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub read_timeout: Option<TimeValue>,
    pub connect_timeout: Option<TimeValue>,
    pub extensions: Option<Extensions>,
}

impl FtpServer {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            port: DEFAULT_FTP_PORT,
            username: None,
            password: None,
            read_timeout: None,
            connect_timeout: None,
            extensions: None,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FtpResponse {
    pub code: Option<String>,
    pub size: Option<u64>,
    pub save_file_path: Option<String>,
    pub timeline: Option<TimeLine>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FtpRequest0 {
    pub data: Option<String>,
    pub size: Option<u64>,
}

/// Upload or download of one file against an FTP server.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Ftp {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    pub server: FtpServer,
    #[builder(default, setter(strip_option))]
    pub upload_file: Option<bool>,
    #[builder(default, setter(strip_option))]
    pub upload_file_source: Option<FtpFileSource>,
    #[builder(default, setter(strip_option, into))]
    pub remote_file_name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub remote_file_url: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub local_file_name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub local_file_content: Option<String>,
    #[builder(default, setter(strip_option))]
    pub local_file_content_encoding: Option<ContentEncoding>,
    #[builder(default, setter(strip_option))]
    pub binary_mode: Option<bool>,
    #[builder(default, setter(strip_option))]
    pub response: Option<FtpResponse>,
    #[serde(flatten)]
    #[builder(default)]
    pub sampling: TargetSampling<DefaultExtraction, DefaultExtraction>,
    #[serde(skip)]
    #[builder(default, setter(skip))]
    pub projection: TargetProjection,
}

impl Ftp {
    pub fn is_upload(&self) -> bool {
        self.upload_file.unwrap_or(false)
    }

    pub fn is_binary(&self) -> bool {
        self.binary_mode.unwrap_or(true)
    }

    /// Names of the fields this transfer still needs before it can run.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.is_upload() {
            if self.remote_file_name.is_none() {
                missing.push("remoteFileName");
            }
            if self.local_file_name.is_none() {
                missing.push("localFileName");
            }
            return missing;
        }

        match self.upload_file_source {
            None => missing.push("uploadFileSource"),
            Some(FtpFileSource::LocalFile) => {
                if self.local_file_name.is_none() {
                    missing.push("localFileName");
                }
                if self.local_file_content.is_none() {
                    missing.push("localFileContent");
                }
            }
            Some(FtpFileSource::RemoteFile) => {
                if self.remote_file_name.is_none() {
                    missing.push("remoteFileName");
                }
            }
            Some(FtpFileSource::RemoteUrl) => {
                if self.remote_file_url.is_none() {
                    missing.push("remoteFileUrl");
                }
            }
        }
        missing
    }
}
