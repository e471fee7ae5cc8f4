use std::path::PathBuf;

use angus_sdk::config::ValidationResult;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ScriptErrorKind {
    Io,
    Parse,
    Encode,
    UnsupportedFormat,
    Invalid,
}

#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind:?}: {message}")]
pub struct ScriptError {
    pub kind: ScriptErrorKind,
    pub path: Option<PathBuf>,
    pub message: String,
    pub report: Option<ValidationResult>,
}

impl ScriptError {
    pub fn new(kind: ScriptErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: None,
            message: message.into(),
            report: None,
        }
    }

    pub fn at(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn invalid(report: ValidationResult) -> Self {
        let message = match report.errors.first() {
            Some(first) if report.errors.len() > 1 => {
                format!("{first} (and {} more)", report.errors.len() - 1)
            }
            Some(first) => first.to_string(),
            None => "script failed checks".to_string(),
        };
        Self {
            kind: ScriptErrorKind::Invalid,
            path: None,
            message,
            report: Some(report),
        }
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ScriptErrorKind::Parse, error.to_string())
    }
}

impl From<serde_yaml::Error> for ScriptError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::new(ScriptErrorKind::Parse, error.to_string())
    }
}

pub type ScriptResult<T> = Result<T, ScriptError>;
