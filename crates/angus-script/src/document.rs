use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::checks::check_script;
use crate::models::{AngusScript, SampleResult, ScriptError, ScriptErrorKind, ScriptResult};

/// Text encoding of a script document.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ScriptFormat {
    Json,
    Yaml,
}

impl ScriptFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn of(path: &Path) -> ScriptResult<Self> {
        Self::from_path(path).ok_or_else(|| {
            ScriptError::new(
                ScriptErrorKind::UnsupportedFormat,
                format!("unsupported script extension: {}", path.display()),
            )
            .at(path)
        })
    }
}

fn decode<T: DeserializeOwned>(input: &str, format: ScriptFormat) -> ScriptResult<T> {
    let value = match format {
        ScriptFormat::Json => serde_json::from_str(input)?,
        ScriptFormat::Yaml => serde_yaml::from_str(input)?,
    };
    Ok(value)
}

fn encode<T: Serialize>(value: &T, format: ScriptFormat) -> ScriptResult<String> {
    let encoded = match format {
        ScriptFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|error| error.to_string())
        }
        ScriptFormat::Yaml => serde_yaml::to_string(value).map_err(|error| error.to_string()),
    };
    encoded.map_err(|message| ScriptError::new(ScriptErrorKind::Encode, message))
}

pub fn from_str(input: &str, format: ScriptFormat) -> ScriptResult<AngusScript> {
    decode(input, format)
}

pub fn to_string(script: &AngusScript, format: ScriptFormat) -> ScriptResult<String> {
    encode(script, format)
}

/// Decodes a sample result payload reported by the engine.
pub fn decode_sample_result(input: &str, format: ScriptFormat) -> ScriptResult<SampleResult> {
    decode(input, format)
}

/// Reads a script, picking the format from the file extension. Scripts are
/// not checked; see [`load_checked`].
pub fn load(path: impl AsRef<Path>) -> ScriptResult<AngusScript> {
    let path = path.as_ref();
    let format = ScriptFormat::of(path)?;
    let input = fs::read_to_string(path).map_err(|error| {
        ScriptError::new(
            ScriptErrorKind::Io,
            format!("failed to read {}: {error}", path.display()),
        )
        .at(path)
    })?;
    let script = from_str(&input, format).map_err(|error| error.at(path))?;
    debug!(
        path = %path.display(),
        title = script.title().unwrap_or_default(),
        pipelines = script.pipelines().len(),
        "loaded script"
    );
    Ok(script)
}

/// Reads a script and rejects it when any check fails. Warnings are logged
/// and do not reject.
pub fn load_checked(path: impl AsRef<Path>) -> ScriptResult<AngusScript> {
    let path = path.as_ref();
    let script = load(path)?;
    let report = check_script(&script);
    for warning in &report.warnings {
        warn!(path = %warning.path, code = %warning.code, "{}", warning.message);
    }
    if !report.valid {
        return Err(ScriptError::invalid(report).at(path));
    }
    Ok(script)
}

pub fn save(script: &AngusScript, path: impl AsRef<Path>) -> ScriptResult<()> {
    let path = path.as_ref();
    let format = ScriptFormat::of(path)?;
    let text = to_string(script, format)?;
    fs::write(path, text).map_err(|error| {
        ScriptError::new(
            ScriptErrorKind::Io,
            format!("failed to write {}: {error}", path.display()),
        )
        .at(path)
    })?;
    debug!(path = %path.display(), "saved script");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ScriptFormat::from_path(Path::new("load.YAML")),
            Some(ScriptFormat::Yaml)
        );
        assert_eq!(
            ScriptFormat::from_path(Path::new("load.json")),
            Some(ScriptFormat::Json)
        );
        assert_eq!(ScriptFormat::from_path(Path::new("load.toml")), None);
    }

    #[test]
    fn parse_errors_keep_their_kind() {
        let error = from_str("type: NOT_A_TYPE", ScriptFormat::Yaml).unwrap_err();
        assert_eq!(error.kind, ScriptErrorKind::Parse);
    }

    struct Unwritable;

    impl Serialize for Unwritable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("value cannot be written"))
        }
    }

    #[test]
    fn write_failures_are_encode_errors() {
        for format in [ScriptFormat::Json, ScriptFormat::Yaml] {
            let error = encode(&Unwritable, format).unwrap_err();
            assert_eq!(error.kind, ScriptErrorKind::Encode);
            assert!(error.message.contains("value cannot be written"));
        }
    }

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let error = load("/nonexistent/script.toml").unwrap_err();
        assert_eq!(error.kind, ScriptErrorKind::UnsupportedFormat);
        assert!(error.path.is_some());
    }
}
