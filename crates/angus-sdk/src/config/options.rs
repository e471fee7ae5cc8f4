use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::level_filters::LevelFilter;

use crate::common::StringRecord;
use crate::error::{SdkError, SdkErrorKind, SdkResult};

crate::literal_enum! {
    #[derive(Default)]
    pub enum Environment {
        #[default]
        Development = "development",
        Testing = "testing",
        Staging = "staging",
        Production = "production",
    }
}

crate::literal_enum! {
    #[derive(Default)]
    pub enum LogLevel {
        Error = "error",
        Warn = "warn",
        #[default]
        Info = "info",
        Debug = "debug",
        Trace = "trace",
    }
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        self.as_str()
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

crate::literal_enum! {
    pub enum DatabaseType {
        Mysql = "mysql",
        Postgresql = "postgresql",
        Sqlite = "sqlite",
        Mongodb = "mongodb",
        Redis = "redis",
    }
}

impl DatabaseType {
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Mysql => Some(3306),
            Self::Postgresql => Some(5432),
            Self::Sqlite => None,
            Self::Mongodb => Some(27017),
            Self::Redis => Some(6379),
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub enable_user_registration: bool,
    pub enable_email_notifications: bool,
    pub enable_file_uploads: bool,
    pub enable_rate_limiting: bool,
    pub enable_caching: bool,
    pub enable_metrics: bool,
    pub custom: Option<StringRecord<bool>>,
}

impl FeatureFlags {
    /// Looks up a built-in flag by its wire name, then the custom flags.
    pub fn is_enabled(&self, name: &str) -> bool {
        match name {
            "enableUserRegistration" => self.enable_user_registration,
            "enableEmailNotifications" => self.enable_email_notifications,
            "enableFileUploads" => self.enable_file_uploads,
            "enableRateLimiting" => self.enable_rate_limiting,
            "enableCaching" => self.enable_caching,
            "enableMetrics" => self.enable_metrics,
            other => self
                .custom
                .as_ref()
                .and_then(|custom| custom.get(other).copied())
                .unwrap_or(false),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPoolConfig {
    pub min: u32,
    pub max: u32,
    pub timeout: u64,
    pub idle_timeout: u64,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslConfig {
    pub enabled: bool,
    pub cert: Option<String>,
    pub key: Option<String>,
    pub ca: Option<String>,
    pub reject_unauthorized: Option<bool>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub database_type: DatabaseType,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub username: String,
    pub password: String,
    pub pool: ConnectionPoolConfig,
    pub ssl: Option<SslConfig>,
}

#[skip_serializing_none]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_ms: u64,
    pub skip_successful_requests: Option<bool>,
    pub skip_failed_requests: Option<bool>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    pub origins: Vec<String>,
    pub methods: Vec<String>,
    pub headers: Vec<String>,
    pub credentials: bool,
}

impl CorsConfig {
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub base_url: String,
    pub version: String,
    pub timeout: u64,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub password_rounds: u32,
    pub session_timeout: u64,
    pub max_login_attempts: u32,
    pub lockout_duration: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub environment: Environment,
    pub debug: bool,
    pub log_level: LogLevel,
    pub features: FeatureFlags,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    pub fn from_str(input: &str, format: ConfigFormat) -> SdkResult<Self> {
        let parsed = match format {
            ConfigFormat::Json => serde_json::from_str(input).map_err(|error| error.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(input).map_err(|error| error.to_string()),
        };
        parsed.map_err(|message| {
            SdkError::new(
                SdkErrorKind::Parse,
                format!("invalid app config: {message}"),
            )
        })
    }

    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            SdkError::new(
                SdkErrorKind::InvalidInput,
                format!("unsupported config file extension: {}", path.display()),
            )
        })?;
        let input = fs::read_to_string(path).map_err(|error| {
            SdkError::new(
                SdkErrorKind::Io,
                format!("failed to read {}: {error}", path.display()),
            )
        })?;
        let config = Self::from_str(&input, format)?;
        tracing::debug!(
            path = %path.display(),
            name = %config.name,
            environment = %config.environment,
            "loaded app config"
        );
        Ok(config)
    }

    /// Effective log level: `debug` forces at least DEBUG.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug && matches!(self.log_level, LogLevel::Error | LogLevel::Warn | LogLevel::Info)
        {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
