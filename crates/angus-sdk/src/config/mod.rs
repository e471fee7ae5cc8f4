pub mod options;
pub mod schema;
pub mod validation;
pub mod validator;

pub use options::{
    ApiConfig, AppConfig, ConfigFormat, ConnectionPoolConfig, CorsConfig, DatabaseConfig,
    DatabaseType, Environment, FeatureFlags, LogLevel, RateLimitConfig, SecurityConfig, SslConfig,
};
pub use schema::{
    ConfigSchema, ConfigSection, ConfigSource, ConfigValue, PropertySchema, PropertyType,
    ValidationRules,
};
pub use validation::{
    ErrorSeverity, ValidationContext, ValidationError, ValidationErrorCode, ValidationOptions,
    ValidationResult, ValidationWarning, Validator,
};
pub use validator::SchemaValidator;
