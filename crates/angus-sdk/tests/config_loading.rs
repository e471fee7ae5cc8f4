use std::fs;

use angus_sdk::SdkErrorKind;
use angus_sdk::config::{AppConfig, DatabaseType, Environment, LogLevel};
use serde_json::json;

fn sample_config() -> serde_json::Value {
    json!({
        "name": "angus",
        "version": "2.1.0",
        "environment": "production",
        "debug": false,
        "logLevel": "error",
        "features": {
            "enableUserRegistration": false,
            "enableEmailNotifications": true,
            "enableFileUploads": true,
            "enableRateLimiting": true,
            "enableCaching": true,
            "enableMetrics": true
        },
        "database": {
            "type": "mysql",
            "host": "127.0.0.1",
            "port": 3306,
            "name": "angus",
            "username": "root",
            "password": "root",
            "pool": {"min": 2, "max": 20, "timeout": 1000, "idleTimeout": 30000},
            "ssl": {"enabled": true, "rejectUnauthorized": false}
        },
        "api": {
            "baseUrl": "http://localhost:8080",
            "version": "v1",
            "timeout": 3000,
            "rateLimit": {"maxRequests": 50, "windowMs": 1000, "skipSuccessfulRequests": true},
            "cors": {"origins": ["*"], "methods": ["GET"], "headers": [], "credentials": false}
        },
        "security": {
            "jwtSecret": "s",
            "jwtExpiration": 60,
            "passwordRounds": 10,
            "sessionTimeout": 600,
            "maxLoginAttempts": 3,
            "lockoutDuration": 300
        }
    })
}

#[test]
fn loads_json_config_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.json");
    fs::write(&path, serde_json::to_string_pretty(&sample_config()).unwrap()).unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert!(config.is_production());
    assert_eq!(config.database.database_type, DatabaseType::Mysql);
    assert_eq!(config.database.database_type.default_port(), Some(config.database.port));
    assert_eq!(config.effective_log_level(), LogLevel::Error);
    assert!(config.api.cors.allows_origin("https://anything.example"));
}

#[test]
fn yaml_and_json_produce_the_same_config() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("app.json");
    let yaml_path = dir.path().join("app.yaml");
    fs::write(&json_path, sample_config().to_string()).unwrap();
    fs::write(&yaml_path, serde_yaml::to_string(&sample_config()).unwrap()).unwrap();

    let from_json = AppConfig::load(&json_path).unwrap();
    let from_yaml = AppConfig::load(&yaml_path).unwrap();

    assert_eq!(from_json, from_yaml);
    assert_eq!(from_yaml.environment, Environment::Production);
}

#[test]
fn unsupported_extension_and_missing_file_are_distinct_errors() {
    let dir = tempfile::tempdir().unwrap();

    let unsupported = AppConfig::load(dir.path().join("app.ini")).unwrap_err();
    assert_eq!(unsupported.kind, SdkErrorKind::InvalidInput);

    let missing = AppConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert_eq!(missing.kind, SdkErrorKind::Io);
}

#[test]
fn written_config_omits_absent_optionals() {
    let config: AppConfig = serde_json::from_value(sample_config()).unwrap();
    let written = serde_json::to_value(&config).unwrap();

    assert!(written["features"].get("custom").is_none());
    assert!(written["database"]["ssl"].get("cert").is_none());
    assert!(written["api"]["rateLimit"].get("skipFailedRequests").is_none());
    assert_eq!(written["database"]["ssl"]["rejectUnauthorized"], false);
}
