//! Configuration for the upload gateway
//!
//! Loaded once from the environment (and an optional `.env` file) at startup,
//! validated, and then shared read-only through `AppState`.

use serde::Serialize;
use shared::observability::{LogConfig, LogFormat, LogLevel};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Lifetime of presigned part URLs unless overridden.
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 3600;

/// Upper bound the provider accepts for presigned URL lifetimes (7 days).
pub const MAX_PRESIGN_EXPIRY_SECS: u64 = 604_800;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            server: ServerConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_kb: usize,
}

impl ServerConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("SERVER_PORT", 5000)?,
            max_request_body_kb: parse_var("MAX_REQUEST_BODY_KB", 256)?,
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("Server port cannot be 0".to_string()));
        }
        if self.max_request_body_kb == 0 {
            return Err(ConfigError::Invalid(
                "Max request body size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_request_body_kb: 256,
        }
    }
}

/// Object storage configuration
#[derive(Debug, Clone, Serialize)]
pub struct StorageConfig {
    pub region: String,
    pub bucket: String,
    /// KMS key used for server-side encryption. `None` falls back to the
    /// account's default `aws/s3` key.
    pub kms_key_id: Option<String>,
    /// Custom endpoint for S3-compatible services (MinIO, LocalStack).
    pub endpoint: Option<String>,
    pub force_path_style: bool,
    pub presign_expiry_secs: u64,
}

impl StorageConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-2".to_string()),
            bucket: env::var("BUCKET_NAME")
                .map_err(|_| ConfigError::EnvVarNotFound("BUCKET_NAME".to_string()))?,
            kms_key_id: optional_var("KMS_KEY_ID"),
            endpoint: optional_var("S3_ENDPOINT"),
            force_path_style: parse_var("S3_FORCE_PATH_STYLE", false)?,
            presign_expiry_secs: parse_var("PRESIGN_EXPIRY_SECS", DEFAULT_PRESIGN_EXPIRY_SECS)?,
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::Invalid("Bucket name cannot be empty".to_string()));
        }
        if self.region.trim().is_empty() {
            return Err(ConfigError::Invalid("Region cannot be empty".to_string()));
        }
        if self.presign_expiry_secs == 0 || self.presign_expiry_secs > MAX_PRESIGN_EXPIRY_SECS {
            return Err(ConfigError::Invalid(format!(
                "Presign expiry must be between 1 and {} seconds",
                MAX_PRESIGN_EXPIRY_SECS
            )));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: "us-east-2".to_string(),
            bucket: "uploads".to_string(),
            kms_key_id: None,
            endpoint: None,
            force_path_style: false,
            presign_expiry_secs: DEFAULT_PRESIGN_EXPIRY_SECS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    pub fn from_env() -> ConfigResult<Self> {
        let config = Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        };
        // Unknown level or format names fail here, before logging starts.
        config.to_log_config("upload-gateway")?;
        Ok(config)
    }

    pub fn to_log_config(&self, service_name: &str) -> ConfigResult<LogConfig> {
        let level = LogLevel::from_str(&self.level).map_err(|_| ConfigError::InvalidValue {
            name: "LOG_LEVEL".to_string(),
            value: self.level.clone(),
        })?;
        let format = LogFormat::from_str(&self.format).map_err(|_| ConfigError::InvalidValue {
            name: "LOG_FORMAT".to_string(),
            value: self.format.clone(),
        })?;

        Ok(LogConfig {
            level,
            format,
            service_name: service_name.to_string(),
            include_line_numbers: format != LogFormat::Json,
            include_thread_ids: format == LogFormat::Json,
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> ConfigResult<T> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> ConfigResult<T> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = test_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.presign_expiry_secs, 3600);
        assert_eq!(config.server.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_server_config_validation() {
        let mut config = ServerConfig::default();
        config.port = 0;
        assert!(config.validate().is_err());

        config.port = 8080;
        config.max_request_body_kb = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_config_validation() {
        let mut config = StorageConfig::default();
        config.bucket = "  ".to_string();
        assert!(config.validate().is_err());

        config.bucket = "media".to_string();
        config.presign_expiry_secs = 0;
        assert!(config.validate().is_err());

        config.presign_expiry_secs = MAX_PRESIGN_EXPIRY_SECS + 1;
        assert!(config.validate().is_err());

        config.presign_expiry_secs = MAX_PRESIGN_EXPIRY_SECS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u16>("SERVER_PORT", " 8080 ").unwrap(), 8080);
        assert!(parse_value::<bool>("S3_FORCE_PATH_STYLE", "true").unwrap());

        let err = parse_value::<u16>("SERVER_PORT", "eighty").unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for SERVER_PORT: eighty");
    }

    #[test]
    fn test_logging_config_conversion() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
        };
        let log_config = config.to_log_config("upload-gateway").unwrap();
        assert_eq!(log_config.level, LogLevel::Debug);
        assert_eq!(log_config.format, LogFormat::Json);
        assert!(log_config.include_thread_ids);

        let bad = LoggingConfig {
            level: "info".to_string(),
            format: "yaml".to_string(),
        };
        assert!(bad.to_log_config("upload-gateway").is_err());
    }
}
