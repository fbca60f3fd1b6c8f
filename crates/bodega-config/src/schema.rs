// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema for the Bodega gateway.
//!
//! Every section has working defaults except the two values the gateway
//! cannot run without: the backend base URL and the token signing secret.
//! Both are normally injected through `BACKEND_URL` and `JWT_SECRET`.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default backend request timeout in seconds.
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Default directory holding the pre-built page bundle.
pub const DEFAULT_PAGES_DIR: &str = "./public";

/// Default URL prefix for static assets that bypass the route guard.
pub const DEFAULT_ASSETS_PREFIX: &str = "/assets";

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure for the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodegaConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend API configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Session token verification.
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BodegaConfig {
    /// Validates the entire configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.backend.validate()?;
        self.jwt.validate()?;
        self.logging.validate()?;

        // Backend calls must give up before the inbound request times out.
        if self.backend.timeout_secs >= self.server.request_timeout_secs {
            return Err(ConfigError::validation(
                "backend.timeout_secs",
                format!(
                    "must be less than server.request_timeout_secs ({})",
                    self.server.request_timeout_secs
                ),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory containing the page bundle.
    #[serde(default = "default_pages_dir")]
    pub pages_dir: PathBuf,

    /// Path prefix under which static assets are served without a session.
    #[serde(default = "default_assets_prefix")]
    pub assets_prefix: String,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PAGES_DIR)
}

fn default_assets_prefix() -> String {
    DEFAULT_ASSETS_PREFIX.to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_max_body_size() -> usize {
    2 * 1024 * 1024 // 2MB
}

impl ServerConfig {
    /// Validates the server configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout_secs",
                "cannot be zero",
            ));
        }
        if self.max_body_size == 0 {
            return Err(ConfigError::validation(
                "server.max_body_size",
                "cannot be zero",
            ));
        }
        if !self.assets_prefix.starts_with('/') {
            return Err(ConfigError::validation(
                "server.assets_prefix",
                "must start with '/'",
            ));
        }
        Ok(())
    }

    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the socket address.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: DEFAULT_PORT,
            pages_dir: default_pages_dir(),
            assets_prefix: default_assets_prefix(),
            request_timeout_secs: default_request_timeout(),
            max_body_size: default_max_body_size(),
            cors: CorsConfig::default(),
        }
    }
}

/// CORS configuration.
///
/// Disabled when `allowed_origins` is empty; the page bundle and the proxy are
/// normally served from the same origin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (use "*" for all).
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Allow credentials.
    #[serde(default)]
    pub allow_credentials: bool,
}

impl CorsConfig {
    /// Returns `true` if a CORS layer should be installed.
    pub fn is_enabled(&self) -> bool {
        !self.allowed_origins.is_empty()
    }
}

// =============================================================================
// Backend Configuration
// =============================================================================

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. `http://api:4000/api`.
    #[serde(default)]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

fn default_backend_timeout() -> u64 {
    DEFAULT_BACKEND_TIMEOUT_SECS
}

impl BackendConfig {
    /// Validates the backend configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::missing_field("backend.url", "BACKEND_URL"));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::validation(
                "backend.url",
                "must be an http:// or https:// URL",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::validation(
                "backend.timeout_secs",
                "cannot be zero",
            ));
        }
        Ok(())
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Returns the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

// =============================================================================
// JWT Configuration
// =============================================================================

/// Session token verification settings.
///
/// The gateway never issues tokens, so only the verification half is here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JwtConfig {
    /// Shared HS256 secret.
    #[serde(default)]
    pub secret: Option<SecretValue>,

    /// Expected `iss` claim, if the backend sets one.
    #[serde(default)]
    pub issuer: Option<String>,

    /// Clock skew tolerance for `exp`, in seconds.
    #[serde(default)]
    pub leeway_secs: u64,
}

impl JwtConfig {
    /// Validates the JWT configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        match &self.secret {
            Some(secret) if !secret.is_empty() => Ok(()),
            _ => Err(ConfigError::missing_field("jwt.secret", "JWT_SECRET")),
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Validates the logging configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parses a level name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Compact single-line text.
    Compact,
    /// JSON lines for log shippers.
    Json,
}

impl LogFormat {
    /// Parses a format name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "text" | "pretty" => Some(LogFormat::Text),
            "compact" => Some(LogFormat::Compact),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

// =============================================================================
// Secret Value
// =============================================================================

/// A secret string that never prints its contents.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretValue(String);

impl SecretValue {
    /// Creates a new secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the secret is empty or whitespace.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretValue(***)")
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> BodegaConfig {
        let mut config = BodegaConfig::default();
        config.backend.url = "http://localhost:4000/api".to_string();
        config.jwt.secret = Some(SecretValue::new("s3cret"));
        config
    }

    #[test]
    fn test_defaults() {
        let config = BodegaConfig::default();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.assets_prefix, "/assets");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.jwt.leeway_secs, 0);
        assert!(!config.server.cors.is_enabled());
    }

    #[test]
    fn test_default_config_requires_backend_and_secret() {
        let mut config = BodegaConfig::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref field, .. } if field == "backend.url"));

        config.backend.url = "http://localhost:4000".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref field, .. } if field == "jwt.secret"));

        config.jwt.secret = Some(SecretValue::new("   "));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_backend_url_scheme() {
        let mut config = valid_config();
        config.backend.url = "localhost:4000".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_backend_timeout_below_request_timeout() {
        let mut config = valid_config();
        config.server.request_timeout_secs = 10;
        config.backend.timeout_secs = 10;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "backend.timeout_secs"
        ));

        config.backend.timeout_secs = 9;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let backend = BackendConfig {
            url: "http://api:4000/api/".to_string(),
            ..Default::default()
        };
        assert_eq!(backend.base_url(), "http://api:4000/api");
    }

    #[test]
    fn test_secret_is_redacted() {
        let secret = SecretValue::new("hunter2");
        assert_eq!(secret.to_string(), "***");
        assert!(!format!("{:?}", secret).contains("hunter2"));
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
        assert_eq!(LogFormat::parse("json"), Some(LogFormat::Json));
    }
}
