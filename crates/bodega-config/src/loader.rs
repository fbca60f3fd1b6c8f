// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading for the gateway.
//!
//! # Loading Pipeline
//!
//! 1. Start from defaults, or parse a YAML/TOML/JSON file if one is given
//! 2. Resolve `${VAR}` / `${VAR:default}` placeholders in the file
//! 3. Apply environment overrides
//! 4. Validate
//!
//! # Environment Variables
//!
//! ```text
//! BACKEND_URL=http://api:4000/api
//! JWT_SECRET=...
//! BODEGA_PORT=3000
//! BODEGA_LOG_LEVEL=debug
//! BODEGA_PAGES_DIR=/srv/bodega/public
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{BodegaConfig, LogFormat, LogLevel, SecretValue};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Variable holding the backend base URL.
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";

/// Variable holding the token verification secret.
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader.
///
/// # Examples
///
/// ```no_run
/// use bodega_config::loader::ConfigLoader;
///
/// let config = ConfigLoader::new().load("bodega.yaml").unwrap();
/// println!("listening on {}", config.server.socket_addr());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Prefix for gateway-specific variables.
    env_prefix: String,

    /// Whether placeholders and overrides are applied.
    resolve_env_vars: bool,

    /// Fixed variable set used instead of the process environment.
    environment: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Creates a new configuration loader with default settings.
    pub fn new() -> Self {
        Self {
            env_prefix: "BODEGA".to_string(),
            resolve_env_vars: true,
            environment: None,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables environment variable resolution.
    pub fn with_env_vars(mut self, enabled: bool) -> Self {
        self.resolve_env_vars = enabled;
        self
    }

    /// Reads variables from `vars` instead of the process environment.
    pub fn with_environment<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Loads configuration from a file.
    ///
    /// The format is determined by the extension: `.yaml`/`.yml`, `.toml` or `.json`.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<BodegaConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = self.read_file(path)?;
        let format = ConfigFormat::from_path(path)?;
        let config = self.parse_content(&content, format, path)?;

        self.finish(config)
    }

    /// Loads configuration from an optional file.
    ///
    /// Without a file, defaults plus the environment are used.
    pub fn load_or_default(&self, path: Option<&Path>) -> ConfigResult<BodegaConfig> {
        match path {
            Some(path) => self.load(path),
            None => {
                debug!("No configuration file given, using defaults and environment");
                self.finish(BodegaConfig::default())
            }
        }
    }

    /// Loads configuration from a string.
    pub fn load_from_str(&self, content: &str, format: ConfigFormat) -> ConfigResult<BodegaConfig> {
        let content = if self.resolve_env_vars {
            self.resolve_env_placeholders(content)
        } else {
            content.to_string()
        };
        let config = parse_str(&content, format)?;
        self.finish(config)
    }

    fn finish(&self, mut config: BodegaConfig) -> ConfigResult<BodegaConfig> {
        if self.resolve_env_vars {
            self.apply_env_overrides(&mut config)?;
        }

        config.validate()?;

        info!(
            backend = %config.backend.base_url(),
            port = config.server.port,
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    /// Reads file content.
    fn read_file(&self, path: &Path) -> ConfigResult<String> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
    }

    /// Parses file content, attributing failures to the file.
    fn parse_content(
        &self,
        content: &str,
        format: ConfigFormat,
        path: &Path,
    ) -> ConfigResult<BodegaConfig> {
        let content = if self.resolve_env_vars {
            self.resolve_env_placeholders(content)
        } else {
            content.to_string()
        };

        parse_str(&content, format).map_err(|e| match e {
            ConfigError::Serialization { message } => ConfigError::parse(path, message),
            other => other,
        })
    }

    fn var(&self, name: &str) -> Option<String> {
        match &self.environment {
            Some(vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        }
    }

    fn prefixed(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    /// Resolves `${VAR_NAME}` and `${VAR_NAME:default}` placeholders.
    ///
    /// Unknown variables without a default are left in place.
    fn resolve_env_placeholders(&self, content: &str) -> String {
        let mut result = String::with_capacity(content.len());
        let mut chars = content.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' || chars.peek() != Some(&'{') {
                result.push(c);
                continue;
            }
            chars.next(); // '{'

            let mut inner = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                inner.push(c);
            }

            if !closed {
                result.push_str("${");
                result.push_str(&inner);
                continue;
            }

            let (name, default) = match inner.split_once(':') {
                Some((name, default)) => (name, Some(default)),
                None => (inner.as_str(), None),
            };

            match (self.var(name), default) {
                (Some(value), _) => result.push_str(&value),
                (None, Some(default)) => result.push_str(default),
                (None, None) => {
                    warn!("Environment variable '{}' not found", name);
                    result.push_str(&format!("${{{}}}", name));
                }
            }
        }

        result
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&self, config: &mut BodegaConfig) -> ConfigResult<()> {
        // Required values: bare names first, prefixed names win.
        for name in [BACKEND_URL_VAR.to_string(), self.prefixed("BACKEND_URL")] {
            if let Some(value) = self.var(&name) {
                config.backend.url = value;
            }
        }
        for name in [JWT_SECRET_VAR.to_string(), self.prefixed("JWT_SECRET")] {
            if let Some(value) = self.var(&name) {
                config.jwt.secret = Some(SecretValue::new(value));
            }
        }

        if let Some(value) = self.var(&self.prefixed("HOST")) {
            config.server.bind_address = value.parse().map_err(|_| {
                ConfigError::invalid_env_var(self.prefixed("HOST"), "expected an IP address")
            })?;
        }
        if let Some(value) = self.var(&self.prefixed("PORT")) {
            config.server.port = value.parse().map_err(|_| {
                ConfigError::invalid_env_var(self.prefixed("PORT"), "expected valid port number")
            })?;
        }
        if let Some(value) = self.var(&self.prefixed("PAGES_DIR")) {
            config.server.pages_dir = PathBuf::from(value);
        }
        if let Some(value) = self.var(&self.prefixed("BACKEND_TIMEOUT_SECS")) {
            config.backend.timeout_secs = value.parse().map_err(|_| {
                ConfigError::invalid_env_var(
                    self.prefixed("BACKEND_TIMEOUT_SECS"),
                    "expected valid number",
                )
            })?;
        }

        if let Some(value) = self.var(&self.prefixed("LOG_LEVEL")) {
            match LogLevel::parse(&value) {
                Some(level) => config.logging.level = level,
                None => warn!("Ignoring unknown log level '{}'", value),
            }
        }
        if let Some(value) = self.var(&self.prefixed("LOG_FORMAT")) {
            match LogFormat::parse(&value) {
                Some(format) => config.logging.format = format,
                None => warn!("Ignoring unknown log format '{}'", value),
            }
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Determines the format from a file path.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(other) => Err(ConfigError::unsupported_format(other)),
            None => Err(ConfigError::unsupported_format("(no extension)")),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_str(content: &str, format: ConfigFormat) -> ConfigResult<BodegaConfig> {
    match format {
        ConfigFormat::Yaml => yaml_parse(content),
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
    }
}

/// YAML parsing through the `config` crate.
fn yaml_parse<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Yaml))
        .build()
        .map_err(|e| ConfigError::serialization(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::serialization(e.to_string()))
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Loads configuration from an optional file using the process environment.
pub fn load_config(path: Option<&Path>) -> ConfigResult<BodegaConfig> {
    ConfigLoader::new().load_or_default(path)
}

// =============================================================================
// Tests
// =============================================================================
