// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use bodega_config::BodegaConfig;
use bodega_core::LOGIN_PATH;

use crate::auth::JwtConfig;

// =============================================================================
// ApiConfig
// =============================================================================

/// Runtime configuration for the gateway server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host address.
    pub host: IpAddr,
    /// Server port.
    pub port: u16,
    /// Backend base URL.
    pub backend_url: String,
    /// Per-request backend timeout.
    pub backend_timeout: Duration,
    /// Token verification settings.
    pub jwt: JwtConfig,
    /// Directory holding the page bundle.
    pub pages_dir: PathBuf,
    /// Paths reachable without a session. Entries ending in `*` are prefixes.
    pub public_paths: Vec<String>,
    /// Allowed CORS origins; empty disables CORS.
    pub cors_origins: Vec<String>,
    /// Whether CORS responses allow credentials.
    pub cors_allow_credentials: bool,
    /// Inbound request timeout.
    pub request_timeout: Duration,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: bodega_config::schema::DEFAULT_PORT,
            backend_url: String::new(),
            backend_timeout: Duration::from_secs(bodega_config::schema::DEFAULT_BACKEND_TIMEOUT_SECS),
            jwt: JwtConfig::default(),
            pages_dir: PathBuf::from(bodega_config::schema::DEFAULT_PAGES_DIR),
            public_paths: default_public_paths(bodega_config::schema::DEFAULT_ASSETS_PREFIX),
            cors_origins: Vec::new(),
            cors_allow_credentials: false,
            request_timeout: Duration::from_secs(60),
            max_body_size: 2 * 1024 * 1024,
        }
    }
}

impl ApiConfig {
    /// Creates a configuration for the given backend and secret.
    pub fn new(backend_url: impl Into<String>, jwt: JwtConfig) -> Self {
        Self {
            backend_url: backend_url.into(),
            jwt,
            ..Default::default()
        }
    }

    /// Builds the server configuration from the loaded gateway configuration.
    pub fn from_config(config: &BodegaConfig) -> Self {
        let server = &config.server;
        let api = Self {
            host: server.bind_address,
            port: server.port,
            backend_url: config.backend.base_url().to_string(),
            backend_timeout: config.backend.timeout(),
            jwt: JwtConfig::from(&config.jwt),
            pages_dir: server.pages_dir.clone(),
            public_paths: default_public_paths(&server.assets_prefix),
            cors_origins: server.cors.allowed_origins.clone(),
            cors_allow_credentials: server.cors.allow_credentials,
            request_timeout: server.request_timeout(),
            max_body_size: server.max_body_size,
        };
        let backend_timeout = api.effective_backend_timeout();
        Self {
            backend_timeout,
            ..api
        }
    }

    /// Backend timeout actually applied to outbound calls.
    ///
    /// Capped at 90% of `request_timeout`; a backend timeout must surface as
    /// a JSON 500 before the inbound timeout fires.
    pub fn effective_backend_timeout(&self) -> Duration {
        let ceiling = self.request_timeout * 9 / 10;
        self.backend_timeout.min(ceiling)
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the host address.
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Sets the page bundle directory.
    pub fn with_pages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pages_dir = dir.into();
        self
    }

    /// Sets the inbound request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the backend timeout.
    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }
}

/// Login page, its sub-paths and static assets.
fn default_public_paths(assets_prefix: &str) -> Vec<String> {
    vec![
        LOGIN_PATH.to_string(),
        format!("{}/*", LOGIN_PATH),
        format!("{}/*", assets_prefix.trim_end_matches('/')),
        "/favicon.ico".to_string(),
    ]
}
