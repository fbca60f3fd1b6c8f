// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # bodega-config
//!
//! Configuration management for the Bodega gateway.
//!
//! ## Features
//!
//! - **Schema Definition**: server, backend, JWT and logging sections with defaults
//! - **Multi-Format Support**: YAML, TOML, and JSON configuration files
//! - **Environment Overrides**: `BACKEND_URL`, `JWT_SECRET` and `BODEGA_*` variables
//! - **Optional File**: with no file, defaults plus the environment are used
//!
//! ## Quick Start
//!
//! ```no_run
//! use bodega_config::load_config;
//!
//! let config = load_config(None).unwrap();
//! println!("Backend: {}", config.backend.base_url());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, ConfigFormat, ConfigLoader, BACKEND_URL_VAR, JWT_SECRET_VAR};
pub use schema::{
    BackendConfig, BodegaConfig, CorsConfig, JwtConfig, LogFormat, LogLevel, LoggingConfig,
    SecretValue, ServerConfig,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
