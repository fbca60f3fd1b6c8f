// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the Bodega binary.
//!
//! Exit codes let a supervisor tell apart a deployment mistake (bad file,
//! unset `BACKEND_URL`/`JWT_SECRET`), a port clash and an absent backend.

use std::net::SocketAddr;

use bodega_config::ConfigError;
use thiserror::Error;

/// Result type alias for bodega-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Configuration file unreadable or invalid.
pub const EXIT_CONFIG: i32 = 1;
/// A required setting (backend URL, signing secret) is unset.
pub const EXIT_MISSING_SETTING: i32 = 2;
/// The listen address could not be bound.
pub const EXIT_BIND: i32 = 3;
/// The backend did not answer a startup check.
pub const EXIT_BACKEND_UNREACHABLE: i32 = 4;
/// The gateway failed while serving.
pub const EXIT_RUNTIME: i32 = 5;

/// Errors that can stop the gateway process.
#[derive(Debug, Error)]
pub enum BinError {
    /// Problem with the configuration source itself.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The listener could not be bound.
    #[error("Cannot listen on {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// The backend gave no answer at all.
    #[error("Backend not reachable at {url}")]
    BackendUnreachable {
        /// Backend base URL.
        url: String,
    },

    /// Failure building or running the gateway.
    #[error("Gateway error: {0}")]
    Gateway(#[from] bodega_api::ApiError),

    /// Anything else that went wrong while running.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Error with added context.
    #[error("{context}: {source}")]
    WithContext {
        /// The context description.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<BinError>,
    },
}

impl BinError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a runtime error.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    /// Creates a backend unreachable error.
    pub fn backend_unreachable(url: impl Into<String>) -> Self {
        Self::BackendUnreachable { url: url.into() }
    }

    /// Adds context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::MissingField { .. }) => EXIT_MISSING_SETTING,
            Self::Configuration(_) | Self::Config(_) => EXIT_CONFIG,
            Self::Bind { .. } => EXIT_BIND,
            Self::BackendUnreachable { .. } => EXIT_BACKEND_UNREACHABLE,
            Self::Gateway(_) | Self::Runtime(_) => EXIT_RUNTIME,
            Self::WithContext { source, .. } => source.exit_code(),
        }
    }

    /// Operator hint printed under the error, if there is one.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config(ConfigError::MissingField { hint, .. }) => {
                Some(format!("set {} in the environment or the config file", hint))
            }
            Self::Bind { addr, .. } => Some(format!(
                "another process may own port {}; try --port",
                addr.port()
            )),
            Self::BackendUnreachable { .. } => {
                Some("check BACKEND_URL and that the backend is up".to_string())
            }
            Self::WithContext { source, .. } => source.hint(),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for BinError {
    fn from(err: anyhow::Error) -> Self {
        Self::Runtime(format!("{:#}", err))
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Prints an error, its cause chain and any hint to stderr.
pub fn report_error(error: &BinError) {
    eprintln!("Error: {}", error);

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  Caused by: {}", cause);
        source = cause.source();
    }

    if let Some(hint) = error.hint() {
        eprintln!("  Hint: {}", hint);
    }
}

/// Reports an error and exits with its exit code.
pub fn report_error_and_exit(error: BinError) -> ! {
    report_error(&error);
    std::process::exit(error.exit_code())
}
