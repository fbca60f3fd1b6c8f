// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # bodega-api
//!
//! HTTP gateway between browsers and the Bodega backend.
//!
//! - **auth**: session token verification with an injected secret
//! - **proxy**: declarative route table and the single backend dispatcher
//! - **guard**: server-side route guard for page navigation
//! - **server**: router assembly, middleware stack and serving

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod proxy;
pub mod server;
pub mod state;

pub use auth::{AuthError, Claims, JwtConfig, TokenVerifier, VerifiedIdentity};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use guard::{GuardDecision, GuardLayer, RouteGuard};
pub use proxy::{BackendClient, Credentials, ProxyRoute, SessionEffect};
pub use server::ApiServer;
pub use state::{AppState, AppStateBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
