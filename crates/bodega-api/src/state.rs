// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::proxy::BackendClient;

// =============================================================================
// AppState
// =============================================================================

/// Immutable components shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Session token verifier.
    pub verifier: Arc<TokenVerifier>,
    /// Backend HTTP client.
    pub backend: Arc<BackendClient>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the token verifier.
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Returns the backend client.
    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing AppState.
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    verifier: Option<Arc<TokenVerifier>>,
    backend: Option<Arc<BackendClient>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the token verifier.
    pub fn verifier(mut self, verifier: Arc<TokenVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Sets the backend client.
    pub fn backend(mut self, backend: Arc<BackendClient>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Builds the AppState, creating missing components from the configuration.
    pub fn build(self) -> ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let verifier = match self.verifier {
            Some(verifier) => verifier,
            None => Arc::new(TokenVerifier::new(config.jwt.clone())?),
        };

        let backend = match self.backend {
            Some(backend) => backend,
            None => Arc::new(BackendClient::new(
                config.backend_url.clone(),
                config.effective_backend_timeout(),
            )?),
        };

        Ok(AppState {
            config: Arc::new(config),
            verifier,
            backend,
        })
    }
}

// =============================================================================
// FromRef implementations for extracting parts of state
// =============================================================================

impl axum::extract::FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<BackendClient> {
    fn from_ref(state: &AppState) -> Self {
        state.backend.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<ApiConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;

    fn test_config() -> ApiConfig {
        ApiConfig::new(
            "http://localhost:4000/api",
            JwtConfig::new("test-secret-key-that-is-long-enough-for-testing"),
        )
    }

    #[test]
    fn test_app_state_builder() {
        let state = AppState::builder().config(test_config()).build().unwrap();
        assert_eq!(state.backend().base_url(), "http://localhost:4000/api");
    }

    #[test]
    fn test_builder_requires_secret_and_backend() {
        let config = ApiConfig::new("http://localhost:4000", JwtConfig::default());
        assert!(AppState::builder().config(config).build().is_err());

        let config = ApiConfig::new("", JwtConfig::new("secret"));
        assert!(AppState::builder().config(config).build().is_err());
    }
}
