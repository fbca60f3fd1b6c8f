// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session token verification.

use std::sync::Arc;

use bodega_core::Role;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::{AuthError, Claims, VerifiedIdentity};
use crate::error::{ApiError, ApiResult};

// =============================================================================
// JwtConfig
// =============================================================================

/// Token verification settings.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Shared HS256 secret.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Expected issuer, checked only when set.
    pub issuer: Option<String>,
    /// Clock skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl JwtConfig {
    /// Creates a new configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Sets the expected issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the clock skew tolerance.
    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        if self.secret.trim().is_empty() {
            return Err(ApiError::internal("JWT secret is not configured"));
        }
        if self.secret.len() < 32 {
            tracing::warn!("JWT secret is shorter than recommended (32 bytes)");
        }
        Ok(())
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("issuer", &self.issuer)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl From<&bodega_config::JwtConfig> for JwtConfig {
    fn from(config: &bodega_config::JwtConfig) -> Self {
        Self {
            secret: config
                .secret
                .as_ref()
                .map(|s| s.expose().to_string())
                .unwrap_or_default(),
            issuer: config.issuer.clone(),
            leeway_secs: config.leeway_secs,
        }
    }
}

// =============================================================================
// TokenVerifier
// =============================================================================

/// Verifies backend-issued session tokens.
///
/// Built once at startup and shared behind `Arc`s; cloning is cheap.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl TokenVerifier {
    /// Creates a verifier. Fails if the secret is empty.
    pub fn new(config: JwtConfig) -> ApiResult<Self> {
        config.validate()?;

        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(ref issuer) = config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self {
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Verifies `token` and returns the identity it carries.
    ///
    /// Checks signature and expiry, then parses the role strictly.
    pub fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::Missing);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        let role = Role::parse(&claims.role)
            .ok_or_else(|| AuthError::UnknownRole(claims.role.clone()))?;

        Ok(VerifiedIdentity::from_claims(claims, role))
    }

    /// Verifies an optional token, collapsing every failure to `None`.
    ///
    /// An absent token returns `None` silently; any other failure is logged.
    pub fn verify_optional(&self, token: Option<&str>) -> Option<VerifiedIdentity> {
        let token = token?;
        match self.verify(token) {
            Ok(identity) => Some(identity),
            Err(AuthError::Missing) => None,
            Err(e) => {
                tracing::warn!(reason = e.reason(), error = %e, "Session token rejected");
                None
            }
        }
    }

    /// Returns the role carried by a valid token, or `None`.
    pub fn verify_and_get_role(&self, token: Option<&str>) -> Option<Role> {
        self.verify_optional(token).map(|identity| identity.role)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
