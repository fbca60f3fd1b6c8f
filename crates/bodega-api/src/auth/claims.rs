// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! JWT claims structure.

use bodega_core::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by a backend-issued session token.
///
/// `role` stays a plain string here so that an unknown role can be told apart
/// from a token that fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user id.
    pub sub: String,

    /// Role wire name.
    pub role: String,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at time (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// User's email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    /// Creates claims for `subject` with `role`, expiring `expires_in_secs` from now.
    ///
    /// The gateway never signs tokens; this exists for tooling and tests that
    /// stand in for the backend.
    pub fn new(subject: impl Into<String>, role: Role, expires_in_secs: i64) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: subject.into(),
            role: role.as_str().to_string(),
            exp: now + expires_in_secs,
            iat: Some(now),
            iss: None,
            username: None,
            email: None,
        }
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    /// Sets the login name.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns `true` if the token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Returns the expiration time as a DateTime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_new() {
        let claims = Claims::new("42", Role::Vendedor, 3600)
            .with_username("mlopez")
            .with_email("mlopez@bodega.test");

        assert_eq!(claims.role, "Vendedor");
        assert!(!claims.is_expired());
        assert!(claims.expires_at().is_some());
        assert_eq!(claims.username.as_deref(), Some("mlopez"));
    }

    #[test]
    fn test_claims_expired() {
        let claims = Claims::new("42", Role::Vendedor, -10);
        assert!(claims.is_expired());
    }

    #[test]
    fn test_optional_claims_are_omitted() {
        let mut claims = Claims::new("7", Role::Administrador, 60);
        claims.iat = None;
        let value = serde_json::to_value(&claims).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["role"], "Administrador");
    }
}
