// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token verification failures.

use thiserror::Error;

/// Why a session token was rejected.
///
/// These never cross a public boundary as errors: callers collapse them to
/// "unauthenticated".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No token was presented.
    #[error("no session token")]
    Missing,

    /// The token's `exp` is in the past.
    #[error("session token expired")]
    Expired,

    /// The signature does not match the configured secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token could not be decoded or lacks required claims.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The `role` claim is not one of the known roles.
    #[error("unknown role in token: {0}")]
    UnknownRole(String),
}

impl AuthError {
    /// Short label for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Missing => "missing",
            AuthError::Expired => "expired",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Malformed(_) => "malformed",
            AuthError::UnknownRole(_) => "unknown_role",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                AuthError::InvalidSignature
            }
            ErrorKind::InvalidIssuer => AuthError::Malformed("issuer mismatch".to_string()),
            _ => AuthError::Malformed(err.to_string()),
        }
    }
}
