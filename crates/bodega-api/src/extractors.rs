// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for gateway handlers.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::auth::{TokenVerifier, VerifiedIdentity};
use crate::proxy::session_token;

// =============================================================================
// Optional Identity Extractor
// =============================================================================

/// The verified identity of the caller, if any.
///
/// Uses the identity placed in extensions by the route guard when present,
/// otherwise verifies the session cookie itself.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalIdentity(identity): OptionalIdentity) -> impl IntoResponse {
///     identity.map(|i| i.home()).unwrap_or("/login")
/// }
/// ```
pub struct OptionalIdentity(pub Option<VerifiedIdentity>);

impl<S> FromRequestParts<S> for OptionalIdentity
where
    S: Send + Sync,
    Arc<TokenVerifier>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<VerifiedIdentity>() {
            return Ok(OptionalIdentity(Some(identity.clone())));
        }

        let verifier = Arc::<TokenVerifier>::from_ref(state);
        let token = session_token(&parts.headers);
        Ok(OptionalIdentity(verifier.verify_optional(token.as_deref())))
    }
}
