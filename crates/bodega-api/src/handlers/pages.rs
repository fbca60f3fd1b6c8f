// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Navigation entry points outside the page bundle.

use axum::response::Redirect;
use bodega_core::LOGIN_PATH;

use crate::error::ApiError;
use crate::extractors::OptionalIdentity;

/// GET /
///
/// Sends the browser to its role's area, or to the login page.
pub async fn root(OptionalIdentity(identity): OptionalIdentity) -> Redirect {
    match identity {
        Some(identity) => Redirect::to(identity.home()),
        None => Redirect::to(LOGIN_PATH),
    }
}

/// Any `/api/*` path without a proxy route.
pub async fn api_not_found() -> ApiError {
    ApiError::not_found("api route")
}
