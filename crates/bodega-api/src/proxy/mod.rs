// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Backend proxy.
//!
//! Each public endpoint is a [`ProxyRoute`] record; [`dispatch`] is the only
//! code that talks to the backend.

pub mod client;
pub mod dispatch;
pub mod headers;
pub mod routes;

use std::collections::BTreeMap;

use axum::{
    extract::{Request, State},
    http::{Method, Uri},
    routing::{MethodFilter, MethodRouter},
    Router,
};

pub use client::{BackendClient, BackendResponse};
pub use dispatch::dispatch;
pub use headers::{build_auth_headers, forward_cookie_headers, session_token, SESSION_COOKIE};
pub use routes::{proxy_routes, Credentials, ProxyRoute, SessionEffect};

use crate::error::ApiError;
use crate::state::AppState;

/// Builds a router serving `routes`, grouping methods that share a path.
///
/// Methods a path does not register get a JSON `405`.
pub fn router(routes: Vec<ProxyRoute>) -> Router<AppState> {
    let mut grouped: BTreeMap<&'static str, MethodRouter<AppState>> = BTreeMap::new();

    for route in routes {
        let Ok(filter) = MethodFilter::try_from(route.method.clone()) else {
            tracing::warn!(method = %route.method, path = route.path, "Skipping route with unsupported method");
            continue;
        };
        let path = route.path;

        let handler = move |State(state): State<AppState>, request: Request| {
            let route = route.clone();
            async move { dispatch(&state, &route, request).await }
        };

        let method_router = grouped
            .remove(path)
            .unwrap_or_else(|| MethodRouter::new().fallback(method_not_allowed))
            .on(filter, handler);
        grouped.insert(path, method_router);
    }

    grouped
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router.route(path, method_router)
        })
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(method.as_str(), uri.path())
}
