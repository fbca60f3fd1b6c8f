// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The single adapter between a public endpoint and its backend call.

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    body::to_bytes,
    extract::{Query, Request},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::headers::{
    build_auth_headers, forward_cookie_headers, session_token_from_set_cookie,
    CLEAR_SESSION_COOKIE,
};
use super::routes::{Credentials, ProxyRoute, SessionEffect, MISSING_RANGE_MESSAGE};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Header carrying the gateway's request id to the backend.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Forwards `request` according to `route` and normalizes the outcome.
///
/// Never fails: every path produces a JSON response.
pub async fn dispatch(state: &AppState, route: &ProxyRoute, request: Request) -> Response {
    let request_id = Uuid::now_v7();
    let started = Instant::now();

    let mut response = match forward(state, route, request, request_id).await {
        Ok(response) => response,
        Err(err) => {
            if let ApiError::Upstream { status, .. } = &err {
                warn!(
                    request_id = %request_id,
                    path = route.path,
                    backend_path = route.backend_path,
                    status = %status,
                    "Backend rejected proxied request"
                );
            }
            err.into_response()
        }
    };

    if route.session == SessionEffect::Clear {
        response.headers_mut().append(
            header::SET_COOKIE,
            HeaderValue::from_static(CLEAR_SESSION_COOKIE),
        );
    }

    debug!(
        request_id = %request_id,
        method = %route.method,
        path = route.path,
        status = %response.status(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Proxied request"
    );

    response
}

async fn forward(
    state: &AppState,
    route: &ProxyRoute,
    request: Request,
    request_id: Uuid,
) -> ApiResult<Response> {
    let (parts, body) = request.into_parts();

    if !route.required_query.is_empty() {
        let Query(query) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|_| ApiError::bad_request(MISSING_RANGE_MESSAGE))?;
        if let Some(param) = route.missing_param(&query) {
            debug!(path = route.path, param, "Required query parameter missing");
            return Err(ApiError::bad_request(MISSING_RANGE_MESSAGE));
        }
    }

    let mut headers = match route.credentials {
        Credentials::Bearer => build_auth_headers(&parts.headers),
        Credentials::RawCookie => forward_cookie_headers(&parts.headers),
    };
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    let body = if route.forwards_body() {
        let bytes = to_bytes(body, state.config.max_body_size)
            .await
            .map_err(|e| {
                debug!(error = %e, "Failed to read request body");
                ApiError::bad_request("Cuerpo de la solicitud inválido")
            })?;
        Some(bytes).filter(|b| !b.is_empty())
    } else {
        None
    };

    let url = state.backend.url_for(route.backend_path, parts.uri.query());
    let upstream = state
        .backend
        .send(route.method.clone(), &url, headers, body)
        .await?;

    if !upstream.is_success() {
        return Err(ApiError::upstream(upstream.status, route.error_message));
    }

    let mut payload = upstream.json()?;
    let mut response_headers = HeaderMap::new();

    if route.session == SessionEffect::Establish {
        for cookie in upstream.headers.get_all(header::SET_COOKIE) {
            response_headers.append(header::SET_COOKIE, cookie.clone());
        }

        let identity = session_token_from_set_cookie(&upstream.headers)
            .and_then(|token| state.verifier.verify_optional(Some(&token)));
        if let Some(identity) = identity {
            info!(
                subject = %identity.subject,
                role = %identity.role,
                "Session established"
            );
            if let Value::Object(ref mut object) = payload {
                object.insert(
                    "redirectTo".to_string(),
                    Value::String(identity.home().to_string()),
                );
            }
        }
    }

    Ok((StatusCode::OK, response_headers, Json(payload)).into_response())
}
