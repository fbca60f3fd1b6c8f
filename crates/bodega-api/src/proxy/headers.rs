// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Outbound header construction.
//!
//! The session cookie is read without verification; the backend is the final
//! authority on whether the credential is any good.

use axum::http::{header, HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Name of the HTTP-only session cookie.
pub const SESSION_COOKIE: &str = "access_token";

/// `Set-Cookie` value that removes the session cookie.
pub const CLEAR_SESSION_COOKIE: &str = "access_token=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

const EMPTY_BEARER: HeaderValue = HeaderValue::from_static("Bearer ");

/// Returns the session token from the inbound `Cookie` header, if any.
///
/// An empty cookie value counts as absent.
pub fn session_token(inbound: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(inbound)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Builds headers for a backend call authenticated with the session token.
///
/// Without a session cookie the credential is left empty (`Bearer `).
pub fn build_auth_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = json_headers();

    let authorization = session_token(inbound)
        .and_then(|token| HeaderValue::from_str(&format!("Bearer {}", token)).ok())
        .unwrap_or(EMPTY_BEARER);
    headers.insert(header::AUTHORIZATION, authorization);

    headers
}

/// Builds headers that forward the browser's `Cookie` header verbatim.
///
/// Split `Cookie` fields (HTTP/2) are joined with `"; "` into a single header.
pub fn forward_cookie_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = json_headers();

    let fields: Vec<&[u8]> = inbound
        .get_all(header::COOKIE)
        .iter()
        .map(HeaderValue::as_bytes)
        .filter(|field| !field.is_empty())
        .collect();

    if let Ok(cookie) = HeaderValue::from_bytes(&fields.join(&b"; "[..])) {
        if !cookie.is_empty() {
            headers.insert(header::COOKIE, cookie);
        }
    }

    headers
}

/// Finds the session token in a backend's `Set-Cookie` headers.
pub fn session_token_from_set_cookie(response: &HeaderMap) -> Option<String> {
    response
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value).ok())
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers
}
