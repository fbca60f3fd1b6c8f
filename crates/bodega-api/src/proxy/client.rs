// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP client for the backend API.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};

use crate::error::{ApiError, ApiResult};

/// A buffered backend response.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    /// Status returned by the backend.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Bytes,
}

impl BackendResponse {
    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parses the body as JSON. An empty body is `null`.
    pub fn json(&self) -> ApiResult<serde_json::Value> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&self.body).map_err(|e| {
            ApiError::backend_unavailable(format!("malformed backend JSON: {}", e))
        })
    }
}

/// Pooled client bound to the backend base URL.
///
/// One round trip per call; nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::internal("backend URL is not configured"));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ApiError::internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins the base URL, `backend_path` and the inbound query string.
    pub fn url_for(&self, backend_path: &str, query: Option<&str>) -> String {
        match query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{}{}?{}", self.base_url, backend_path, query),
            None => format!("{}{}", self.base_url, backend_path),
        }
    }

    /// Performs one request and buffers the response.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> ApiResult<BackendResponse> {
        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(BackendResponse {
            status,
            headers,
            body,
        })
    }

    /// Returns `true` if the backend answers at all.
    ///
    /// Any HTTP status counts; only transport failures mean not ready.
    pub async fn ping(&self) -> bool {
        match self.http.head(&self.base_url).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Backend readiness probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BackendClient {
        BackendClient::new("http://backend:4000/api/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_normalized() {
        assert_eq!(client().base_url(), "http://backend:4000/api");
        assert!(BackendClient::new("", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_url_for_keeps_query_verbatim() {
        let client = client();
        assert_eq!(
            client.url_for("/vinos", None),
            "http://backend:4000/api/vinos"
        );
        assert_eq!(
            client.url_for("/reportes/ventas-periodo", Some("start=2024-01-01&end=2024-01-31")),
            "http://backend:4000/api/reportes/ventas-periodo?start=2024-01-01&end=2024-01-31"
        );
        assert_eq!(client.url_for("/vinos", Some("")), "http://backend:4000/api/vinos");
    }

    #[test]
    fn test_json_body() {
        let response = BackendResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::from_static(b""),
        };
        assert_eq!(response.json().unwrap(), serde_json::Value::Null);

        let response = BackendResponse {
            body: Bytes::from_static(b"<html>"),
            ..response
        };
        assert!(matches!(
            response.json(),
            Err(ApiError::BackendUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_backend_error() {
        // Port 9 (discard) on localhost is almost never listening.
        let client = BackendClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = client
            .send(Method::GET, &client.url_for("/vinos", None), HeaderMap::new(), None)
            .await;
        assert!(matches!(result, Err(ApiError::BackendUnavailable { .. })));
        assert!(!client.ping().await);
    }
}
