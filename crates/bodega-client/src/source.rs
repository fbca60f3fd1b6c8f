// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Where the current user comes from.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, COOKIE};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::user::CurrentUser;

/// Who-am-I endpoint on the gateway.
pub const WHO_AM_I_PATH: &str = "/api/auth/me";

/// Logout endpoint on the gateway.
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// Answers "who am I" for the current session.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Fetches the current user. Any failure is an error.
    async fn who_am_i(&self) -> ClientResult<CurrentUser>;
}

// =============================================================================
// ProxyClient
// =============================================================================

/// HTTP client for the gateway's proxy endpoints.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
    session_cookie: Option<HeaderValue>,
}

impl ProxyClient {
    /// Creates a client for the gateway at `base_url`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_cookie: None,
        })
    }

    /// Sends `access_token=<token>` with every request.
    pub fn with_session_token(mut self, token: &str) -> ClientResult<Self> {
        let value = HeaderValue::from_str(&format!("access_token={}", token))
            .map_err(|e| ClientError::invalid_payload(format!("invalid session token: {}", e)))?;
        self.session_cookie = Some(value);
        Ok(self)
    }

    /// Returns the gateway base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(ref cookie) = self.session_cookie {
            request = request.header(COOKIE, cookie.clone());
        }
        request
    }

    /// Ends the session on the gateway.
    pub async fn logout(&self) -> ClientResult<()> {
        let response = self.request(reqwest::Method::POST, LOGOUT_PATH).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body: Value = response.json().await.unwrap_or(Value::Null);
        Err(ClientError::status(status.as_u16(), message_of(&body)))
    }
}

#[async_trait]
impl IdentitySource for ProxyClient {
    async fn who_am_i(&self) -> ClientResult<CurrentUser> {
        let response = self.request(reqwest::Method::GET, WHO_AM_I_PATH).send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(ClientError::status(status.as_u16(), message_of(&body)));
        }

        CurrentUser::from_body(body)
    }
}

fn message_of(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_normalized() {
        let client = ProxyClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_session_token_header() {
        let client = ProxyClient::new("http://localhost:3000")
            .unwrap()
            .with_session_token("abc")
            .unwrap();
        assert_eq!(client.session_cookie.unwrap(), "access_token=abc");

        assert!(ProxyClient::new("http://localhost:3000")
            .unwrap()
            .with_session_token("bad\nvalue")
            .is_err());
    }

    #[test]
    fn test_message_of() {
        assert_eq!(message_of(&json!({ "message": "No autenticado" })), "No autenticado");
        assert_eq!(message_of(&Value::Null), "");
    }
}
