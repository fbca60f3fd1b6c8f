// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! A recording HTTP backend and a scripted identity source.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::Response,
    Router,
};
use bodega_client::{ClientError, ClientResult, CurrentUser, IdentitySource};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

// =============================================================================
// Recorded Request
// =============================================================================

/// A request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Raw query string, if any.
    pub query: Option<String>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Raw body.
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Returns a header as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

// =============================================================================
// Mock Response
// =============================================================================

/// A scripted backend answer.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Status code.
    pub status: StatusCode,
    /// Extra headers, appended in order.
    pub headers: Vec<(String, String)>,
    /// Raw body.
    pub body: String,
}

impl MockResponse {
    /// A JSON answer.
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::OK),
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    /// An answer with an empty body.
    pub fn empty(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::OK),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// An answer with a raw, possibly non-JSON body.
    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::OK),
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    /// Adds a response header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                header::HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                headers.append(name, value);
            }
        }
        response
    }
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::json(200, serde_json::json!({ "success": true, "data": [] }))
    }
}

// =============================================================================
// Mock Backend
// =============================================================================

#[derive(Default)]
struct MockState {
    responses: RwLock<HashMap<(Method, String), MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// An HTTP server standing in for the backend API.
///
/// Records every request and answers from a per-route script; unscripted
/// routes get `200 {"success":true,"data":[]}`.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Starts the mock on an ephemeral localhost port.
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockState::default());
        let router = Router::new()
            .fallback(record_and_reply)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!(error = %e, "Mock backend stopped");
            }
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Base URL to configure the gateway with.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Scripts the answer for `method path`.
    pub async fn respond(&self, method: Method, path: &str, response: MockResponse) {
        self.state
            .responses
            .write()
            .await
            .insert((method, path.to_string()), response);
    }

    /// Every request received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().await.last().cloned()
    }

    /// Number of requests received so far.
    pub async fn request_count(&self) -> usize {
        self.state.requests.lock().await.len()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record_and_reply(State(state): State<Arc<MockState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX)
        .await
        .map(|b| b.to_vec())
        .unwrap_or_default();

    let path = parts.uri.path().to_string();
    state.requests.lock().await.push(RecordedRequest {
        method: parts.method.clone(),
        path: path.clone(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers,
        body,
    });

    state
        .responses
        .read()
        .await
        .get(&(parts.method, path))
        .cloned()
        .unwrap_or_default()
        .into_response()
}

// =============================================================================
// Silent Backend
// =============================================================================

/// A TCP listener that accepts connections and never answers.
pub struct SilentBackend {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl SilentBackend {
    /// Starts listening on an ephemeral localhost port.
    pub async fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                open.push(stream);
            }
        });

        Ok(Self { addr, handle })
    }

    /// Base URL to configure the gateway with.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for SilentBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// =============================================================================
// Mock Identity Source
// =============================================================================

/// An identity source answering from a script.
pub struct MockIdentitySource {
    user: RwLock<Option<CurrentUser>>,
    calls: Mutex<usize>,
}

impl MockIdentitySource {
    /// Answers with `user`.
    pub fn returning(user: CurrentUser) -> Self {
        Self {
            user: RwLock::new(Some(user)),
            calls: Mutex::new(0),
        }
    }

    /// Fails every call with 401.
    pub fn unauthenticated() -> Self {
        Self {
            user: RwLock::new(None),
            calls: Mutex::new(0),
        }
    }

    /// Replaces the scripted user.
    pub async fn set_user(&self, user: Option<CurrentUser>) {
        *self.user.write().await = user;
    }

    /// Number of calls so far.
    pub async fn call_count(&self) -> usize {
        *self.calls.lock().await
    }
}

#[async_trait]
impl IdentitySource for MockIdentitySource {
    async fn who_am_i(&self) -> ClientResult<CurrentUser> {
        *self.calls.lock().await += 1;
        self.user
            .read()
            .await
            .clone()
            .ok_or_else(|| ClientError::status(401, "No autenticado"))
    }
}
