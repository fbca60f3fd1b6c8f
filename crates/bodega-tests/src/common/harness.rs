// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! Runs the real gateway on an ephemeral port in front of a [`MockBackend`].

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::Method;
use bodega_api::{ApiConfig, ApiServer, AppState};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::fixtures::{jwt_config, page_bundle};
use super::init_test_logging;
use super::mocks::MockBackend;

/// A running gateway and its mock backend.
///
/// Dropping the gateway shuts the server down.
pub struct TestGateway {
    addr: SocketAddr,
    backend: MockBackend,
    client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    _pages: TempDir,
}

impl TestGateway {
    /// Starts a gateway wired to a fresh mock backend.
    pub async fn start() -> anyhow::Result<Self> {
        let backend = MockBackend::start().await?;
        let url = backend.url();
        Self::start_with(backend, url).await
    }

    /// Starts a gateway whose backend URL points at `backend_url`.
    ///
    /// The mock still runs but receives nothing unless the URL targets it.
    pub async fn start_with_backend_url(backend_url: &str) -> anyhow::Result<Self> {
        Self::start_configured(backend_url, |config| config).await
    }

    /// Like [`TestGateway::start_with_backend_url`], letting `configure`
    /// adjust the server configuration first.
    pub async fn start_configured(
        backend_url: &str,
        configure: impl FnOnce(ApiConfig) -> ApiConfig,
    ) -> anyhow::Result<Self> {
        let backend = MockBackend::start().await?;
        Self::start_with_config(backend, backend_url.to_string(), configure).await
    }

    async fn start_with(backend: MockBackend, backend_url: String) -> anyhow::Result<Self> {
        Self::start_with_config(backend, backend_url, |config| config).await
    }

    async fn start_with_config(
        backend: MockBackend,
        backend_url: String,
        configure: impl FnOnce(ApiConfig) -> ApiConfig,
    ) -> anyhow::Result<Self> {
        init_test_logging();

        let pages = page_bundle();
        let config = configure(
            ApiConfig::new(backend_url, jwt_config())
                .with_pages_dir(pages.path())
                .with_backend_timeout(Duration::from_secs(5)),
        );
        let state = AppState::builder().config(config).build()?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (tx, rx) = oneshot::channel::<()>();
        let server = ApiServer::new(state);
        let handle = tokio::spawn(async move {
            let signal = async {
                let _ = rx.await;
            };
            if let Err(e) = server.serve(listener, signal).await {
                tracing::error!(error = %e, "Test gateway stopped");
            }
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            addr,
            backend,
            client,
            shutdown: Some(tx),
            handle: Some(handle),
            _pages: pages,
        })
    }

    /// The mock backend.
    pub fn backend(&self) -> &MockBackend {
        &self.backend
    }

    /// Gateway base URL.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for `path` on the gateway.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Starts a request, attaching `token` as the session cookie.
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = token {
            request = request.header("cookie", format!("access_token={}", token));
        }
        request
    }

    /// Sends a GET.
    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        self.request(Method::GET, path, token)
            .send()
            .await
            .expect("gateway request failed")
    }

    /// Sends a POST with a JSON body.
    pub async fn post_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.request(Method::POST, path, token)
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("gateway request failed")
    }

    /// Stops the server and waits for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
