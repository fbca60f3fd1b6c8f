// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Gateway server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::guard::{GuardLayer, RouteGuard};
use crate::handlers;
use crate::proxy::{self, ProxyRoute};
use crate::state::AppState;

// =============================================================================
// ApiServer
// =============================================================================

/// The gateway HTTP server.
pub struct ApiServer {
    state: AppState,
    config: Arc<ApiConfig>,
    routes: Vec<ProxyRoute>,
}

impl ApiServer {
    /// Creates a server with the default proxy route table.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self {
            state,
            config,
            routes: proxy::proxy_routes(),
        }
    }

    /// Replaces the proxy route table.
    pub fn with_routes(mut self, routes: Vec<ProxyRoute>) -> Self {
        self.routes = routes;
        self
    }

    /// Creates the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                self.config.request_timeout,
            ))
            .layer(DefaultBodyLimit::max(self.config.max_body_size));

        let mut router = Router::new()
            // Health endpoints
            .route("/health", get(handlers::health))
            .route("/ready", get(handlers::ready))
            // Navigation entry
            .route("/", get(handlers::root))
            // Backend proxy
            .merge(proxy::router(self.routes.clone()))
            .route("/api/{*path}", any(handlers::api_not_found))
            // Guarded page bundle
            .fallback_service(self.pages())
            .layer(middleware_stack);

        if let Some(cors) = create_cors_layer(&self.config) {
            router = router.layer(cors);
        }

        router.with_state(self.state.clone())
    }

    /// Page bundle behind the route guard.
    fn pages(&self) -> Router {
        let dir = &self.config.pages_dir;
        let serve_dir = ServeDir::new(dir)
            .append_index_html_on_directories(true)
            .fallback(ServeFile::new(dir.join("index.html")));

        let guard = GuardLayer::new(RouteGuard::new(self.state.verifier.clone()))
            .with_public_paths(self.config.public_paths.clone());

        Router::new().fallback_service(serve_dir).layer(guard)
    }

    /// Serves on an already bound listener until `shutdown_signal` resolves.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let router = self.router();
        let addr = listener.local_addr()?;

        info!(
            addr = %addr,
            backend = %self.state.backend().base_url(),
            pages = %self.config.pages_dir.display(),
            routes = self.routes.len(),
            "Starting gateway server"
        );

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("Gateway server shutdown complete");

        Ok(())
    }

    /// Returns the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer, or `None` when no origins are configured.
fn create_cors_layer(config: &ApiConfig) -> Option<CorsLayer> {
    if config.cors_origins.is_empty() {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    if config.cors_origins.iter().any(|o| o == "*") {
        if config.cors_allow_credentials {
            warn!("CORS credentials cannot be combined with a wildcard origin; ignoring");
        }
        return Some(layer.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(config.cors_allow_credentials),
    )
}

// =============================================================================
// Tests
// =============================================================================
