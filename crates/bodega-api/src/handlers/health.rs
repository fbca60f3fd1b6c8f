// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Health check handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bodega_core::Envelope;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Liveness payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
    /// Gateway version.
    pub version: String,
}

/// Readiness payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessStatus {
    /// Whether the backend answered.
    pub backend: bool,
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Liveness check. Returns 200 OK if the service is running.
pub async fn health() -> impl IntoResponse {
    Json(Envelope::success(HealthStatus {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    }))
}

// =============================================================================
// Readiness Check
// =============================================================================

/// GET /ready
///
/// Reports whether the backend base URL answers. Proxy routes are served
/// regardless of the outcome.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if state.backend().ping().await {
        (
            StatusCode::OK,
            Json(Envelope::success(ReadinessStatus { backend: true })),
        )
    } else {
        let mut envelope = Envelope::failure("Backend no disponible");
        envelope.data = Some(ReadinessStatus { backend: false });
        (StatusCode::SERVICE_UNAVAILABLE, Json(envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_health_envelope() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["version"], crate::VERSION);
    }
}
