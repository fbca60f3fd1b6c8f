// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API error types and handling.
//!
//! Every failure leaving the gateway is a JSON body of the form
//! `{ "message": "..." }`. Messages are user-facing and never carry backend
//! bodies or internal details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned for every fault the gateway cannot attribute to the caller.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

// =============================================================================
// ApiError
// =============================================================================

/// API error type with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request (400). The message is shown as is.
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// The path exists but not for this method (405).
    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
    },

    /// Resource not found (404).
    #[error("Resource not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The backend answered with a non-success status.
    #[error("Backend rejected request with {status}: {message}")]
    Upstream {
        /// Status returned by the backend, relayed to the caller.
        status: StatusCode,
        /// Localized message for the route.
        message: String,
    },

    /// The backend could not be reached or answered with something unusable.
    #[error("Backend unavailable: {message}")]
    BackendUnavailable {
        /// Error message (for logging, not user-facing).
        message: String,
    },

    /// Internal server error (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message (for logging, not user-facing).
        message: String,
    },
}

impl ApiError {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a method not allowed error.
    pub fn method_not_allowed(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates an upstream rejection error.
    pub fn upstream(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Creates a backend unavailable error.
    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => *status,
            ApiError::BackendUnavailable { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code for categorization in logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Upstream { .. } => "UPSTREAM_REJECTED",
            ApiError::BackendUnavailable { .. } => "BACKEND_UNAVAILABLE",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns the message safe to show to end users.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BadRequest { message } => message.clone(),
            ApiError::MethodNotAllowed { .. } => "Método no permitido".to_string(),
            ApiError::NotFound { .. } => "Recurso no encontrado".to_string(),
            ApiError::Upstream { message, .. } => message.clone(),
            ApiError::BackendUnavailable { .. } | ApiError::Internal { .. } => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            ApiError::BackendUnavailable { .. } | ApiError::Internal { .. }
        )
    }
}

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if self.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = error_code,
                status = %status,
                "Client error occurred"
            );
        }

        let body = ErrorBody {
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Error Response Body
// =============================================================================

/// Error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable, localized message.
    pub message: String,
}

// =============================================================================
// From Implementations
// =============================================================================

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::backend_unavailable(format!("backend timed out: {}", err))
        } else if err.is_connect() {
            ApiError::backend_unavailable(format!("backend unreachable: {}", err))
        } else {
            ApiError::backend_unavailable(err.to_string())
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(format!("IO error: {}", err))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::method_not_allowed("PATCH", "/api/ventas").status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::upstream(StatusCode::CONFLICT, "x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::backend_unavailable("down").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let err = ApiError::backend_unavailable("connection refused at 10.0.0.3");
        assert_eq!(err.user_message(), INTERNAL_ERROR_MESSAGE);

        let err = ApiError::upstream(StatusCode::FORBIDDEN, "Error al obtener usuarios");
        assert_eq!(err.user_message(), "Error al obtener usuarios");
    }

    #[test]
    fn test_is_server_error() {
        assert!(ApiError::internal("x").is_server_error());
        assert!(ApiError::backend_unavailable("x").is_server_error());
        assert!(!ApiError::upstream(StatusCode::BAD_GATEWAY, "x").is_server_error());
        assert!(!ApiError::bad_request("x").is_server_error());
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response =
            ApiError::upstream(StatusCode::UNPROCESSABLE_ENTITY, "Error al crear venta")
                .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Error al crear venta" }));
    }
}
