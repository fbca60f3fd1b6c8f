// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Response envelope shared by client services.
//!
//! Services consume `{ success, data, errorMessage }`. Backend payloads are
//! sometimes nested one level deeper (`data.data`), so [`unwrap_payload`]
//! accepts either shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Envelope
// =============================================================================

/// Generic response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Whether the operation was successful.
    pub success: bool,
    /// Response data (if successful).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<T> Envelope<T> {
    /// Creates a successful envelope with data.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_message: None,
        }
    }

    /// Creates a failed envelope.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error_message: Some(message.into()),
        }
    }

    /// Converts the envelope into a `Result`.
    ///
    /// A failed envelope without a message yields an empty string.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error_message.unwrap_or_default())
        }
    }
}

// =============================================================================
// Payload Unwrapping
// =============================================================================

/// Extracts the payload from a backend response body.
///
/// Returns `data.data` when present, else `data`, else the body itself.
pub fn unwrap_payload(body: Value) -> Value {
    match body {
        Value::Object(mut outer) => match outer.remove("data") {
            Some(Value::Object(mut inner)) => match inner.remove("data") {
                Some(nested) => nested,
                None => Value::Object(inner),
            },
            Some(data) => data,
            None => Value::Object(outer),
        },
        other => other,
    }
}

// =============================================================================
// Tests
// =============================================================================
