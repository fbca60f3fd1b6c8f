// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The cached current user.

use bodega_core::{unwrap_payload, Role};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// The logged-in user as reported by who-am-I.
///
/// Advisory only: used for display, never for access decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User id. Numeric ids are kept in their decimal form.
    #[serde(alias = "sub", deserialize_with = "string_or_number")]
    pub id: String,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Role.
    pub role: Role,
}

impl CurrentUser {
    /// Extracts a user from a who-am-I response body.
    ///
    /// Accepts the user at the top level, under `data`, under `data.data`,
    /// or wrapped once more in a `user` field.
    pub fn from_body(body: Value) -> ClientResult<Self> {
        let payload = match unwrap_payload(body) {
            Value::Object(mut object) if object.contains_key("user") => {
                object.remove("user").unwrap_or(Value::Null)
            }
            other => other,
        };

        serde_json::from_value(payload).map_err(|e| ClientError::invalid_payload(e.to_string()))
    }

    /// Root path of the user's area.
    pub fn home(&self) -> &'static str {
        self.role.root_path()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
