// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity recovered from a verified token.

use bodega_core::Role;
use serde::{Deserialize, Serialize};

use super::Claims;

/// The role/subject pair recovered from one successful verification.
///
/// Lives for the request that produced it. Inserted into request extensions
/// by the route guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// User id.
    pub subject: String,
    /// Verified role.
    pub role: Role,
    /// Login name, if the token carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Email, if the token carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl VerifiedIdentity {
    pub(crate) fn from_claims(claims: Claims, role: Role) -> Self {
        Self {
            subject: claims.sub,
            role,
            username: claims.username,
            email: claims.email,
        }
    }

    /// Root path of the identity's application area.
    pub fn home(&self) -> &'static str {
        self.role.root_path()
    }

    /// Returns `true` if `path` lies in the identity's area.
    pub fn may_visit(&self, path: &str) -> bool {
        self.role.owns_path(path)
    }
}
