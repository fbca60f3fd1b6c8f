// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Staff roles and the role-to-area routing table.
//!
//! Every role owns exactly one application area, identified by its root path.
//! The mapping is total and injective, so the inverse lookup from a path's
//! first segment back to a role is unambiguous.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Path of the login page. Unauthenticated navigation is redirected here.
pub const LOGIN_PATH: &str = "/login";

// =============================================================================
// Role
// =============================================================================

/// The closed set of staff roles.
///
/// Wire names match the backend's token claims exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full administration of users and master data.
    #[serde(rename = "Administrador")]
    Administrador,
    /// Winemaker / producer: production and lot traceability.
    #[serde(rename = "Enologo_Productor")]
    EnologoProductor,
    /// Cellar manager: stock and inventory movements.
    #[serde(rename = "Encargado_de_Bodega")]
    EncargadoDeBodega,
    /// Sales staff.
    #[serde(rename = "Vendedor")]
    Vendedor,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 4] = [
        Role::Administrador,
        Role::EnologoProductor,
        Role::EncargadoDeBodega,
        Role::Vendedor,
    ];

    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrador => "Administrador",
            Role::EnologoProductor => "Enologo_Productor",
            Role::EncargadoDeBodega => "Encargado_de_Bodega",
            Role::Vendedor => "Vendedor",
        }
    }

    /// Parses a wire name. Matching is exact; anything else is not a role.
    pub fn parse(s: &str) -> Option<Self> {
        Role::ALL.into_iter().find(|role| role.as_str() == s)
    }

    /// Returns the root path of the role's application area.
    pub fn root_path(&self) -> &'static str {
        match self {
            Role::Administrador => "/admin",
            Role::EnologoProductor => "/enologo",
            Role::EncargadoDeBodega => "/bodega",
            Role::Vendedor => "/vendedor",
        }
    }

    /// Returns the role owning the area that `path` belongs to.
    ///
    /// Only the first path segment is considered: `/admin/usuarios/3`
    /// resolves to [`Role::Administrador`].
    pub fn from_path(path: &str) -> Option<Self> {
        let segment = root_segment(path);
        Role::ALL
            .into_iter()
            .find(|role| role.root_path() == segment)
    }

    /// Returns `true` if `path` lies inside this role's area.
    pub fn owns_path(&self, path: &str) -> bool {
        root_segment(path) == self.root_path()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| CoreError::unknown_role(s))
    }
}

// =============================================================================
// Path Helpers
// =============================================================================

/// Returns the first segment of `path` including its leading slash, if any.
///
/// Query strings and fragments are ignored. The root path yields `/`.
pub fn root_segment(path: &str) -> &str {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return "/";
    }

    let leading = path.len() - trimmed.len();
    let end = trimmed.find('/').map(|i| i + leading).unwrap_or(path.len());
    if leading == 0 {
        // Relative path: there is no slash to keep.
        return &path[..end];
    }
    // Keep exactly one leading slash.
    &path[leading - 1..end]
}

// =============================================================================
// Tests
// =============================================================================
