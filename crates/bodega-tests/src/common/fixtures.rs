// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Signing secret, session tokens and a small page bundle.

use std::fs;

use bodega_api::{Claims, JwtConfig};
use bodega_core::Role;
use jsonwebtoken::{encode, EncodingKey, Header};
use tempfile::TempDir;

/// Secret shared by the gateway under test and the token fixtures.
pub const TEST_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Verification settings matching [`TEST_SECRET`].
pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET)
}

// =============================================================================
// Token Fixtures
// =============================================================================

/// Session tokens as the backend would issue them.
pub struct TokenFixtures;

impl TokenFixtures {
    /// Signs `claims` with `secret`.
    pub fn sign_with(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to sign token")
    }

    /// A valid token for `role`, good for ten minutes.
    pub fn for_role(role: Role) -> String {
        let claims = Claims::new(format!("user-{}", role.root_path().trim_start_matches('/')), role, 600)
            .with_username(role.as_str().to_lowercase());
        Self::sign_with(&claims, TEST_SECRET)
    }

    /// A valid administrator token.
    pub fn admin() -> String {
        Self::for_role(Role::Administrador)
    }

    /// A valid seller token.
    pub fn vendedor() -> String {
        Self::for_role(Role::Vendedor)
    }

    /// A token that expired two minutes ago.
    pub fn expired(role: Role) -> String {
        Self::sign_with(&Claims::new("user-expired", role, -120), TEST_SECRET)
    }

    /// A token signed with another secret.
    pub fn wrong_secret(role: Role) -> String {
        Self::sign_with(
            &Claims::new("user-forged", role, 600),
            "some-other-secret-that-is-long-enough",
        )
    }

    /// A well-signed token whose role the gateway does not know.
    pub fn unknown_role() -> String {
        let mut claims = Claims::new("user-x", Role::Vendedor, 600);
        claims.role = "Sommelier".to_string();
        Self::sign_with(&claims, TEST_SECRET)
    }
}

// =============================================================================
// Page Bundle
// =============================================================================

/// Writes a minimal page bundle into a fresh temporary directory.
///
/// Each page's body names the page, so tests can tell which one was served.
pub fn page_bundle() -> TempDir {
    let dir = tempfile::Builder::new()
        .prefix("bodega-pages")
        .tempdir()
        .expect("Failed to create temp directory");

    let pages = [
        ("index.html", "<h1>app</h1>"),
        ("login/index.html", "<h1>login</h1>"),
        ("admin/index.html", "<h1>admin</h1>"),
        ("enologo/index.html", "<h1>enologo</h1>"),
        ("bodega/index.html", "<h1>bodega</h1>"),
        ("vendedor/index.html", "<h1>vendedor</h1>"),
        ("assets/app.js", "console.log('bodega');"),
    ];
    for (path, content) in pages {
        let path = dir.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create page directory");
        }
        fs::write(path, content).expect("Failed to write page");
    }

    dir
}
