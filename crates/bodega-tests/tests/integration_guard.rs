// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Route Guard Integration Tests
//!
//! Page navigation through a running gateway.
//!
//! - `test_guard_*`: redirects and pass-through for role areas
//! - `test_public_*`: pages served without a session
//! - `test_root_*`: the `/` entry point

use bodega_core::Role;
use bodega_tests::prelude::*;

fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn test_guard_unauthenticated_goes_to_login() {
    let gateway = TestGateway::start().await.unwrap();

    for path in ["/admin/", "/enologo/lotes", "/bodega/", "/vendedor/ventas"] {
        let response = gateway.get(path, None).await;
        assert_eq!(response.status(), 303, "path {}", path);
        assert_eq!(location(&response).as_deref(), Some("/login"), "path {}", path);
    }

    // The guard never calls the backend.
    assert_eq!(gateway.backend().request_count().await, 0);
}

#[tokio::test]
async fn test_guard_wrong_area_goes_home() {
    let gateway = TestGateway::start().await.unwrap();

    let token = TokenFixtures::vendedor();
    let response = gateway.get("/admin/usuarios", Some(&token)).await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/vendedor"));

    let token = TokenFixtures::for_role(Role::EnologoProductor);
    let response = gateway.get("/bodega/", Some(&token)).await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/enologo"));
}

#[tokio::test]
async fn test_guard_own_area_served() {
    let gateway = TestGateway::start().await.unwrap();
    let token = TokenFixtures::admin();

    let response = gateway.get("/admin/", Some(&token)).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "<h1>admin</h1>");

    // Client-side routes fall back to the app shell.
    let response = gateway.get("/admin/usuarios", Some(&token)).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "<h1>app</h1>");
}

#[tokio::test]
async fn test_guard_every_role_matrix() {
    let gateway = TestGateway::start().await.unwrap();

    for role in Role::ALL {
        let token = TokenFixtures::for_role(role);
        for area in Role::ALL {
            let path = format!("{}/", area.root_path());
            let response = gateway.get(&path, Some(&token)).await;
            if area == role {
                assert_eq!(response.status(), 200, "{} visiting {}", role, path);
            } else {
                assert_eq!(response.status(), 303, "{} visiting {}", role, path);
                assert_eq!(location(&response).as_deref(), Some(role.root_path()));
            }
        }
    }
}

#[tokio::test]
async fn test_guard_invalid_tokens_go_to_login() {
    let gateway = TestGateway::start().await.unwrap();

    let tokens = [
        TokenFixtures::expired(Role::Administrador),
        TokenFixtures::wrong_secret(Role::Administrador),
        TokenFixtures::unknown_role(),
        "garbage".to_string(),
    ];
    for token in &tokens {
        let response = gateway.get("/admin/", Some(token)).await;
        assert_eq!(response.status(), 303);
        assert_eq!(location(&response).as_deref(), Some("/login"));
    }
}

#[tokio::test]
async fn test_guard_area_prefix_is_a_whole_segment() {
    let gateway = TestGateway::start().await.unwrap();
    let token = TokenFixtures::admin();

    // "/administracion" is not inside "/admin".
    let response = gateway.get("/administracion", Some(&token)).await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/admin"));
}

#[tokio::test]
async fn test_public_login_and_assets() {
    let gateway = TestGateway::start().await.unwrap();

    let response = gateway.get("/login/", None).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "<h1>login</h1>");

    let response = gateway.get("/assets/app.js", None).await;
    assert_eq!(response.status(), 200);

    // Logged-in users may still open the login page.
    let response = gateway.get("/login/", Some(&TokenFixtures::admin())).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_root_redirects() {
    let gateway = TestGateway::start().await.unwrap();

    let response = gateway.get("/", None).await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/login"));

    let token = TokenFixtures::for_role(Role::EncargadoDeBodega);
    let response = gateway.get("/", Some(&token)).await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/bodega"));
}

#[tokio::test]
async fn test_health_endpoints_are_open() {
    let gateway = TestGateway::start().await.unwrap();

    let response = gateway.get("/health", None).await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");

    let response = gateway.get("/ready", None).await;
    assert_eq!(response.status(), 200);

    gateway.shutdown().await;
}
