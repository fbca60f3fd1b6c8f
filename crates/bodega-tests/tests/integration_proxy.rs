// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Proxy Integration Tests
//!
//! `/api` calls through a running gateway to a recording mock backend.
//!
//! - `test_auth_header_*`: credential forwarding
//! - `test_relay_*`: success and error normalization
//! - `test_session_*`: login and logout cookie handling

use std::time::Duration;

use axum::http::Method;
use bodega_core::Role;
use bodega_tests::prelude::*;
use serde_json::{json, Value};

// =============================================================================
// Credential Forwarding
// =============================================================================

#[tokio::test]
async fn test_auth_header_bearer_from_cookie() {
    let gateway = TestGateway::start().await.unwrap();
    let token = TokenFixtures::vendedor();

    let response = gateway.get("/api/vinos", Some(&token)).await;
    assert_eq!(response.status(), 200);

    let request = gateway.backend().last_request().await.unwrap();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/vinos");
    assert_eq!(
        request.header("authorization"),
        Some(format!("Bearer {}", token).as_str())
    );
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert!(request.header("x-request-id").is_some());
    assert!(request.header("cookie").is_none());
}

#[tokio::test]
async fn test_auth_header_identical_across_calls() {
    let gateway = TestGateway::start().await.unwrap();
    let token = TokenFixtures::admin();

    for path in ["/api/vinos", "/api/ventas", "/api/users", "/api/maestros/varietales"] {
        gateway.get(path, Some(&token)).await;
    }

    let requests = gateway.backend().requests().await;
    assert_eq!(requests.len(), 4);
    let first = requests[0].header("authorization").map(str::to_string);
    assert!(first.is_some());
    for request in &requests {
        assert_eq!(request.header("authorization").map(str::to_string), first);
    }
}

#[tokio::test]
async fn test_auth_header_empty_credential_without_cookie() {
    let gateway = TestGateway::start().await.unwrap();

    let response = gateway.get("/api/vinos", None).await;
    assert_eq!(response.status(), 200);

    let request = gateway.backend().last_request().await.unwrap();
    // Trailing whitespace may be stripped on the wire.
    assert_eq!(request.header("authorization").map(str::trim), Some("Bearer"));
}

#[tokio::test]
async fn test_auth_header_not_verified_by_gateway() {
    let gateway = TestGateway::start().await.unwrap();
    let token = TokenFixtures::expired(Role::Vendedor);

    gateway.get("/api/ventas", Some(&token)).await;

    // The backend decides; the stale token is forwarded unchanged.
    let request = gateway.backend().last_request().await.unwrap();
    assert_eq!(
        request.header("authorization"),
        Some(format!("Bearer {}", token).as_str())
    );
}

#[tokio::test]
async fn test_auth_header_who_am_i_forwards_raw_cookie() {
    let gateway = TestGateway::start().await.unwrap();

    gateway
        .request(Method::GET, "/api/auth/me", None)
        .header("cookie", "access_token=tok; theme=dark")
        .send()
        .await
        .unwrap();

    let request = gateway.backend().last_request().await.unwrap();
    assert_eq!(request.path, "/auth/me");
    assert_eq!(request.header("cookie"), Some("access_token=tok; theme=dark"));
    assert!(request.header("authorization").is_none());
}

// =============================================================================
// Success and Error Relay
// =============================================================================

#[tokio::test]
async fn test_relay_create_sale_success() {
    let gateway = TestGateway::start().await.unwrap();
    let created = json!({ "success": true, "data": { "id": 42, "total": 1500 } });
    gateway
        .backend()
        .respond(Method::POST, "/ventas", MockResponse::json(201, created.clone()))
        .await;

    let sale = json!({ "items": [{ "vinoId": 1, "cantidad": 2 }] });
    let response = gateway
        .post_json("/api/ventas", Some(&TokenFixtures::vendedor()), &sale)
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), created);

    let request = gateway.backend().last_request().await.unwrap();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.json(), sale);
}

#[tokio::test]
async fn test_relay_backend_rejection_uses_route_message() {
    let gateway = TestGateway::start().await.unwrap();
    gateway
        .backend()
        .respond(
            Method::POST,
            "/ventas",
            MockResponse::json(400, json!({ "message": "stock insuficiente en lote 7" })),
        )
        .await;

    let response = gateway
        .post_json("/api/ventas", Some(&TokenFixtures::vendedor()), &json!({}))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Error al crear venta" }));
}

#[tokio::test]
async fn test_relay_backend_status_is_preserved() {
    let gateway = TestGateway::start().await.unwrap();
    for (status, public, backend, message) in [
        (401, "/api/vinos", "/vinos", "Error al obtener vinos"),
        (403, "/api/users", "/users", "Error al obtener usuarios"),
        (404, "/api/users/roles", "/users/roles", "Error al obtener roles"),
        (
            500,
            "/api/reportes/inventario",
            "/reportes/inventario-valorizado",
            "Error al obtener reporte de inventario",
        ),
    ] {
        gateway
            .backend()
            .respond(Method::GET, backend, MockResponse::json(status, json!({ "message": "x" })))
            .await;

        let response = gateway.get(public, Some(&TokenFixtures::admin())).await;
        assert_eq!(response.status(), status, "path {}", public);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], message);
    }
}

#[tokio::test]
async fn test_relay_report_range_required() {
    let gateway = TestGateway::start().await.unwrap();
    let token = TokenFixtures::admin();

    for path in [
        "/api/reportes/periodo",
        "/api/reportes/periodo?start=2024-01-01",
        "/api/reportes/periodo?start=2024-01-01&end=",
    ] {
        let response = gateway.get(path, Some(&token)).await;
        assert_eq!(response.status(), 400, "path {}", path);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Los parámetros start y end son requeridos");
    }

    assert_eq!(gateway.backend().request_count().await, 0);
}

#[tokio::test]
async fn test_relay_report_range_forwarded() {
    let gateway = TestGateway::start().await.unwrap();

    let response = gateway
        .get(
            "/api/reportes/periodo?start=2024-01-01&end=2024-01-31",
            Some(&TokenFixtures::admin()),
        )
        .await;
    assert_eq!(response.status(), 200);

    let request = gateway.backend().last_request().await.unwrap();
    assert_eq!(request.path, "/reportes/ventas-periodo");
    assert_eq!(request.query.as_deref(), Some("start=2024-01-01&end=2024-01-31"));
}

#[tokio::test]
async fn test_relay_empty_body_is_null() {
    let gateway = TestGateway::start().await.unwrap();
    gateway
        .backend()
        .respond(Method::DELETE, "/vinos", MockResponse::empty(204))
        .await;

    let response = gateway
        .request(Method::DELETE, "/api/vinos", Some(&TokenFixtures::admin()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_relay_unsuccessful_envelope_passes_through() {
    let gateway = TestGateway::start().await.unwrap();
    let envelope = json!({ "success": false, "errorMessage": "sin datos" });
    gateway
        .backend()
        .respond(Method::GET, "/vinos", MockResponse::json(200, envelope.clone()))
        .await;

    let response = gateway.get("/api/vinos", Some(&TokenFixtures::admin())).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), envelope);
}

#[tokio::test]
async fn test_relay_backend_unreachable_is_internal_error() {
    // Port 9 (discard) on localhost is almost never listening.
    let gateway = TestGateway::start_with_backend_url("http://127.0.0.1:9")
        .await
        .unwrap();

    let response = gateway.get("/api/vinos", Some(&TokenFixtures::admin())).await;
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Error interno del servidor" }));

    let response = gateway.get("/ready", None).await;
    assert_eq!(response.status(), 503);
}

#[tokio::test]
async fn test_relay_malformed_backend_body_is_internal_error() {
    let gateway = TestGateway::start().await.unwrap();
    gateway
        .backend()
        .respond(Method::GET, "/vinos", MockResponse::raw(200, "<html>oops</html>"))
        .await;

    let response = gateway.get("/api/vinos", Some(&TokenFixtures::admin())).await;
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Error interno del servidor" }));
}

#[tokio::test]
async fn test_relay_silent_backend_times_out_as_internal_error() {
    let silent = SilentBackend::start().await.unwrap();
    let gateway = TestGateway::start_configured(&silent.url(), |config| {
        config
            .with_request_timeout(Duration::from_secs(2))
            .with_backend_timeout(Duration::from_secs(5))
    })
    .await
    .unwrap();

    let response = gateway.get("/api/vinos", Some(&TokenFixtures::admin())).await;
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Error interno del servidor" }));
}

#[tokio::test]
async fn test_relay_patch_forwards_body_query_and_credential() {
    let gateway = TestGateway::start().await.unwrap();
    let token = TokenFixtures::for_role(Role::EncargadoDeBodega);
    let updated = json!({ "success": true, "data": { "id": 7, "stock": 12 } });
    gateway
        .backend()
        .respond(Method::PATCH, "/vinos", MockResponse::json(200, updated.clone()))
        .await;

    let patch = json!({ "stock": 12 });
    let response = gateway
        .request(Method::PATCH, "/api/vinos?id=7", Some(&token))
        .header("content-type", "application/json")
        .body(patch.to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), updated);

    let request = gateway.backend().last_request().await.unwrap();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.path, "/vinos");
    assert_eq!(request.query.as_deref(), Some("id=7"));
    assert_eq!(request.json(), patch);
    assert_eq!(
        request.header("authorization"),
        Some(format!("Bearer {}", token).as_str())
    );
}

#[tokio::test]
async fn test_relay_unregistered_method_is_json_405() {
    let gateway = TestGateway::start().await.unwrap();

    let response = gateway
        .request(Method::PATCH, "/api/ventas", Some(&TokenFixtures::admin()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 405);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Método no permitido" }));
    assert_eq!(gateway.backend().request_count().await, 0);
}

#[tokio::test]
async fn test_relay_unknown_api_path_is_not_found() {
    let gateway = TestGateway::start().await.unwrap();

    let response = gateway.get("/api/bodegas/secretas", Some(&TokenFixtures::admin())).await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Recurso no encontrado");
    assert_eq!(gateway.backend().request_count().await, 0);
}

// =============================================================================
// Session Cookie Handling
// =============================================================================

#[tokio::test]
async fn test_session_login_relays_cookie_and_landing_page() {
    let gateway = TestGateway::start().await.unwrap();
    let token = TokenFixtures::for_role(Role::EncargadoDeBodega);
    let set_cookie = format!("access_token={}; Path=/; HttpOnly; SameSite=Lax", token);
    gateway
        .backend()
        .respond(
            Method::POST,
            "/auth/login",
            MockResponse::json(200, json!({ "success": true, "data": { "id": 7 } }))
                .with_header("set-cookie", &set_cookie),
        )
        .await;

    let credentials = json!({ "username": "jperez", "password": "secreto" });
    let response = gateway.post_json("/api/auth/login", None, &credentials).await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("set-cookie").and_then(|v| v.to_str().ok()),
        Some(set_cookie.as_str())
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["redirectTo"], "/bodega");
    assert_eq!(body["data"]["id"], 7);

    let request = gateway.backend().last_request().await.unwrap();
    assert_eq!(request.json(), credentials);
}

#[tokio::test]
async fn test_session_login_failure() {
    let gateway = TestGateway::start().await.unwrap();
    gateway
        .backend()
        .respond(
            Method::POST,
            "/auth/login",
            MockResponse::json(401, json!({ "message": "bad password" })),
        )
        .await;

    let response = gateway
        .post_json("/api/auth/login", None, &json!({ "username": "x", "password": "y" }))
        .await;

    assert_eq!(response.status(), 401);
    assert!(response.headers().get("set-cookie").is_none());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Credenciales inválidas" }));
}

#[tokio::test]
async fn test_session_logout_always_clears_cookie() {
    let gateway = TestGateway::start().await.unwrap();
    let token = TokenFixtures::admin();

    let response = gateway
        .request(Method::POST, "/api/auth/logout", Some(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let cleared = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("access_token=;") && v.contains("Max-Age=0"));
    assert!(cleared);

    gateway
        .backend()
        .respond(Method::POST, "/auth/logout", MockResponse::json(500, json!({})))
        .await;
    let response = gateway
        .request(Method::POST, "/api/auth/logout", Some(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    assert!(response.headers().get("set-cookie").is_some());
}
