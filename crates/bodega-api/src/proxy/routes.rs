// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Declarative proxy route table.

use std::collections::HashMap;

use axum::http::Method;

/// Message returned when a required query parameter is missing or empty.
pub const MISSING_RANGE_MESSAGE: &str = "Los parámetros start y end son requeridos";

/// How the browser's credential is forwarded to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Bearer <access_token cookie>`.
    Bearer,
    /// The raw `Cookie` header, verbatim.
    RawCookie,
}

/// What a successful call does to the browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Nothing.
    None,
    /// Relay the backend's session cookie and add the role's landing page.
    Establish,
    /// Always clear the session cookie.
    Clear,
}

/// One public endpoint and the backend call it maps to.
#[derive(Debug, Clone)]
pub struct ProxyRoute {
    /// HTTP method, shared by the public and backend side.
    pub method: Method,
    /// Public path under `/api`.
    pub path: &'static str,
    /// Path appended to the backend base URL.
    pub backend_path: &'static str,
    /// Localized message returned when the backend rejects the call.
    pub error_message: &'static str,
    /// Credential forwarding mode.
    pub credentials: Credentials,
    /// Query parameters that must be present and non-empty.
    pub required_query: &'static [&'static str],
    /// Session side effect.
    pub session: SessionEffect,
}

impl ProxyRoute {
    /// Creates a bearer-authenticated route with no session effect.
    pub fn new(
        method: Method,
        path: &'static str,
        backend_path: &'static str,
        error_message: &'static str,
    ) -> Self {
        Self {
            method,
            path,
            backend_path,
            error_message,
            credentials: Credentials::Bearer,
            required_query: &[],
            session: SessionEffect::None,
        }
    }

    /// Creates a GET route.
    pub fn get(path: &'static str, backend_path: &'static str, message: &'static str) -> Self {
        Self::new(Method::GET, path, backend_path, message)
    }

    /// Creates a POST route.
    pub fn post(path: &'static str, backend_path: &'static str, message: &'static str) -> Self {
        Self::new(Method::POST, path, backend_path, message)
    }

    /// Creates a PATCH route.
    pub fn patch(path: &'static str, backend_path: &'static str, message: &'static str) -> Self {
        Self::new(Method::PATCH, path, backend_path, message)
    }

    /// Creates a DELETE route.
    pub fn delete(path: &'static str, backend_path: &'static str, message: &'static str) -> Self {
        Self::new(Method::DELETE, path, backend_path, message)
    }

    /// Sets the credential forwarding mode.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Requires the given query parameters.
    pub fn requires(mut self, params: &'static [&'static str]) -> Self {
        self.required_query = params;
        self
    }

    /// Sets the session side effect.
    pub fn with_session(mut self, session: SessionEffect) -> Self {
        self.session = session;
        self
    }

    /// Returns `true` if the inbound body is forwarded.
    pub fn forwards_body(&self) -> bool {
        [Method::POST, Method::PUT, Method::PATCH, Method::DELETE].contains(&self.method)
    }

    /// Returns the first required parameter missing from `query`.
    pub fn missing_param(&self, query: &HashMap<String, String>) -> Option<&'static str> {
        self.required_query
            .iter()
            .copied()
            .find(|name| query.get(*name).map_or(true, |v| v.trim().is_empty()))
    }
}

/// Every endpoint the gateway proxies.
pub fn proxy_routes() -> Vec<ProxyRoute> {
    vec![
        // Auth
        ProxyRoute::get("/api/auth/me", "/auth/me", "No autenticado")
            .with_credentials(Credentials::RawCookie),
        ProxyRoute::post("/api/auth/login", "/auth/login", "Credenciales inválidas")
            .with_session(SessionEffect::Establish),
        ProxyRoute::post("/api/auth/logout", "/auth/logout", "Error al cerrar sesión")
            .with_session(SessionEffect::Clear),
        // Master data
        ProxyRoute::get(
            "/api/maestros/varietales",
            "/maestros/varietales",
            "Error al obtener varietales",
        ),
        ProxyRoute::post(
            "/api/maestros/varietales",
            "/maestros/varietales",
            "Error al crear varietal",
        ),
        // Reports
        ProxyRoute::get(
            "/api/reportes/inventario",
            "/reportes/inventario-valorizado",
            "Error al obtener reporte de inventario",
        ),
        ProxyRoute::get(
            "/api/reportes/periodo",
            "/reportes/ventas-periodo",
            "Error al obtener reporte de ventas",
        )
        .requires(&["start", "end"]),
        // Users
        ProxyRoute::get("/api/users", "/users", "Error al obtener usuarios"),
        ProxyRoute::post("/api/users", "/users", "Error al crear usuario"),
        ProxyRoute::get("/api/users/roles", "/users/roles", "Error al obtener roles"),
        // Sales
        ProxyRoute::get("/api/ventas", "/ventas", "Error al obtener ventas"),
        ProxyRoute::post("/api/ventas", "/ventas", "Error al crear venta"),
        // Wines
        ProxyRoute::get("/api/vinos", "/vinos", "Error al obtener vinos"),
        ProxyRoute::post("/api/vinos", "/vinos", "Error al crear vino"),
        ProxyRoute::patch("/api/vinos", "/vinos", "Error al actualizar vino"),
        ProxyRoute::delete("/api/vinos", "/vinos", "Error al eliminar vino"),
    ]
}
