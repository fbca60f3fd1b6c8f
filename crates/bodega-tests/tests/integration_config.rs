// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Configuration Integration Tests
//!
//! From a config file and environment to a running server configuration.

use std::io::Write;
use std::time::Duration;

use bodega_api::{ApiConfig, AppState, TokenVerifier};
use bodega_config::{ConfigFormat, ConfigLoader};
use bodega_core::Role;
use bodega_tests::prelude::*;

#[test]
fn test_yaml_file_to_api_config() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        r#"
server:
  port: 8088
  pages_dir: "/srv/bodega"
  cors:
    allowed_origins: ["https://bodega.example"]
    allow_credentials: true
backend:
  url: "${{BACKEND_URL}}/"
  timeout_secs: 12
jwt:
  secret: "${{JWT_SECRET}}"
"#
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_environment([
            ("BACKEND_URL", "http://backend:4000/api"),
            ("JWT_SECRET", TEST_SECRET),
        ])
        .load(file.path())
        .unwrap();
    let api = ApiConfig::from_config(&config);

    assert_eq!(api.port, 8088);
    assert_eq!(api.backend_url, "http://backend:4000/api");
    assert_eq!(api.backend_timeout, Duration::from_secs(12));
    assert_eq!(api.cors_origins, vec!["https://bodega.example".to_string()]);
    assert!(api.cors_allow_credentials);
    assert!(api.public_paths.iter().any(|p| p == "/login"));

    let verifier = TokenVerifier::new(api.jwt.clone()).unwrap();
    assert_eq!(
        verifier.verify_and_get_role(Some(&TokenFixtures::admin())),
        Some(Role::Administrador)
    );
}

#[test]
fn test_environment_only_configuration() {
    let config = ConfigLoader::new()
        .with_environment([
            ("BACKEND_URL", "http://localhost:4000/api"),
            ("JWT_SECRET", TEST_SECRET),
            ("BODEGA_PORT", "9090"),
        ])
        .load_or_default(None)
        .unwrap();

    let state = AppState::builder()
        .config(ApiConfig::from_config(&config))
        .build()
        .unwrap();
    assert_eq!(state.config.port, 9090);
    assert_eq!(state.backend().base_url(), "http://localhost:4000/api");
}

#[test]
fn test_missing_secret_is_rejected() {
    let result = ConfigLoader::new()
        .with_environment([("BACKEND_URL", "http://localhost:4000/api")])
        .load_from_str("{}", ConfigFormat::Json);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("JWT_SECRET"));
}
