// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Token Verification Integration Tests
//!
//! - `test_verify_*`: role extraction from backend-issued tokens
//! - `test_reject_*`: every failure collapses to "no role"

use bodega_api::{AuthError, TokenVerifier};
use bodega_core::Role;
use bodega_tests::prelude::*;

fn verifier() -> TokenVerifier {
    TokenVerifier::new(jwt_config()).expect("verifier")
}

#[test]
fn test_verify_every_role() {
    let verifier = verifier();
    for role in Role::ALL {
        let token = TokenFixtures::for_role(role);
        assert_eq!(verifier.verify_and_get_role(Some(&token)), Some(role));
    }
}

#[test]
fn test_verify_identity_maps_to_home() {
    let identity = verifier()
        .verify(&TokenFixtures::for_role(Role::EnologoProductor))
        .unwrap();
    assert_eq!(identity.role, Role::EnologoProductor);
    assert_eq!(identity.home(), "/enologo");
    assert!(identity.may_visit("/enologo/lotes"));
    assert!(!identity.may_visit("/admin"));
}

#[test]
fn test_verify_is_pure() {
    let verifier = verifier();
    let token = TokenFixtures::admin();
    let first = verifier.verify_and_get_role(Some(&token));
    for _ in 0..5 {
        assert_eq!(verifier.verify_and_get_role(Some(&token)), first);
    }
}

#[test]
fn test_reject_absent() {
    assert_eq!(verifier().verify_and_get_role(None), None);
    assert_eq!(verifier().verify(""), Err(AuthError::Missing));
}

#[test]
fn test_reject_expired() {
    let token = TokenFixtures::expired(Role::Administrador);
    assert_eq!(verifier().verify(&token), Err(AuthError::Expired));
    assert_eq!(verifier().verify_and_get_role(Some(&token)), None);
}

#[test]
fn test_reject_wrong_secret() {
    let token = TokenFixtures::wrong_secret(Role::Administrador);
    assert_eq!(verifier().verify(&token), Err(AuthError::InvalidSignature));
    assert_eq!(verifier().verify_and_get_role(Some(&token)), None);
}

#[test]
fn test_reject_garbage() {
    for token in ["not-a-jwt", "a.b.c", "Bearer x"] {
        assert_eq!(verifier().verify_and_get_role(Some(token)), None);
    }
}

#[test]
fn test_reject_unknown_role() {
    let token = TokenFixtures::unknown_role();
    assert!(matches!(
        verifier().verify(&token),
        Err(AuthError::UnknownRole(_))
    ));
    assert_eq!(verifier().verify_and_get_role(Some(&token)), None);
}

#[test]
fn test_reject_tampered_payload() {
    let token = TokenFixtures::vendedor();
    let admin = TokenFixtures::admin();

    // Vendedor header and signature with the administrator's payload.
    let parts: Vec<&str> = token.split('.').collect();
    let admin_parts: Vec<&str> = admin.split('.').collect();
    let forged = format!("{}.{}.{}", parts[0], admin_parts[1], parts[2]);

    assert_eq!(verifier().verify_and_get_role(Some(&forged)), None);
}
