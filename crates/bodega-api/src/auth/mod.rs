// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session token verification.
//!
//! This module provides:
//! - Claims carried by backend-issued session tokens
//! - The [`TokenVerifier`], built once with an injected secret
//! - The per-request [`VerifiedIdentity`]

mod claims;
mod error;
mod identity;
mod verifier;

pub use claims::Claims;
pub use error::AuthError;
pub use identity::VerifiedIdentity;
pub use verifier::{JwtConfig, TokenVerifier};
