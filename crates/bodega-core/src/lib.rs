// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # bodega-core
//!
//! Core abstractions shared by every Bodega component.
//!
//! - **Role**: the closed set of staff roles and the role-to-area routing table
//! - **Envelope**: the `{ success, data, errorMessage }` response convention
//! - **Error**: core error type
//!
//! ## Example
//!
//! ```
//! use bodega_core::Role;
//!
//! assert_eq!(Role::Vendedor.root_path(), "/vendedor");
//! assert_eq!(Role::from_path("/admin/usuarios"), Some(Role::Administrador));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod envelope;
pub mod error;
pub mod role;

pub use envelope::{unwrap_payload, Envelope};
pub use error::{CoreError, CoreResult};
pub use role::{root_segment, Role, LOGIN_PATH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
