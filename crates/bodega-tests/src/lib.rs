// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Bodega Integration Tests
//!
//! End-to-end tests that run the gateway on an ephemeral port in front of a
//! recording mock backend.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Signing secret, tokens and page bundle
//!   - `mocks`: Recording mock backend
//!   - `harness`: Running gateway plus its mock backend
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bodega-tests
//! cargo test -p bodega-tests --test integration_proxy
//! cargo test -p bodega-tests -- --nocapture
//! ```
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use bodega_tests::prelude::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let gateway = TestGateway::start().await.unwrap();
//!     gateway.backend().respond(Method::GET, "/vinos", MockResponse::json(200, json!([])));
//!     let response = gateway.get("/api/vinos", Some(&TokenFixtures::vendedor())).await;
//!     // ...
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::fixtures::*;
    pub use crate::common::harness::*;
    pub use crate::common::init_test_logging;
    pub use crate::common::mocks::*;
}
