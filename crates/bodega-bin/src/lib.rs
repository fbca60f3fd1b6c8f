// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # bodega-bin
//!
//! CLI binary for the Bodega gateway.
//!
//! ## Usage
//!
//! ```bash
//! # Start the gateway (default command), configured from the environment
//! BACKEND_URL=http://localhost:4000/api JWT_SECRET=... bodega
//!
//! # Start with a config file
//! bodega -c /etc/bodega/bodega.yaml
//!
//! # Validate configuration
//! bodega validate --strict
//!
//! # Show version
//! bodega version
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod shutdown;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;
pub use runtime::GatewayRuntime;
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
