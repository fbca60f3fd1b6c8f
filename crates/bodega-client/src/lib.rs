// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # bodega-client
//!
//! Client-side session state for Bodega front-ends.
//!
//! The [`SessionStore`] caches who is logged in so that UI code can show it.
//! It is advisory only: the gateway and the backend make every access
//! decision.
//!
//! ```no_run
//! use std::sync::Arc;
//! use bodega_client::{bootstrap, ProxyClient, SessionStore};
//!
//! # async fn run() -> bodega_client::ClientResult<()> {
//! let store = SessionStore::new();
//! let client = ProxyClient::new("http://localhost:3000")?.with_session_token("...")?;
//! bootstrap(store.clone(), Arc::new(client));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod bootstrap;
pub mod error;
pub mod session;
pub mod source;
pub mod user;

pub use bootstrap::bootstrap;
pub use error::{ClientError, ClientResult};
pub use session::SessionStore;
pub use source::{IdentitySource, ProxyClient, LOGOUT_PATH, WHO_AM_I_PATH};
pub use user::CurrentUser;
