// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Fire-and-forget session initialisation.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::session::SessionStore;
use crate::source::IdentitySource;

/// Resolves the current user in the background.
///
/// Consumers read the store whether or not this has finished; the handle is
/// only useful for tests and orderly shutdown.
pub fn bootstrap(store: SessionStore, source: Arc<dyn IdentitySource>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let user = store.fetch_current_user(source.as_ref()).await;
        debug!(authenticated = user.is_some(), "Session bootstrap finished");
    })
}
