// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Injectable session context.
//!
//! Holds the current user for UI purposes. Starts empty, is filled by a
//! successful who-am-I, and is emptied on logout or on a failed fetch.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::source::{IdentitySource, ProxyClient};
use crate::user::CurrentUser;

/// Shared, cheaply clonable session context.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<CurrentUser>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Returns a snapshot of the current user.
    pub fn current(&self) -> Option<CurrentUser> {
        self.tx.borrow().clone()
    }

    /// Replaces the current user.
    pub fn set(&self, user: Option<CurrentUser>) {
        self.tx.send_replace(user);
    }

    /// Forgets the current user. No network involved.
    pub fn clear_user(&self) {
        self.set(None);
    }

    /// Returns `true` if a user is cached.
    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Subscribes to changes of the current user.
    pub fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.tx.subscribe()
    }

    /// Asks `source` who is logged in and stores the answer.
    ///
    /// Any failure empties the store; nothing is returned as an error.
    pub async fn fetch_current_user(&self, source: &dyn IdentitySource) -> Option<CurrentUser> {
        match source.who_am_i().await {
            Ok(user) => {
                debug!(id = %user.id, role = %user.role, "Current user resolved");
                self.set(Some(user.clone()));
                Some(user)
            }
            Err(e) => {
                debug!(error = %e, "No current user");
                self.clear_user();
                None
            }
        }
    }

    /// Logs out through the gateway, then clears the store whatever happened.
    pub async fn logout(&self, client: &ProxyClient) {
        match client.logout().await {
            Ok(()) => info!("Logged out"),
            Err(e) => warn!(error = %e, "Logout request failed"),
        }
        self.clear_user();
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
