// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Server-side route guard for page navigation.
//!
//! Each navigation is resolved as session cookie, then verifier, then role
//! map. The outcome is either the requested page or a `303 See Other` to the
//! login page or to the user's own area.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Redirect, Response},
};
use bodega_core::LOGIN_PATH;
use tower::{Layer, Service};

use crate::auth::{TokenVerifier, VerifiedIdentity};
use crate::proxy::session_token;

// =============================================================================
// GuardDecision
// =============================================================================

/// Outcome of evaluating one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// No valid session: go to the login page.
    Unauthenticated,
    /// Valid session, but the path belongs to another role's area.
    AuthenticatedWrongArea {
        /// The verified identity.
        identity: VerifiedIdentity,
        /// Root of the identity's own area.
        redirect_to: &'static str,
    },
    /// Valid session inside the identity's own area.
    AuthenticatedAuthorized(VerifiedIdentity),
}

impl GuardDecision {
    /// Where to send the browser, or `None` to serve the page.
    pub fn redirect_location(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Unauthenticated => Some(LOGIN_PATH),
            GuardDecision::AuthenticatedWrongArea { redirect_to, .. } => Some(redirect_to),
            GuardDecision::AuthenticatedAuthorized(_) => None,
        }
    }

    /// Returns `true` if the page may be served.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::AuthenticatedAuthorized(_))
    }
}

// =============================================================================
// RouteGuard
// =============================================================================

/// Decides whether a navigation may proceed.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    verifier: Arc<TokenVerifier>,
}

impl RouteGuard {
    /// Creates a guard backed by `verifier`.
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Evaluates a navigation to `path` carrying `token`.
    pub fn evaluate(&self, token: Option<&str>, path: &str) -> GuardDecision {
        let Some(identity) = self.verifier.verify_optional(token) else {
            return GuardDecision::Unauthenticated;
        };

        if identity.may_visit(path) {
            GuardDecision::AuthenticatedAuthorized(identity)
        } else {
            let redirect_to = identity.home();
            GuardDecision::AuthenticatedWrongArea {
                identity,
                redirect_to,
            }
        }
    }
}

// =============================================================================
// GuardLayer
// =============================================================================

/// Layer applying the [`RouteGuard`] to a page service.
#[derive(Clone)]
pub struct GuardLayer {
    guard: Arc<RouteGuard>,
    public_paths: Arc<Vec<String>>,
}

impl GuardLayer {
    /// Creates a new guard layer with no public paths.
    pub fn new(guard: RouteGuard) -> Self {
        Self {
            guard: Arc::new(guard),
            public_paths: Arc::new(Vec::new()),
        }
    }

    /// Sets paths served without a session. Entries ending in `*` are prefixes.
    pub fn with_public_paths(mut self, paths: Vec<String>) -> Self {
        self.public_paths = Arc::new(paths);
        self
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardMiddleware {
            inner,
            guard: self.guard.clone(),
            public_paths: self.public_paths.clone(),
        }
    }
}

// =============================================================================
// GuardMiddleware
// =============================================================================

/// Middleware produced by [`GuardLayer`].
#[derive(Clone)]
pub struct GuardMiddleware<S> {
    inner: S,
    guard: Arc<RouteGuard>,
    public_paths: Arc<Vec<String>>,
}

impl<S> GuardMiddleware<S> {
    fn is_public_path(&self, path: &str) -> bool {
        self.public_paths.iter().any(|public| match public.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => path == public,
        })
    }
}

impl<S> Service<Request<Body>> for GuardMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let guard = self.guard.clone();
        let is_public = self.is_public_path(req.uri().path());
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if is_public {
                return inner.call(req).await;
            }

            let token = session_token(req.headers());
            let path = req.uri().path().to_string();

            match guard.evaluate(token.as_deref(), &path) {
                GuardDecision::AuthenticatedAuthorized(identity) => {
                    req.extensions_mut().insert(identity);
                    inner.call(req).await
                }
                decision => {
                    let location = decision.redirect_location().unwrap_or(LOGIN_PATH);
                    tracing::debug!(path = %path, location, "Navigation redirected");
                    Ok(Redirect::to(location).into_response())
                }
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
