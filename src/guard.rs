//! Route guard: per-navigation allow/redirect decision for page routes.
//!
//! DESIGN
//! ======
//! The decision itself is a pure function of (path, session present,
//! public path set). `gate` is the Axum middleware that gathers those inputs
//! for a request before any page handler runs and turns a redirect decision
//! into a `307 Temporary Redirect`.
//!
//! The guard only reads session state. Signing in and out happens in the
//! auth routes; the guard never creates, extends, or clears a session.

use std::collections::BTreeSet;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::{debug, warn};

use crate::services::session::{self, SESSION_COOKIE};
use crate::state::AppState;

/// Outcome of classifying one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Continue,
    Redirect(String),
}

/// Fixed routing policy: which paths need no session, and where to send
/// visitors who are in the wrong place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    public_paths: BTreeSet<String>,
    auth_path: String,
    home_path: String,
}

impl RouteGuard {
    /// Build a guard. `auth_path` is always public, whether or not it is
    /// listed in `public_paths`.
    #[must_use]
    pub fn new<I, S>(auth_path: impl Into<String>, home_path: impl Into<String>, public_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let auth_path = auth_path.into();
        let mut public: BTreeSet<String> = public_paths.into_iter().map(Into::into).collect();
        public.insert(auth_path.clone());
        Self { public_paths: public, auth_path, home_path: home_path.into() }
    }

    #[must_use]
    pub fn auth_path(&self) -> &str {
        &self.auth_path
    }

    #[must_use]
    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.contains(normalize_path(path))
    }

    /// Classify a navigation to `path`.
    ///
    /// - Signed in and heading to the auth page: redirect home.
    /// - Signed out and heading anywhere non-public: redirect to auth.
    /// - Anything else proceeds untouched.
    #[must_use]
    pub fn decide(&self, path: &str, has_session: bool) -> RouteDecision {
        let path = normalize_path(path);
        if has_session {
            if path == self.auth_path {
                return RouteDecision::Redirect(self.home_path.clone());
            }
        } else if !self.public_paths.contains(path) {
            return RouteDecision::Redirect(self.auth_path.clone());
        }
        RouteDecision::Continue
    }
}

fn normalize_path(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

/// Axum middleware enforcing `RouteGuard` on the page router.
pub async fn gate(State(state): State<AppState>, jar: CookieJar, req: Request, next: Next) -> Response {
    let has_session = has_live_session(&state, &jar).await;
    let path = req.uri().path().to_owned();

    match state.guard.decide(&path, has_session) {
        RouteDecision::Continue => next.run(req).await,
        RouteDecision::Redirect(target) => {
            debug!(%path, %target, has_session, "route guard redirect");
            Redirect::temporary(&target).into_response()
        }
    }
}

async fn has_live_session(state: &AppState, jar: &CookieJar) -> bool {
    let Some(token) = jar.get(SESSION_COOKIE).map(Cookie::value).filter(|t| !t.is_empty()) else {
        return false;
    };
    match session::validate_session(&state.pool, token).await {
        Ok(user) => user.is_some(),
        Err(e) => {
            warn!(error = %e, "session lookup failed; treating request as signed out");
            false
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
