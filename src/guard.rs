//! Navigation guard: keeps unauthenticated users on public routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The decision is a pure function of the target path and whether a usable
//! session exists right now. `SessionGuard` supplies the second input by
//! re-reading the store on every event, so a logout after startup is seen
//! by the next navigation.

use tracing::{debug, warn};

use crate::router::{NavigationHook, RouteTable};
use crate::session::{SessionState, read_session};
use crate::store::SessionStore;

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Replace the pending navigation with the named route.
    RedirectTo(String),
}

pub trait NavigationGuard {
    fn decide(&self, target: &str, session: &SessionState) -> Decision;
}

/// Redirects restricted targets to login while no session is present.
#[derive(Debug, Clone)]
pub struct LoginGuard {
    routes: RouteTable,
}

impl LoginGuard {
    #[must_use]
    pub fn new(routes: RouteTable) -> Self {
        Self { routes }
    }
}

impl NavigationGuard for LoginGuard {
    fn decide(&self, target: &str, session: &SessionState) -> Decision {
        let restricted = !self.routes.is_public(target);
        if restricted && !session.is_present() {
            Decision::RedirectTo(self.routes.login().name.clone())
        } else {
            Decision::Allow
        }
    }
}

/// A `LoginGuard` bound to the live session store.
pub struct SessionGuard<S> {
    guard: LoginGuard,
    store: S,
    key: String,
}

impl<S: SessionStore> SessionGuard<S> {
    #[must_use]
    pub fn new(routes: RouteTable, store: S, key: impl Into<String>) -> Self {
        Self { guard: LoginGuard::new(routes), store, key: key.into() }
    }

    /// Re-read the session and decide on `target`.
    ///
    /// An unreadable store counts as no session.
    pub fn check(&self, target: &str) -> Decision {
        let session = read_session(&self.store, &self.key).unwrap_or_else(|e| {
            warn!(error = %e, code = e.error_code(), "session store unreadable during navigation");
            SessionState::Absent
        });
        let decision = self.guard.decide(target, &session);
        if let Decision::RedirectTo(route) = &decision {
            debug!(path = target, %route, "unauthenticated navigation redirected");
        }
        decision
    }
}

impl<S: SessionStore> NavigationHook for SessionGuard<S> {
    fn on_navigation_start(&self, target: &str) -> Decision {
        self.check(target)
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
