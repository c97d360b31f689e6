//! Route table and a synchronous in-memory router.
//!
//! ARCHITECTURE
//! ============
//! `MemoryRouter::navigate` is the dispatch pipeline: every navigation first
//! emits a "navigation starting" event to the installed hooks, in install
//! order. The first hook that answers `RedirectTo` replaces the pending
//! target; the redirect is itself a navigation and goes through the hooks
//! again. Hops are capped so two disagreeing guards cannot spin forever.
//! Hooks see only the path; query and fragment stay on the recorded target.

use tracing::{debug, warn};

use crate::error::SessionError;
use crate::guard::Decision;

/// Redirect hops allowed within one `navigate` call.
pub const MAX_REDIRECT_HOPS: usize = 8;

// =============================================================================
// ROUTES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Symbolic name used by redirects.
    pub name: String,
    pub path: String,
}

impl Route {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

/// Known routes plus the public allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    login: Route,
    public: Vec<String>,
    named: Vec<Route>,
}

impl RouteTable {
    /// A table whose only public path is the login route's.
    #[must_use]
    pub fn new(login: Route) -> Self {
        Self { login, public: Vec::new(), named: Vec::new() }
    }

    /// Add more exact-match public paths after the login path.
    #[must_use]
    pub fn with_public_paths(mut self, paths: impl IntoIterator<Item = String>) -> Self {
        self.public.extend(paths);
        self
    }

    /// Register another named route for redirects.
    #[must_use]
    pub fn with_route(mut self, route: Route) -> Self {
        self.named.push(route);
        self
    }

    #[must_use]
    pub fn login(&self) -> &Route {
        &self.login
    }

    /// Public paths in order, login path first.
    #[must_use]
    pub fn allow_list(&self) -> Vec<&str> {
        std::iter::once(self.login.path.as_str())
            .chain(self.public.iter().map(String::as_str))
            .collect()
    }

    /// Exact string match against the allow-list. Sub-paths are not public.
    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        self.allow_list().contains(&path)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Route> {
        std::iter::once(&self.login)
            .chain(self.named.iter())
            .find(|r| r.name == name)
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Router collaborator the guard works against.
pub trait Router {
    fn current_path(&self) -> &str;

    /// Navigate to the route registered under `route_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the route is unknown or the navigation loops.
    fn redirect_to(&mut self, route_name: &str) -> Result<(), SessionError>;
}

/// Receives "navigation starting" events.
pub trait NavigationHook {
    fn on_navigation_start(&self, target: &str) -> Decision;
}

/// One completed `navigate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    pub resolved: String,
}

impl Navigation {
    #[must_use]
    pub fn redirected(&self) -> bool {
        self.requested != self.resolved
    }
}

pub struct MemoryRouter {
    routes: RouteTable,
    current: String,
    hooks: Vec<Box<dyn NavigationHook>>,
    history: Vec<Navigation>,
}

impl MemoryRouter {
    #[must_use]
    pub fn new(routes: RouteTable, start: impl Into<String>) -> Self {
        Self { routes, current: start.into(), hooks: Vec::new(), history: Vec::new() }
    }

    /// Subscribe a hook to navigation-start events.
    pub fn install(&mut self, hook: impl NavigationHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    #[must_use]
    pub fn history(&self) -> &[Navigation] {
        &self.history
    }

    /// Navigate to `target`, letting hooks redirect it first.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRoute` if a hook redirects to an unregistered name and
    /// `RedirectLoop` after `MAX_REDIRECT_HOPS` redirects.
    pub fn navigate(&mut self, target: &str) -> Result<&Navigation, SessionError> {
        let mut pending = target.to_owned();

        for _ in 0..=MAX_REDIRECT_HOPS {
            let Some(route_name) = self.first_redirect(path_only(&pending)) else {
                debug!(requested = target, resolved = %pending, "navigation complete");
                self.current.clone_from(&pending);
                self.history.push(Navigation { requested: target.to_owned(), resolved: pending });
                return Ok(&self.history[self.history.len() - 1]);
            };

            let route = self
                .routes
                .find(&route_name)
                .ok_or_else(|| SessionError::UnknownRoute(route_name.clone()))?;
            debug!(from = %pending, to = %route.path, route = %route_name, "navigation redirected");
            pending.clone_from(&route.path);
        }

        warn!(requested = target, "redirect hop limit reached");
        Err(SessionError::RedirectLoop(target.to_owned()))
    }

    fn first_redirect(&self, target: &str) -> Option<String> {
        self.hooks.iter().find_map(|hook| match hook.on_navigation_start(target) {
            Decision::Allow => None,
            Decision::RedirectTo(name) => Some(name),
        })
    }
}

/// The path component of a navigation target, without `?query` or `#fragment`.
#[must_use]
pub fn path_only(target: &str) -> &str {
    target.split(['?', '#']).next().unwrap_or(target)
}

impl Router for MemoryRouter {
    fn current_path(&self) -> &str {
        &self.current
    }

    fn redirect_to(&mut self, route_name: &str) -> Result<(), SessionError> {
        let path = self
            .routes
            .find(route_name)
            .map(|r| r.path.clone())
            .ok_or_else(|| SessionError::UnknownRoute(route_name.to_owned()))?;
        self.navigate(&path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
