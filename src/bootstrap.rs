//! Session bootstrapper: restores the persisted session once at startup.
//!
//! The header map gets an `Authorization` entry if and only if a usable
//! session existed when this ran. Nothing here re-checks later; the guard
//! re-reads the store on every navigation instead.

use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::headers::bearer;
use crate::session::{SessionContext, SessionState, read_session};
use crate::store::SessionStore;

/// What the bootstrapper found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Authenticated,
    NoSession,
    /// A record was present but unusable; treated as no session.
    Malformed,
}

/// Restore the persisted session under `key` into `ctx`.
///
/// # Errors
///
/// Returns `SessionError::AlreadyBootstrapped` on a second call for the same
/// context, or a store/header error if the session cannot be applied.
pub fn bootstrap(
    store: &dyn SessionStore,
    key: &str,
    ctx: &mut SessionContext,
) -> Result<BootstrapOutcome, SessionError> {
    if ctx.bootstrapped {
        return Err(SessionError::AlreadyBootstrapped);
    }

    let outcome = match read_session(store, key)? {
        SessionState::Valid(session) => {
            let token = session.usable_token().unwrap_or_default();
            ctx.headers.set_default_header("Authorization", &bearer(token))?;
            ctx.authenticated = true;
            info!(key, "restored persisted session");
            BootstrapOutcome::Authenticated
        }
        SessionState::Malformed(reason) => {
            warn!(key, %reason, "ignoring malformed persisted session");
            BootstrapOutcome::Malformed
        }
        SessionState::Absent => {
            debug!(key, "no persisted session");
            BootstrapOutcome::NoSession
        }
    };

    ctx.bootstrapped = true;
    Ok(outcome)
}

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;
