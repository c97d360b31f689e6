//! Persisted session record and the explicit session context.
//!
//! DESIGN
//! ======
//! The persisted record is the only source of truth for "logged in". It is
//! re-read from the store whenever a decision needs it, never cached.
//! `SessionContext` carries what startup derived from it (authentication
//! flag, default headers) to the components that need them.

use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SessionError;
use crate::headers::{DefaultHeaders, bearer};
use crate::store::SessionStore;

// =============================================================================
// PERSISTED SESSION
// =============================================================================

/// User details returned alongside the token at login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub admin: bool,
}

/// Session record stored under the session key by the login flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// User GUID the token was issued for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    /// Other user fields written by the login flow.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersistedSession {
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()), ..Self::default() }
    }

    /// The token, if present and non-blank.
    #[must_use]
    pub fn usable_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Classification of whatever the store holds under the session key.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Absent,
    /// A record exists but cannot authenticate anything.
    Malformed(String),
    Valid(PersistedSession),
}

impl SessionState {
    /// Classify a raw store value.
    #[must_use]
    pub fn classify(raw: Option<Value>) -> Self {
        let Some(raw) = raw else {
            return Self::Absent;
        };
        if raw.is_null() {
            return Self::Absent;
        }
        if !raw.is_object() {
            return Self::Malformed("session record is not an object".into());
        }
        let session = match serde_json::from_value::<PersistedSession>(raw) {
            Ok(session) => session,
            Err(e) => return Self::Malformed(format!("session record undecodable: {e}")),
        };
        let problem = match session.usable_token() {
            None => Some("session record has no token"),
            Some(token) if HeaderValue::from_str(&bearer(token)).is_err() => {
                Some("session token is not a legal header value")
            }
            Some(_) => None,
        };
        match problem {
            Some(reason) => Self::Malformed(reason.into()),
            None => Self::Valid(session),
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Valid(session) => session.usable_token(),
            Self::Absent | Self::Malformed(_) => None,
        }
    }
}

/// Read and classify the session currently in `store`.
///
/// # Errors
///
/// Returns an error if the store itself cannot be read.
pub fn read_session(store: &dyn SessionStore, key: &str) -> Result<SessionState, SessionError> {
    Ok(SessionState::classify(store.get(key)?))
}

/// Write a session record, as the login flow does after a successful sign-in.
///
/// # Errors
///
/// Returns an error if the record cannot be encoded or stored.
pub fn persist_session(store: &dyn SessionStore, key: &str, session: &PersistedSession) -> Result<(), SessionError> {
    store.set(key, serde_json::to_value(session)?)?;
    tracing::info!(key, scope = session.scope.as_deref().unwrap_or(""), "session persisted");
    Ok(())
}

/// Remove the session record, as logout does.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn clear_session(store: &dyn SessionStore, key: &str) -> Result<(), SessionError> {
    store.remove(key)?;
    tracing::info!(key, "session cleared");
    Ok(())
}

// =============================================================================
// SESSION CONTEXT
// =============================================================================

/// Application-wide session state derived at startup.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub(crate) authenticated: bool,
    pub(crate) bootstrapped: bool,
    pub(crate) headers: DefaultHeaders,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    #[must_use]
    pub fn headers(&self) -> &DefaultHeaders {
        &self.headers
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
