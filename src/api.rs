//! REST client that sends the session's default headers.
//!
//! The client is built from the `SessionContext` once bootstrap has run, so
//! every request carries `Authorization: Bearer <token>` when a session was
//! restored and nothing when it was not. Pure parsing lives in
//! `parse_login_response` for testability.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ApiTimeouts;
use crate::error::SessionError;
use crate::session::{PersistedSession, SessionContext, SessionUser};

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` using `ctx`'s default headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, ctx: &SessionContext, timeouts: ApiTimeouts) -> Result<Self, SessionError> {
        Ok(Self { http: ctx.headers().client(timeouts)?, base_url: base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for a session record via `POST /auth`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` for non-success statuses (401 on bad
    /// credentials) and transport or decode errors otherwise.
    pub async fn login(&self, username: &str, password: &str) -> Result<PersistedSession, SessionError> {
        let body = LoginRequest { username, password };
        let response = self.http.post(self.url("/auth")).json(&body).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "login rejected");
            return Err(SessionError::Api { status: status.as_u16(), body: text });
        }

        parse_login_response(&text)
    }

    /// List users via `GET /users`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` for non-success statuses.
    pub async fn list_users(&self) -> Result<Value, SessionError> {
        let response = self.http.get(self.url("/users")).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SessionError::Api { status: status.as_u16(), body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    user: Option<SessionUser>,
}

/// Decode a successful login body into the record the store keeps.
///
/// # Errors
///
/// Returns `SessionError::Json` if the body is not a login response.
pub fn parse_login_response(text: &str) -> Result<PersistedSession, SessionError> {
    let resp: LoginResponse = serde_json::from_str(text)?;
    Ok(PersistedSession { token: Some(resp.token), scope: resp.scope, user: resp.user, ..PersistedSession::default() })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
