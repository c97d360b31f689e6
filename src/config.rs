//! Runtime configuration parsed from environment variables.

use crate::error::SessionError;
use crate::router::{Route, RouteTable};

pub const DEFAULT_STORE_PATH: &str = ".session-store.json";
pub const DEFAULT_SESSION_KEY: &str = "user";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_LOGIN_ROUTE: &str = "login";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:9080/api/v3";
pub const DEFAULT_API_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_API_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_API_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub store_path: String,
    pub session_key: String,
    pub routes: RouteTable,
    pub api_base_url: String,
    pub timeouts: ApiTimeouts,
}

impl GuardConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `SESSION_STORE_PATH`: default `.session-store.json`
    /// - `SESSION_KEY`: default `user`
    /// - `LOGIN_PATH` / `LOGIN_ROUTE`: default `/login` / `login`
    /// - `PUBLIC_PATHS`: comma-separated extra public paths
    /// - `API_BASE_URL`: default `http://127.0.0.1:9080/api/v3`
    /// - `API_REQUEST_TIMEOUT_SECS`: default 30
    /// - `API_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` when the login route or session key is empty.
    pub fn from_env() -> Result<Self, SessionError> {
        let store_path = std::env::var("SESSION_STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
        let session_key = non_empty("SESSION_KEY", DEFAULT_SESSION_KEY)?;
        let login_path = non_empty("LOGIN_PATH", DEFAULT_LOGIN_PATH)?;
        let login_name = non_empty("LOGIN_ROUTE", DEFAULT_LOGIN_ROUTE)?;
        let public = parse_public_paths(std::env::var("PUBLIC_PATHS").ok().as_deref());

        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = ApiTimeouts {
            request_secs: env_parse_u64("API_REQUEST_TIMEOUT_SECS", DEFAULT_API_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("API_CONNECT_TIMEOUT_SECS", DEFAULT_API_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self {
            store_path,
            session_key,
            routes: RouteTable::new(Route::new(login_name, login_path)).with_public_paths(public),
            api_base_url,
            timeouts,
        })
    }
}

fn non_empty(key: &str, default: &str) -> Result<String, SessionError> {
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    if value.trim().is_empty() {
        return Err(SessionError::Config(format!("{key} is empty")));
    }
    Ok(value)
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_public_paths(raw: Option<&str>) -> Vec<String> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
