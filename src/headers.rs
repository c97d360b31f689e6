//! Default request headers merged into every outgoing request.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

use crate::config::ApiTimeouts;
use crate::error::SessionError;

/// Format a bearer credential.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Header registry consulted when building HTTP clients.
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    map: HeaderMap,
}

impl DefaultHeaders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or value is not a legal HTTP header.
    pub fn set_default_header(&mut self, name: &str, value: &str) -> Result<(), SessionError> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let mut value = HeaderValue::from_str(value)?;
        if name == AUTHORIZATION {
            value.set_sensitive(true);
        }
        self.map.insert(name, value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.get(AUTHORIZATION.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[must_use]
    pub fn as_header_map(&self) -> &HeaderMap {
        &self.map
    }

    /// Build an HTTP client that sends these headers on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn client(&self, timeouts: ApiTimeouts) -> Result<reqwest::Client, SessionError> {
        let client = reqwest::Client::builder()
            .default_headers(self.map.clone())
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod tests;
