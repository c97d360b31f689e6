//! Error type shared by every module.

/// Failures surfaced by the session bootstrap, store, and API client.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backing store could not be read or written.
    #[error("session store I/O failed: {0}")]
    StoreIo(#[from] std::io::Error),

    /// A stored or received JSON document could not be (de)serialized.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The store file exists but is not a JSON object.
    #[error("session store is corrupt: {0}")]
    StoreCorrupt(String),

    /// A default header name was rejected.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),

    /// A default header value was rejected.
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    /// The HTTP transport failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API response error: status {status}")]
    Api { status: u16, body: String },

    /// A configuration value is missing or unusable.
    #[error("config parse failed: {0}")]
    Config(String),

    /// A redirect named a route the table does not know.
    #[error("unknown route: {0}")]
    UnknownRoute(String),

    /// Guards kept redirecting past the hop limit.
    #[error("redirect loop navigating to {0}")]
    RedirectLoop(String),

    /// The bootstrapper was run a second time on the same context.
    #[error("session context already bootstrapped")]
    AlreadyBootstrapped,
}

impl SessionError {
    /// Stable machine-readable code for logs and CLI output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::StoreIo(_) => "E_STORE_IO",
            Self::Json(_) => "E_JSON",
            Self::StoreCorrupt(_) => "E_STORE_CORRUPT",
            Self::InvalidHeaderName(_) => "E_HEADER_NAME",
            Self::InvalidHeaderValue(_) => "E_HEADER_VALUE",
            Self::Http(_) => "E_HTTP",
            Self::Api { .. } => "E_API_RESPONSE",
            Self::Config(_) => "E_CONFIG_PARSE",
            Self::UnknownRoute(_) => "E_UNKNOWN_ROUTE",
            Self::RedirectLoop(_) => "E_REDIRECT_LOOP",
            Self::AlreadyBootstrapped => "E_ALREADY_BOOTSTRAPPED",
        }
    }

    /// Whether repeating the operation could succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { status: 429 | 500..=599, .. })
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
