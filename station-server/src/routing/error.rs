//! Routing client error types.

/// Longest response body kept in an error, in characters.
pub(crate) const MAX_ERROR_BODY_CHARS: usize = 500;

/// Cut a response body down to [`MAX_ERROR_BODY_CHARS`].
pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// Errors from the foot-routing HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid route JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Service answered but reported a failure code (e.g. "NoRoute")
    #[error("routing failed with code {code}: {message}")]
    Provider { code: String, message: String },

    /// Service reported success but returned no routes
    #[error("no route returned")]
    NoRoute,

    /// Client construction failed
    #[error("not configured: {0}")]
    NotConfigured(String),
}
