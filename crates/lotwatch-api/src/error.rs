use thiserror::Error;

/// Top-level error type for the `lotwatch-api` crate.
///
/// Covers transport failures, non-2xx responses, and shape failures on the
/// device list. `lotwatch-core` turns these into user-visible status text;
/// the CLI maps them into diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client construction error (bad header value, TLS backend
    /// failure, etc.)
    #[error("HTTP client setup error: {0}")]
    ClientBuild(String),

    // ── Server responses ────────────────────────────────────────────
    /// Non-2xx response. The body text is surfaced verbatim so the user
    /// sees exactly what the server said.
    #[error("{method} {path} -> {status} | {body}")]
    Http {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },

    /// The device-list endpoint answered 2xx but the body was not a JSON
    /// array. Treated like a transport failure by callers: surface and
    /// clear the display.
    #[error("expected a JSON array from {path}, got {found}")]
    UnexpectedShape { path: String, found: &'static str },
}

impl Error {
    /// HTTP status code, when this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Human label for a JSON value's shape, used in `UnexpectedShape` errors.
pub(crate) fn json_shape(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
