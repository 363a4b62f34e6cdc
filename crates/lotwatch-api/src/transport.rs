// Transport configuration for building `reqwest::Client` instances.
//
// The dashboard API authenticates with a session cookie; some deployments
// additionally expect an `x-api-key` header. Both are attached here so the
// rest of the crate never deals with auth plumbing.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Session cookie value, stored into the jar for the API origin.
    pub session_cookie: Option<SecretString>,
    /// Optional deployment API key, sent as `x-api-key` on every request.
    pub api_key: Option<SecretString>,
    /// Accept self-signed certificates (lab deployments).
    pub danger_accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            session_cookie: None,
            api_key: None,
            danger_accept_invalid_certs: false,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` for the given API origin.
    ///
    /// The cookie jar is seeded with the session cookie (if any) scoped to
    /// `base_url`, and default headers carry `Accept: application/json`
    /// plus the API key header when configured.
    pub fn build_client(&self, base_url: &Url) -> Result<reqwest::Client, Error> {
        let jar = Arc::new(Jar::default());
        if let Some(ref cookie) = self.session_cookie {
            jar.add_cookie_str(&format!("session={}", cookie.expose_secret()), base_url);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(ref key) = self.api_key {
            headers.insert(
                "x-api-key",
                HeaderValue::from_str(key.expose_secret())
                    .map_err(|e| Error::ClientBuild(format!("invalid API key header: {e}")))?,
            );
        }

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("lotwatch/0.1.0")
            .default_headers(headers)
            .cookie_provider(jar);

        if self.danger_accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| Error::ClientBuild(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        "http://dashboard.example".parse().expect("valid URL")
    }

    #[test]
    fn builds_with_defaults() {
        let config = TransportConfig::default();
        assert!(config.build_client(&base_url()).is_ok());
    }

    #[test]
    fn invalid_api_key_is_a_client_build_error() {
        let config = TransportConfig {
            api_key: Some(SecretString::from("bad\nkey")),
            ..TransportConfig::default()
        };
        let err = config
            .build_client(&base_url())
            .expect_err("header value with a newline must be rejected");
        assert!(
            matches!(err, Error::ClientBuild(_)),
            "expected ClientBuild, got: {err:?}"
        );
        assert!(err.to_string().contains("API key"), "got: {err}");
    }
}
