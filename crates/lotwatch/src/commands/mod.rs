//! Subcommand handlers.

pub mod book;
pub mod devices;
pub mod exit_approval;
pub mod gate;
pub mod login;
pub mod watch;

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use lotwatch_api::transport::TransportConfig;
use lotwatch_api::ApiClient;

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::error::CliError;

/// Resolve the server URL from flags/env over the config file.
pub fn server_url(global: &GlobalOpts, cfg: &Config) -> Result<Url, CliError> {
    let raw = global
        .server
        .clone()
        .or_else(|| cfg.server.clone())
        .ok_or_else(|| CliError::NoServer {
            path: config::config_path().display().to_string(),
        })?;

    raw.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Request timeout in seconds: flag/env over the config file.
fn effective_timeout(global: &GlobalOpts, cfg: &Config) -> u64 {
    global.timeout.unwrap_or(cfg.timeout)
}

/// Build an [`ApiClient`] from CLI overrides layered over the config file.
pub fn build_client(global: &GlobalOpts, cfg: &Config) -> Result<ApiClient, CliError> {
    let url = server_url(global, cfg)?;

    let transport = TransportConfig {
        session_cookie: global
            .session
            .clone()
            .or_else(|| cfg.session.clone())
            .map(SecretString::from),
        api_key: global
            .api_key
            .clone()
            .or_else(|| cfg.api_key.clone())
            .map(SecretString::from),
        danger_accept_invalid_certs: global.insecure || cfg.insecure,
        timeout: Duration::from_secs(effective_timeout(global, cfg)),
    };

    Ok(ApiClient::new(url, &transport)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn global(timeout: Option<u64>) -> GlobalOpts {
        GlobalOpts {
            server: None,
            api_key: None,
            session: None,
            insecure: false,
            timeout,
            output: OutputFormat::Table,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn timeout_flag_overrides_config() {
        let cfg = Config {
            timeout: 90,
            ..Config::default()
        };
        assert_eq!(effective_timeout(&global(Some(5)), &cfg), 5);
    }

    #[test]
    fn timeout_falls_back_to_config_file() {
        let cfg = Config {
            timeout: 90,
            ..Config::default()
        };
        assert_eq!(effective_timeout(&global(None), &cfg), 90);
    }
}
