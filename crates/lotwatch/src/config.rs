//! CLI-owned configuration: a small TOML file merged with `LOTWATCH_*`
//! environment variables via figment. `lotwatch login` writes the session
//! cookie back here; everything else only reads.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Dashboard server base URL.
    pub server: Option<String>,

    /// Deployment API key (sent as x-api-key when present).
    pub api_key: Option<String>,

    /// Session cookie value captured by `lotwatch login`.
    pub session: Option<String>,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: None,
            api_key: None,
            session: None,
            insecure: false,
            timeout: default_timeout(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    lotwatch_core::poller::DEFAULT_POLL_INTERVAL.as_secs()
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("tech", "hyperbliss", "lotwatch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("lotwatch");
            p.push("config.toml");
            p
        })
}

/// Load configuration, falling back to defaults when no file exists.
pub fn load_config() -> Result<Config, CliError> {
    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("LOTWATCH_"))
        .extract()?;
    Ok(config)
}

/// Persist the configuration (used by `login` to store the cookie).
pub fn save_config(config: &Config) -> Result<(), CliError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, toml::to_string_pretty(config)?)?;
    Ok(())
}
