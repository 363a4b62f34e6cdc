//! CLI error types with miette diagnostics.
//!
//! Maps `lotwatch_api::Error` variants into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No dashboard server configured")]
    #[diagnostic(
        code(lotwatch::no_server),
        help(
            "Pass --server (or set LOTWATCH_SERVER), or run: lotwatch login\n\
             Config file: {path}"
        )
    )]
    NoServer { path: String },

    #[error(transparent)]
    #[diagnostic(code(lotwatch::config))]
    Config(Box<figment::Error>),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lotwatch::validation))]
    Validation { field: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login failed: {message}")]
    #[diagnostic(
        code(lotwatch::login_failed),
        help("Check the email and password, then retry: lotwatch login")
    )]
    LoginFailed { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(lotwatch::api))]
    Api(#[from] lotwatch_api::Error),

    /// Direct transport errors from the login flow (which bypasses the
    /// API client on purpose: it must not follow redirects).
    #[error("HTTP transport error: {0}")]
    #[diagnostic(code(lotwatch::transport))]
    Transport(#[from] reqwest::Error),

    // ── IO / serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to write config: {0}")]
    #[diagnostic(code(lotwatch::config_write))]
    ConfigWrite(#[from] toml::ser::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoServer { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::LoginFailed { .. } => exit_code::AUTH,
            Self::Api(api) => match api.status() {
                Some(401) => exit_code::AUTH,
                Some(403) => exit_code::PERMISSION,
                Some(_) => exit_code::GENERAL,
                None => exit_code::CONNECTION,
            },
            Self::Transport(_) => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}
