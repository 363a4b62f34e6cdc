//! Cookie-session login.
//!
//! Posts the login form the same way the browser dashboard does and
//! captures the `session` cookie from the response without following the
//! redirect. The cookie is stored in the config file so subsequent
//! commands authenticate silently.

use dialoguer::{Input, Password};
use tracing::debug;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::commands::server_url;
use crate::config::{self, Config};
use crate::error::CliError;

pub async fn handle(args: LoginArgs, global: &GlobalOpts, cfg: Config) -> Result<(), CliError> {
    let base = server_url(global, &cfg)?;

    let email: String = match args.email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| CliError::LoginFailed {
                message: format!("could not read email: {e}"),
            })?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| CliError::LoginFailed {
                message: format!("could not read password: {e}"),
            })?,
    };

    let http = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .danger_accept_invalid_certs(global.insecure || cfg.insecure)
        .build()?;

    let url = base.join("login").map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: "cannot derive login URL".into(),
    })?;
    debug!(%url, "posting login form");

    let resp = http
        .post(url)
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await?;

    // Success is a redirect to the dashboard with a fresh session cookie;
    // bad credentials re-render the login page with a 200.
    let session = resp
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.value().to_owned());

    let Some(session) = session else {
        return Err(CliError::LoginFailed {
            message: "invalid email or password".into(),
        });
    };

    let mut cfg = cfg;
    cfg.session = Some(session);
    if cfg.server.is_none() {
        cfg.server = Some(base.to_string());
    }
    config::save_config(&cfg)?;

    if !global.quiet {
        eprintln!("Logged in as {email}; session stored in {}", config::config_path().display());
    }
    Ok(())
}
