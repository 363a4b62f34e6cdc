//! Exit-approval control.
//!
//! The flag takes effect on the device via the server; the dashboard only
//! reflects it on the next poll cycle.

use lotwatch_api::ApiClient;

use crate::cli::{ExitCommand, GlobalOpts};
use crate::error::CliError;

pub async fn handle(
    client: &ApiClient,
    command: ExitCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (device, approved) = match command {
        ExitCommand::Approve { device } => (device, true),
        ExitCommand::Revoke { device } => (device, false),
    };

    client.set_exit_approved(&device, approved).await?;
    if !global.quiet {
        let verb = if approved { "approved" } else { "revoked" };
        eprintln!("Exit {verb} for {device}");
    }
    Ok(())
}
