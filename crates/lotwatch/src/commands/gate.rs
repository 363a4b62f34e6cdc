//! Gate control.

use lotwatch_api::ApiClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn open(client: &ApiClient, device: &str, global: &GlobalOpts) -> Result<(), CliError> {
    client.open_gate(device).await?;
    if !global.quiet {
        eprintln!("Gate opened for {device}");
    }
    Ok(())
}
