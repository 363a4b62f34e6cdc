mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Completions need no config at all
    if let Command::Completions { shell } = &cli.command {
        use clap::CommandFactory;
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "lotwatch", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config()?;

    match cli.command {
        Command::Login(args) => commands::login::handle(args, &cli.global, cfg).await,

        Command::Watch(args) => {
            let client = commands::build_client(&cli.global, &cfg)?;
            commands::watch::handle(client, args, &cli.global, &cfg).await
        }

        Command::Devices => {
            let client = commands::build_client(&cli.global, &cfg)?;
            commands::devices::handle(&client, &cli.global).await
        }

        Command::OpenGate { device } => {
            let client = commands::build_client(&cli.global, &cfg)?;
            commands::gate::open(&client, &device, &cli.global).await
        }

        Command::Exit(args) => {
            let client = commands::build_client(&cli.global, &cfg)?;
            commands::exit_approval::handle(&client, args.command, &cli.global).await
        }

        Command::Book(args) => {
            let client = commands::build_client(&cli.global, &cfg)?;
            commands::book::handle(&client, args, &cli.global).await
        }

        Command::Completions { .. } => unreachable!("handled above"),
    }
}
