//! Clap definitions for the `lotwatch` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Dashboard and admin commands for parking-lot devices.
#[derive(Parser, Debug)]
#[command(
    name = "lotwatch",
    version,
    about = "Watch parking-lot devices and issue admin commands"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Dashboard server base URL (e.g. https://garage.example.com)
    #[arg(short = 's', long, global = true, env = "LOTWATCH_SERVER")]
    pub server: Option<String>,

    /// Deployment API key, sent as the x-api-key header
    #[arg(long, global = true, env = "LOTWATCH_API_KEY")]
    pub api_key: Option<String>,

    /// Session cookie value (overrides the cookie stored by `login`)
    #[arg(long, global = true, env = "LOTWATCH_SESSION")]
    pub session: Option<String>,

    /// Accept invalid TLS certificates (self-hosted deployments)
    #[arg(short = 'k', long, global = true, env = "LOTWATCH_INSECURE")]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30, or `timeout` from the
    /// config file]
    #[arg(long, global = true, env = "LOTWATCH_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Output format for list commands
    #[arg(
        short = 'o',
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        env = "LOTWATCH_OUTPUT"
    )]
    pub output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the refresh loop, rewriting a rendered dashboard page
    Watch(WatchArgs),

    /// One-shot device list
    Devices,

    /// Open the entrance gate for a device
    OpenGate {
        /// Device identifier
        device: String,
    },

    /// Approve or revoke exit for a device
    Exit(ExitArgs),

    /// Book slots or clear all bookings for a device
    Book(BookArgs),

    /// Log in with email/password and store the session cookie
    Login(LoginArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// HTML file to rewrite each cycle (point a browser at it)
    #[arg(long, default_value = "lotwatch.html")]
    pub out: PathBuf,

    /// Poll interval in seconds [default: 2, or `poll_interval_secs` from
    /// the config file]
    #[arg(long)]
    pub interval: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ExitArgs {
    #[command(subcommand)]
    pub command: ExitCommand,
}

#[derive(Subcommand, Debug)]
pub enum ExitCommand {
    /// Set the exit-approved flag
    Approve { device: String },
    /// Clear the exit-approved flag
    Revoke { device: String },
}

#[derive(Args, Debug)]
pub struct BookArgs {
    /// Device identifier
    pub device: String,

    /// Book the given slot (1-4); repeat for several slots
    #[arg(long = "slot", value_name = "N", conflicts_with = "clear")]
    pub slots: Vec<u8>,

    /// Clear all bookings (sends no slot parameters)
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "LOTWATCH_PASSWORD")]
    pub password: Option<String>,
}
