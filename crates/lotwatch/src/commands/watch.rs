//! The refresh loop: poll, render, rewrite the dashboard page.
//!
//! The poller publishes views through a watch channel; this loop writes
//! each one to the output file (full replacement, no partial updates) and
//! mirrors the status line to the terminal. A failed cycle still rewrites
//! the page — with the error in the status line and no device cards —
//! so the display never shows stale data silently.

use std::sync::Arc;
use std::time::Duration;

use owo_colors::OwoColorize;
use tracing::info;

use lotwatch_api::ApiClient;
use lotwatch_core::{CommandRoutes, Poller};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::config::Config;
use crate::error::CliError;

/// Poll interval in seconds: flag over the config file, floored at 1.
fn effective_interval(flag: Option<u64>, cfg: &Config) -> u64 {
    flag.unwrap_or(cfg.poll_interval_secs).max(1)
}

pub async fn handle(
    client: ApiClient,
    args: WatchArgs,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    let interval = effective_interval(args.interval, cfg);
    let poller = Poller::new(
        Arc::new(client),
        CommandRoutes::default(),
        Duration::from_secs(interval),
    );
    let mut views = poller.subscribe();
    let cancel = poller.cancellation_token();
    let poll_task = tokio::spawn(poller.run());

    if !global.quiet {
        eprintln!("Writing dashboard to {} (Ctrl-C to stop)", args.out.display());
    }
    info!(out = %args.out.display(), interval, "watch loop started");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                cancel.cancel();
                break;
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                let page = lotwatch_core::render_page(&view.status, &view.body);
                tokio::fs::write(&args.out, page).await?;

                if !global.quiet {
                    let stamp = chrono::Local::now().format("%H:%M:%S");
                    if view.ok {
                        eprintln!("{stamp}  {}", view.status.green());
                    } else {
                        eprintln!("{stamp}  {}", view.status.red());
                    }
                }
            }
        }
    }

    let _ = poll_task.await;
    if !global.quiet {
        eprintln!("Stopped.");
    }
    Ok(())
}
