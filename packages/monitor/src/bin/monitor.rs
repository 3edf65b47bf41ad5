//! Run one page check and exit.
//!
//! Exits with status 1 when the check fails; notification failures are
//! logged but never fail the run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use extraction::Fetcher;
use monitor_core::{build_fetcher, build_notifier, Config, Monitor, RunOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "monitor")]
#[command(about = "Check a web page for matching table rows and send a notification")]
struct Cli {
    /// Load this dotenv file instead of ./.env
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Run the whole check but log the message instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Write the fetched HTML to this file
    #[arg(long, value_name = "PATH")]
    dump_html: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,monitor_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.env_file {
        Some(path) => Config::from_env_file(path),
        None => Config::from_env(),
    }
    .context("Failed to load configuration")?;
    tracing::debug!(
        url = %config.target_url,
        use_browser = config.use_browser,
        dropdown = config.dropdown.is_some(),
        "Configuration loaded"
    );

    let fetcher = build_fetcher(&config);
    let notifier = build_notifier(&config);
    tracing::info!(
        fetcher = fetcher.name(),
        channels = ?notifier.channel_names(),
        "Monitor ready"
    );

    let report = Monitor::new(config, fetcher, notifier)
        .with_options(RunOptions {
            dry_run: cli.dry_run,
            dump_html: cli.dump_html,
        })
        .run()
        .await?;

    tracing::info!(matches = report.matches, title = %report.title, "Done");
    Ok(())
}
