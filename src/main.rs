//! Skillforge terminal client entry point.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use skillforge_client::{ClientConfig, RoadmapClient};

mod app;
mod cli;
mod config;
mod quiz;
mod render;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so stream output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skillforge=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let base_url = Url::parse(&cli.api_url).context("invalid --api-url")?;
    let client = RoadmapClient::new(ClientConfig::with_base_url(base_url));

    match cli.command {
        cli::Commands::Signup { email, password } => app::signup(&client, email, password).await,
        cli::Commands::Login { email, password } => app::login(&client, email, password).await,
        cli::Commands::Logout => app::logout(),
        cli::Commands::Whoami => app::whoami(&client).await,
        cli::Commands::Generate {
            goal,
            level,
            save,
            quiet,
        } => app::generate(&client, &goal, level, save, quiet).await,
        cli::Commands::List => app::list(&client).await,
        cli::Commands::Show { id, quiz } => app::show(&client, &id, quiz).await,
        cli::Commands::Delete { id } => app::delete(&client, &id).await,
    }
}
