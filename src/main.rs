use clap::Parser;
use slack_channel_resolver::config::load_settings;
use slack_channel_resolver::error::{ResolverError, Result};
use slack_channel_resolver::{Resolver, ResolverBuilder, SlackClient};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Resolve Slack channel names to channel IDs
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Channel names, with or without a leading '#'
    #[arg(required = true)]
    names: Vec<String>,

    /// Repopulate the cache before resolving
    #[arg(long)]
    refresh: bool,

    /// Print each channel as a JSON line instead of `name<TAB>id`
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize rustls crypto provider
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("slack_channel_resolver=info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::info!("Caught Ctrl+C, cancelling");
            shutdown.cancel();
        }
    });

    match run(cli, &cancel).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "Resolver failed");
            ExitCode::from(2)
        }
    }
}

/// Returns whether every name resolved
async fn run(cli: Cli, cancel: &CancellationToken) -> Result<bool> {
    let settings = load_settings()?;
    tracing::debug!(config = ?settings.resolver, "Configuration loaded");

    let slack_client = Arc::new(SlackClient::new(settings.slack.clone())?);
    let resolver: Resolver = ResolverBuilder::from_config(slack_client, &settings.resolver).build();

    if cli.refresh {
        resolver.refresh(cancel).await?;
    }

    let mut all_found = true;
    for raw in &cli.names {
        let name = raw.trim_start_matches('#');
        match resolver.lookup(cancel, name).await {
            Ok(channel) if cli.json => println!("{}", serde_json::to_string(&channel)?),
            Ok(channel) => println!("{}\t{}", channel.name, channel.id),
            Err(ResolverError::NotFound(_)) => {
                eprintln!("channel not found: {name}");
                all_found = false;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(all_found)
}
