use clap::Parser;
use krx_chat::app;
use krx_chat::cli::Cli;
use krx_chat::config::ChatConfig;
use krx_chat::error::CliError;
use rootcause::prelude::Report;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Report<CliError>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ChatConfig::from_env()
        .map_err(|e| CliError::Config {
            reason: e.to_string(),
        })?
        .with_overrides(&cli);
    tracing::debug!(?config, "loaded configuration");

    app::run(cli, config).await
}
