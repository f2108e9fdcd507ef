//! Subcommand implementations.

pub mod delete;
pub mod get;
pub mod send;
pub mod token;

use std::time::Duration;

use anyhow::{Context, Result};
use mnubo::{ApiManager, ClientConfig, ClientCredentials};
use tracing::debug;

use crate::cli::{Commands, ConnectionArgs};

pub async fn handle(command: Commands, connection: &ConnectionArgs) -> Result<()> {
    let api = connect(connection).await?;

    match command {
        Commands::Token(args) => token::run(&api, args).await,
        Commands::Get(args) => get::run(&api, args).await,
        Commands::Post(args) => send::post(&api, args).await,
        Commands::Put(args) => send::put(&api, args).await,
        Commands::Delete(args) => delete::run(&api, args).await,
    }
}

async fn connect(args: &ConnectionArgs) -> Result<ApiManager> {
    let timeout = (args.timeout > 0).then_some(Duration::from_secs(args.timeout));
    let config = ClientConfig::new(&args.host)
        .context("Invalid host")?
        .with_compression(!args.no_compression)
        .with_timeout(timeout);

    debug!(host = %config.hostname(), compression = config.compression_enabled(), "Connecting");

    // Missing values are reported by the client itself as empty credentials.
    let credentials = ClientCredentials::new(
        args.client_id.clone().unwrap_or_default(),
        args.client_secret.clone().unwrap_or_default(),
    );

    ApiManager::new(credentials, config)
        .await
        .context("Failed to connect to mnubo")
}
