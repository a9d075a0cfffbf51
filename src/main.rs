//! Tome CLI entry point

use clap::Parser;
use tome::api::BackendClient;
use tome::cli::{Cli, Commands};
use tome::core::config::Config;
use tome::core::error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("TOME_LOG"))
        .init();

    let cli = Cli::parse();

    let base_url = Config::resolve_base_url(cli.url.as_deref())?;
    let client = BackendClient::new(&base_url);

    match cli.command {
        Commands::Chat => tome::cli::chat::run(&client).await,
        Commands::Ask(args) => tome::cli::ask::run(&client, args).await,
        Commands::List(args) => tome::cli::docs::list(&client, args).await,
        Commands::Upload(args) => tome::cli::docs::upload(&client, args).await,
        Commands::Delete(args) => tome::cli::docs::delete(&client, args).await,
        Commands::Reindex(args) => tome::cli::docs::reindex(&client, args).await,
        Commands::Chapters(args) => tome::cli::chapters::chapters(&client, args).await,
        Commands::Summary(args) => tome::cli::chapters::summary(&client, args).await,
        Commands::Compare(args) => tome::cli::compare::run(&client, args).await,
    }
}
