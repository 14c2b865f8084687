//! Podcraft CLI entry point.
//!
//! Binary name: `podcraft`
//!
//! Parses CLI arguments, initializes the database and configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,podcraft=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "podcraft", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (DB, config)
    let state = AppState::init().await?;

    match cli.command {
        Commands::New {
            title,
            description,
            host,
        } => {
            cli::podcast::create_podcast(&state, title, description, host, cli.json).await?;
        }

        Commands::List => {
            cli::podcast::list_podcasts(&state, cli.json).await?;
        }

        Commands::Hosts => {
            cli::podcast::list_hosts(cli.json)?;
        }

        Commands::Chat { id } => {
            cli::chat::run_chat_loop(&state, &id).await?;
        }

        Commands::Export { id } => {
            cli::podcast::export_podcast(&state, &id).await?;
        }

        Commands::Delete { id, force } => {
            cli::podcast::delete_podcast(&state, &id, force, cli.json).await?;
        }

        Commands::Publish { id } => {
            cli::podcast::publish_podcast(&state, &id, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
