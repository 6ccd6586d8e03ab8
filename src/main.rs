// ABOUTME: Entry point for the gantry CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use gantry::config::Config;
use gantry::deploy::DeployRequest;
use gantry::error::Result;
use gantry::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let mode = cli.command.output_mode();

    let result = run(cli, mode).await;

    if let Err(e) = result {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mode: OutputMode) -> Result<()> {
    let cwd = env::current_dir()?;
    let config = Config::resolve(&cwd, cli.config.as_deref(), cli.base_url)?;

    // --verbose wins over every configured level
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(config.log_level.as_directive())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(mode);
    match cli.command {
        Commands::Deploy {
            from_tag,
            to_tag,
            repository,
            ..
        } => {
            let request = DeployRequest {
                repository,
                from_tag,
                to_tag,
            };
            commands::deploy(&config, request, output).await
        }
        Commands::Containers {
            tag, repository, ..
        } => commands::containers(&config, &repository, tag.as_ref(), output).await,
        Commands::Ports {
            tag, repository, ..
        } => commands::ports(&config, &repository, tag.as_ref(), output).await,
    }
}
