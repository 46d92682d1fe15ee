// cafetch - CollectiveAccess GraphQL to JSONL fetcher
// Copyright (c) 2025 Cafetch Contributors
// Licensed under the MIT License

use cafetch::cli::{Cli, Commands};
use cafetch::config::CafetchConfig;
use cafetch::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Optional; a missing .env file is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {e}", cli.config_path());
            process::exit(e.exit_code());
        }
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(e.exit_code());
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = cli.config_path(),
        "cafetch - CollectiveAccess to JSONL"
    );

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &CafetchConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Fetch(args) => args.execute(config).await,
        Commands::Count(args) => args.execute(config).await,
        Commands::Auth(args) => args.execute(config).await,
    }
}
