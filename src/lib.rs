pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod presentation;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use domain::UserId;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Init)) {
        Config::create_default_if_missing()?;
        println!("✓ Config file created. Edit config.toml and run again.");
        return Ok(());
    }

    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config);

    if config.kinopoisk.api_key.is_empty() {
        tracing::warn!(
            "No Kinopoisk API key configured; set kinopoisk.api_key or {}",
            config::API_KEY_ENV
        );
    }

    match cli.command {
        Some(Commands::Serve) => {
            let prometheus_handle = if config.observability.metrics_enabled {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("Failed to install Prometheus recorder")?;
                info!("Prometheus metrics recorder initialized");
                Some(handle)
            } else {
                None
            };

            cli::cmd_serve(config, prometheus_handle).await
        }

        Some(Commands::Search { user, query }) => {
            let query = query.join(" ");
            cli::cmd_search(config, UserId::new(user), &query).await
        }

        Some(Commands::Select { user, film }) => {
            cli::cmd_select(config, UserId::new(user), &film).await
        }

        Some(Commands::History { user }) => cli::cmd_history(&config, UserId::new(user)).await,

        Some(Commands::Stats { user }) => cli::cmd_stats(&config, UserId::new(user)).await,

        Some(Commands::Init) => Ok(()),

        None => {
            print_help();
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn print_help() {
    println!("Cinebot - film search with per-user history and view stats");
    println!();
    println!("USAGE:");
    println!("  cinebot <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("  search --user <id> <query>   Search films and record the query");
    println!("  select --user <id> <film>    Show film details and count the view");
    println!("  history --user <id>          Show recent searches");
    println!("  stats --user <id>            Show most viewed films");
    println!("  serve                        Run the HTTP API server");
    println!("  init                         Create default config file");
    println!("  help                         Show this help message");
}
