//! External worker CLI
//!
//! Command-line interface for inspecting external worker jobs and running a
//! worker against a Flowable engine.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use extworker_runner::DEFAULT_FLOWABLE_HOST;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "extworker")]
#[command(about = "Flowable external worker CLI", long_about = None)]
struct Cli {
    /// Flowable engine URL
    #[arg(long, global = true, env = "FLOWABLE_HOST", default_value = DEFAULT_FLOWABLE_HOST)]
    host: String,

    /// Worker id (generated when not set)
    #[arg(long, global = true, env = "FLOWABLE_WORKER_ID")]
    worker_id: Option<String>,

    /// Username for basic authentication
    #[arg(long, global = true, env = "FLOWABLE_USERNAME")]
    username: Option<String>,

    /// Password for basic authentication
    #[arg(long, global = true, env = "FLOWABLE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Bearer token (takes precedence over basic authentication)
    #[arg(long, global = true, env = "FLOWABLE_BEARER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "extworker=info,extworker_runner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        host: cli.host,
        worker_id: cli.worker_id,
        username: cli.username,
        password: cli.password,
        token: cli.token,
    };

    handle_command(cli.command, &config).await
}
