//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod jobs;
mod work;

pub use jobs::JobsCommands;
pub use work::WorkArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect external worker jobs
    Jobs {
        #[command(subcommand)]
        command: JobsCommands,
    },
    /// Run a worker for a topic until Ctrl-C
    Work(WorkArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Jobs { command } => jobs::handle_jobs_command(command, config).await,
        Commands::Work(args) => work::handle_work_command(args, config).await,
    }
}
