//! Work command handler
//!
//! Subscribes a logging handler to a topic and keeps it running until
//! Ctrl-C.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use extworker_core::domain::job::AcquiredJob;
use extworker_runner::{HandlerResult, SubscriptionParams, WorkResultBuilder};
use tracing::info;

use crate::config::Config;

/// Options of the work command
#[derive(Args)]
pub struct WorkArgs {
    /// Topic to acquire jobs for
    #[arg(long)]
    topic: String,

    /// ISO-8601 lock duration (e.g. PT5M)
    #[arg(long)]
    lock_duration: Option<String>,

    /// Maximum number of jobs per acquisition
    #[arg(long)]
    tasks: Option<u32>,

    /// Retries assigned to acquired jobs
    #[arg(long)]
    retries: Option<u32>,

    /// Only acquire jobs of this scope type (bpmn or cmmn)
    #[arg(long)]
    scope_type: Option<String>,

    /// Seconds to wait after an empty acquisition
    #[arg(long, default_value_t = 30.0)]
    wait_seconds: f64,
}

impl WorkArgs {
    fn subscription_params(&self) -> SubscriptionParams {
        let mut params =
            SubscriptionParams::new(self.topic.clone()).wait_period_seconds(self.wait_seconds);
        if let Some(lock_duration) = &self.lock_duration {
            params = params.lock_duration(lock_duration.clone());
        }
        if let Some(tasks) = self.tasks {
            params = params.number_of_tasks(tasks);
        }
        if let Some(retries) = self.retries {
            params = params.number_of_retries(retries);
        }
        if let Some(scope_type) = &self.scope_type {
            params = params.scope_type(scope_type.clone());
        }
        params
    }
}

/// Run a logging worker until Ctrl-C
pub async fn handle_work_command(args: WorkArgs, config: &Config) -> Result<()> {
    let client = config.client()?;

    println!(
        "{} Worker {} listening on topic {}",
        "▸".cyan(),
        client.worker_id().bold(),
        args.topic.cyan()
    );
    println!("{}", "Press Ctrl-C to stop.".dimmed());

    let subscription = client.subscribe(args.subscription_params(), log_and_complete);

    let signal = tokio::signal::ctrl_c().await;

    subscription.unsubscribe();
    subscription.stopped().await;
    println!("{}", "✓ Worker stopped".green());

    signal.context("Failed to listen for Ctrl-C")
}

/// Logs the job with its variables and completes it
async fn log_and_complete(job: AcquiredJob, _result: WorkResultBuilder) -> HandlerResult {
    info!(
        "Executing job {} (element: {})",
        job.id(),
        job.job.element_id.as_deref().unwrap_or("-")
    );
    for variable in &job.variables {
        info!("  {} ({}) = {}", variable.name, variable.var_type, variable.value);
    }

    Ok(None)
}
