//! Job command handlers
//!
//! Lists external worker jobs and shows their details.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use extworker_core::domain::job::Job;

use crate::config::Config;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Job subcommands
#[derive(Subcommand)]
pub enum JobsCommands {
    /// List all jobs
    List,
    /// Get job details
    Get {
        /// Job ID
        id: String,
    },
}

/// Handle job commands
pub async fn handle_jobs_command(command: JobsCommands, config: &Config) -> Result<()> {
    match command {
        JobsCommands::List => list_jobs(config).await,
        JobsCommands::Get { id } => get_job(config, &id).await,
    }
}

/// List all jobs
async fn list_jobs(config: &Config) -> Result<()> {
    let client = config.client()?;
    let jobs = client.list_jobs().await?;

    if jobs.data.is_empty() {
        println!("{}", "No jobs found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Showing {} of {} job(s):", jobs.data.len(), jobs.total).bold()
    );
    println!();
    for job in &jobs.data {
        print_job_summary(job);
    }

    if jobs.has_more() {
        println!("{}", "More jobs are available on the server.".dimmed());
    }

    Ok(())
}

/// Get and display a single job
async fn get_job(config: &Config, id: &str) -> Result<()> {
    let client = config.client()?;
    let job = client.get_job(id).await?;

    print_job_details(&job);

    Ok(())
}

/// Print a one-block job summary
fn print_job_summary(job: &Job) {
    println!("  {} Job {}", "▸".cyan(), job.id.dimmed());
    if let Some(topic) = &job.topic {
        println!("    Topic:    {}", topic);
    }
    if let Some(element) = job.element_name.as_ref().or(job.element_id.as_ref()) {
        println!("    Element:  {}", element);
    }
    println!("    Retries:  {}", colorize_retries(job.retries));
    if let Some(owner) = &job.lock_owner {
        println!("    Locked:   {}", owner.dimmed());
    }
    println!();
}

/// Print detailed job information
fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:            {}", job.id.cyan());

    let fields = [
        ("Correlation:", &job.correlation_id),
        ("Topic:", &job.topic),
        ("Scope type:", &job.scope_type),
        ("Process:", &job.process_instance_id),
        ("Definition:", &job.process_definition_id),
        ("Execution:", &job.execution_id),
        ("Scope:", &job.scope_id),
        ("Sub scope:", &job.sub_scope_id),
        ("Element ID:", &job.element_id),
        ("Element name:", &job.element_name),
        ("Tenant:", &job.tenant_id),
        ("Lock owner:", &job.lock_owner),
    ];
    for (label, value) in fields {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            println!("  {:<14}{}", label, value);
        }
    }

    println!("  {:<14}{}", "Retries:", colorize_retries(job.retries));

    let times = [
        ("Created:", job.create_time),
        ("Due:", job.due_date),
        ("Lock expires:", job.lock_expiration_time),
    ];
    for (label, time) in times {
        if let Some(time) = time {
            println!("  {:<14}{}", label, time.format(TIME_FORMAT));
        }
    }

    if let Some(message) = &job.exception_message {
        println!("\n{}", "Exception:".bold());
        println!("{}", message.red());
    }
}

/// Colorize the remaining retries for display
fn colorize_retries(retries: Option<i32>) -> ColoredString {
    match retries {
        Some(0) => "0".red(),
        Some(n) if n <= 1 => n.to_string().yellow(),
        Some(n) => n.to_string().green(),
        None => "-".dimmed(),
    }
}
