//! External Worker Runner
//!
//! Runtime for external worker jobs: subscribe a handler to a topic, and
//! the runner keeps acquiring jobs of that topic, runs the handler for
//! each of them and reports what the handler decided.
//!
//! Architecture:
//! - Configuration: engine host, worker id and credentials
//! - Gateway: job lifecycle calls to the engine (REST in production)
//! - Outcome: the four ways a handler can end a job
//! - Scheduler: poll loop, job dispatching and subscription handles
//!
//! # Example
//!
//! ```no_run
//! use extworker_core::domain::job::AcquiredJob;
//! use extworker_runner::{
//!     ExternalWorkerClient, HandlerResult, SubscriptionParams, WorkResultBuilder, WorkerConfig,
//! };
//!
//! async fn handle(job: AcquiredJob, result: WorkResultBuilder) -> HandlerResult {
//!     match job.variable("amount") {
//!         Some(_) => Ok(None),
//!         None => Ok(Some(result.bpmn_error().error_code("missingAmount").into())),
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ExternalWorkerClient::new(WorkerConfig::from_env()?)?;
//!     let subscription = client.subscribe(
//!         SubscriptionParams::new("myTopic").wait_period_seconds(5.0),
//!         handle,
//!     );
//!
//!     tokio::signal::ctrl_c().await?;
//!     subscription.unsubscribe();
//!     subscription.stopped().await;
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod gateway;
mod handler;
mod outcome;
mod scheduler;

pub use client::ExternalWorkerClient;
pub use config::{DEFAULT_FLOWABLE_HOST, WorkerConfig, generate_worker_id};
pub use gateway::JobGateway;
pub use handler::{HandlerResult, JobHandler};
pub use outcome::{
    BpmnErrorResult, CmmnTerminateResult, CompleteResult, FailResult, WorkResult,
    WorkResultBuilder,
};
pub use scheduler::{
    DEFAULT_WAIT_PERIOD, JobDispatcher, JobPoller, Subscription, SubscriptionParams,
    SubscriptionState,
};

// Re-export commonly used types
pub use extworker_client::{ClientError, Credentials};
