//! External worker client
//!
//! Entry point of the runtime: owns the gateway and starts subscriptions.

use anyhow::{Context, Result};
use extworker_client::ExternalWorkerRestClient;
use extworker_core::domain::job::Job;
use extworker_core::domain::list::ListResult;
use std::sync::Arc;
use tracing::info;

use crate::config::WorkerConfig;
use crate::gateway::JobGateway;
use crate::handler::JobHandler;
use crate::scheduler::{JobPoller, Subscription, SubscriptionParams};

/// Subscribes job handlers to topics of one engine
///
/// Cloning is cheap; clones share the gateway.
#[derive(Clone)]
pub struct ExternalWorkerClient {
    gateway: Arc<dyn JobGateway>,
}

impl ExternalWorkerClient {
    /// Creates a client talking REST to the configured engine
    pub fn new(config: WorkerConfig) -> Result<Self> {
        config.validate()?;

        let rest_client = config
            .rest_client_builder()
            .build()
            .context("Failed to build REST client")?;

        Ok(Self::with_rest_client(rest_client))
    }

    /// Creates a client from a prebuilt REST client
    pub fn with_rest_client(rest_client: ExternalWorkerRestClient) -> Self {
        Self::with_gateway(Arc::new(rest_client))
    }

    /// Creates a client on top of any gateway
    pub fn with_gateway(gateway: Arc<dyn JobGateway>) -> Self {
        info!("External worker client for worker '{}'", gateway.worker_id());
        Self { gateway }
    }

    pub fn worker_id(&self) -> &str {
        self.gateway.worker_id()
    }

    pub fn gateway(&self) -> &Arc<dyn JobGateway> {
        &self.gateway
    }

    /// Lists jobs known to the engine
    pub async fn list_jobs(&self) -> Result<ListResult<Job>> {
        self.gateway
            .list_jobs()
            .await
            .context("Failed to list jobs")
    }

    /// Fetches a single job
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        self.gateway
            .get_job(job_id)
            .await
            .with_context(|| format!("Failed to get job {}", job_id))
    }

    /// Starts polling a topic and handing its jobs to `handler`
    ///
    /// The first acquisition starts immediately. Must be called from within
    /// a tokio runtime.
    ///
    /// # Example
    /// ```no_run
    /// # use extworker_runner::{ExternalWorkerClient, HandlerResult, SubscriptionParams};
    /// # use extworker_runner::{WorkResultBuilder, WorkerConfig};
    /// # use extworker_core::domain::job::AcquiredJob;
    /// async fn handle(job: AcquiredJob, result: WorkResultBuilder) -> HandlerResult {
    ///     println!("Handling {}", job.id());
    ///     Ok(Some(result.success().variable("handled", true, "boolean").into()))
    /// }
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let config = WorkerConfig::new("http://localhost:8090", "my-worker");
    /// let client = ExternalWorkerClient::new(config)?;
    /// let subscription = client.subscribe(SubscriptionParams::new("myTopic"), handle);
    /// // ...
    /// subscription.unsubscribe();
    /// subscription.stopped().await;
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe<H: JobHandler>(&self, params: SubscriptionParams, handler: H) -> Subscription {
        JobPoller::new(params, Arc::clone(&self.gateway), Arc::new(handler)).spawn()
    }
}
