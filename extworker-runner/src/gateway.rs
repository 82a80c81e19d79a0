//! Job gateway
//!
//! The gateway is the network boundary of the runtime: every job lifecycle
//! call the scheduler makes goes through [`JobGateway`]. The REST client
//! implements it for production use; tests plug in an in-memory gateway.

use async_trait::async_trait;
use extworker_client::{ExternalWorkerRestClient, Result};
use extworker_core::domain::job::{AcquiredJob, Job};
use extworker_core::domain::list::ListResult;
use extworker_core::dto::job::{
    AcquireJobParams, BpmnErrorJobParams, CmmnTerminateJobParams, CompleteJobParams,
    FailJobParams,
};

/// Remote job lifecycle operations used by the runtime
#[async_trait]
pub trait JobGateway: Send + Sync {
    /// Worker id used when a call does not name one
    fn worker_id(&self) -> &str;

    /// Lists jobs known to the engine
    async fn list_jobs(&self) -> Result<ListResult<Job>>;

    /// Fetches a single job
    async fn get_job(&self, job_id: &str) -> Result<Job>;

    /// Acquires (locks) jobs of a topic
    ///
    /// Returns the jobs in the order the engine handed them out, possibly
    /// none.
    async fn acquire_jobs(&self, params: AcquireJobParams) -> Result<Vec<AcquiredJob>>;

    /// Completes a job
    async fn complete_job(&self, params: CompleteJobParams) -> Result<()>;

    /// Fails a job
    async fn fail_job(&self, params: FailJobParams) -> Result<()>;

    /// Completes a job with a BPMN error
    async fn bpmn_error_job(&self, params: BpmnErrorJobParams) -> Result<()>;

    /// Completes a job with a CMMN terminate transition
    async fn cmmn_terminate_job(&self, params: CmmnTerminateJobParams) -> Result<()>;
}

#[async_trait]
impl JobGateway for ExternalWorkerRestClient {
    fn worker_id(&self) -> &str {
        ExternalWorkerRestClient::worker_id(self)
    }

    async fn list_jobs(&self) -> Result<ListResult<Job>> {
        ExternalWorkerRestClient::list_jobs(self).await
    }

    async fn get_job(&self, job_id: &str) -> Result<Job> {
        ExternalWorkerRestClient::get_job(self, job_id).await
    }

    async fn acquire_jobs(&self, params: AcquireJobParams) -> Result<Vec<AcquiredJob>> {
        ExternalWorkerRestClient::acquire_jobs(self, params).await
    }

    async fn complete_job(&self, params: CompleteJobParams) -> Result<()> {
        ExternalWorkerRestClient::complete_job(self, params).await
    }

    async fn fail_job(&self, params: FailJobParams) -> Result<()> {
        ExternalWorkerRestClient::fail_job(self, params).await
    }

    async fn bpmn_error_job(&self, params: BpmnErrorJobParams) -> Result<()> {
        ExternalWorkerRestClient::bpmn_error_job(self, params).await
    }

    async fn cmmn_terminate_job(&self, params: CmmnTerminateJobParams) -> Result<()> {
        ExternalWorkerRestClient::cmmn_terminate_job(self, params).await
    }
}
