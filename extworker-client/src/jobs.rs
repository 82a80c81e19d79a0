//! Job-related API endpoints

use extworker_core::domain::job::{AcquiredJob, Job};
use extworker_core::domain::list::ListResult;
use extworker_core::domain::variable::Variable;
use extworker_core::dto::job::{
    AcquireJobParams, BpmnErrorJobParams, CmmnTerminateJobParams, CompleteJobParams,
    FailJobParams,
};
use serde::Serialize;

use crate::ExternalWorkerRestClient;
use crate::error::{ClientError, Result};

const DEFAULT_LOCK_DURATION: &str = "PT1M";
const DEFAULT_NUMBER_OF_TASKS: u32 = 1;
const DEFAULT_NUMBER_OF_RETRIES: u32 = 5;

impl ExternalWorkerRestClient {
    // =============================================================================
    // Job Queries
    // =============================================================================

    /// List external worker jobs
    ///
    /// # Returns
    /// The first page of jobs as the engine pages them
    pub async fn list_jobs(&self) -> Result<ListResult<Job>> {
        let response = self.get("/jobs").send().await?;

        self.handle_response(response).await
    }

    /// Get a job by ID
    ///
    /// # Arguments
    /// * `job_id` - The job id
    ///
    /// # Returns
    /// The job details, or [`ClientError::NotFound`] when the engine does not know it
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let response = self.get(&format!("/jobs/{}", job_id)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(job_id.to_string()));
        }

        self.handle_response(response).await
    }

    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Acquire and lock jobs of a topic for this worker
    ///
    /// # Arguments
    /// * `params` - Topic and optional acquire settings; unset (or zero)
    ///   values fall back to one task, five retries, a one minute lock and
    ///   the client worker id
    ///
    /// # Returns
    /// The acquired jobs in the order the engine returned them, possibly empty
    ///
    /// # Example
    /// ```no_run
    /// # use extworker_client::ExternalWorkerRestClient;
    /// # use extworker_core::dto::job::AcquireJobParams;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ExternalWorkerRestClient::new("http://localhost:8090", "my-worker");
    /// let jobs = client.acquire_jobs(AcquireJobParams {
    ///     topic: "myTopic".to_string(),
    ///     number_of_tasks: Some(10),
    ///     ..Default::default()
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn acquire_jobs(&self, params: AcquireJobParams) -> Result<Vec<AcquiredJob>> {
        if params.topic.is_empty() {
            return Err(ClientError::InvalidRequest("topic cannot be empty".to_string()));
        }

        let request = AcquireJobsRequest {
            topic: params.topic,
            lock_duration: params
                .lock_duration
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_LOCK_DURATION.to_string()),
            number_of_tasks: params
                .number_of_tasks
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_NUMBER_OF_TASKS),
            number_of_retries: params
                .number_of_retries
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_NUMBER_OF_RETRIES),
            worker_id: self.resolve_worker_id(params.worker_id),
            scope_type: params.scope_type.filter(|s| !s.is_empty()),
        };

        let response = self.post("/acquire/jobs").json(&request).send().await?;

        self.handle_response(response).await
    }

    /// Complete a job, optionally passing variables back
    ///
    /// # Arguments
    /// * `params` - The job id and the variables; no variables are sent as `null`
    pub async fn complete_job(&self, params: CompleteJobParams) -> Result<()> {
        let request = CompleteJobRequest {
            variables: params.variables,
            worker_id: self.resolve_worker_id(params.worker_id),
        };

        let response = self
            .post(&format!("/acquire/jobs/{}/complete", params.job_id))
            .json(&request)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Fail a job
    ///
    /// # Arguments
    /// * `params` - The job id and the failure information; unset fields
    ///   are left out of the request
    pub async fn fail_job(&self, params: FailJobParams) -> Result<()> {
        let request = FailJobRequest {
            worker_id: self.resolve_worker_id(params.worker_id),
            error_message: params.error_message,
            error_details: params.error_details,
            retries: params.retries,
            retry_timeout: params.retry_timeout,
        };

        let response = self
            .post(&format!("/acquire/jobs/{}/fail", params.job_id))
            .json(&request)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Complete a job with a BPMN error
    ///
    /// # Arguments
    /// * `params` - The job id, the error code and optional variables
    pub async fn bpmn_error_job(&self, params: BpmnErrorJobParams) -> Result<()> {
        let request = BpmnErrorJobRequest {
            worker_id: self.resolve_worker_id(params.worker_id),
            variables: params.variables,
            error_code: params.error_code,
        };

        let response = self
            .post(&format!("/acquire/jobs/{}/bpmnError", params.job_id))
            .json(&request)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Complete a job with a CMMN terminate transition
    ///
    /// # Arguments
    /// * `params` - The job id and optional variables
    pub async fn cmmn_terminate_job(&self, params: CmmnTerminateJobParams) -> Result<()> {
        let request = CmmnTerminateJobRequest {
            worker_id: self.resolve_worker_id(params.worker_id),
            variables: params.variables,
        };

        let response = self
            .post(&format!("/acquire/jobs/{}/cmmnTerminate", params.job_id))
            .json(&request)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AcquireJobsRequest {
    topic: String,
    lock_duration: String,
    number_of_tasks: u32,
    number_of_retries: u32,
    worker_id: String,
    scope_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteJobRequest {
    variables: Option<Vec<Variable>>,
    worker_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FailJobRequest {
    worker_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retries: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_timeout: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BpmnErrorJobRequest {
    worker_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Vec<Variable>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CmmnTerminateJobRequest {
    worker_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Vec<Variable>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fail_request_omits_unset_fields() {
        let request = FailJobRequest {
            worker_id: "test-worker".to_string(),
            error_message: Some("Some error message".to_string()),
            error_details: None,
            retries: None,
            retry_timeout: None,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "workerId": "test-worker", "errorMessage": "Some error message" })
        );
    }

    #[test]
    fn test_complete_request_keeps_null_variables() {
        let request = CompleteJobRequest {
            variables: None,
            worker_id: "test-worker".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "variables": null, "workerId": "test-worker" })
        );
    }
}
