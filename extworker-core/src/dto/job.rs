//! Job lifecycle DTOs

use serde::{Deserialize, Serialize};

use crate::domain::variable::Variable;

/// Parameters for acquiring (locking) jobs of one topic
///
/// `None` fields are filled in by the gateway: lock duration `PT1M`,
/// one task, five retries, the client's worker id and no scope type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireJobParams {
    pub topic: String,
    pub lock_duration: Option<String>,
    pub number_of_tasks: Option<u32>,
    pub number_of_retries: Option<u32>,
    pub worker_id: Option<String>,
    pub scope_type: Option<String>,
}

impl AcquireJobParams {
    /// Acquire parameters for a topic with every other field defaulted
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }
}

/// Parameters for completing a job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteJobParams {
    pub job_id: String,
    pub variables: Option<Vec<Variable>>,
    pub worker_id: Option<String>,
}

impl CompleteJobParams {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Default::default()
        }
    }
}

/// Parameters for failing a job
///
/// `retries` overrides the remaining retry count, `retry_timeout` is an
/// ISO-8601 duration before the job becomes acquirable again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailJobParams {
    pub job_id: String,
    pub worker_id: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
    pub retries: Option<i32>,
    pub retry_timeout: Option<String>,
}

impl FailJobParams {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Default::default()
        }
    }
}

/// Parameters for completing a job with a BPMN error
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmnErrorJobParams {
    pub job_id: String,
    pub worker_id: Option<String>,
    pub variables: Option<Vec<Variable>>,
    pub error_code: Option<String>,
}

impl BpmnErrorJobParams {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Default::default()
        }
    }
}

/// Parameters for completing a job with a CMMN terminate transition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmmnTerminateJobParams {
    pub job_id: String,
    pub worker_id: Option<String>,
    pub variables: Option<Vec<Variable>>,
}

impl CmmnTerminateJobParams {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Default::default()
        }
    }
}
