//! Work results
//!
//! A job handler decides how a job ends by returning a [`WorkResult`]. The
//! [`WorkResultBuilder`] handed to the handler starts one of the four
//! variants; each variant builder is consumed while it is filled in and
//! converts into a `WorkResult`, which in turn is consumed by
//! [`WorkResult::execute`]. A result therefore produces exactly one gateway
//! call.

use extworker_client::Result;
use extworker_core::domain::job::AcquiredJob;
use extworker_core::domain::variable::{Variable, VariableType};
use extworker_core::dto::job::{
    BpmnErrorJobParams, CmmnTerminateJobParams, CompleteJobParams, FailJobParams,
};
use serde_json::Value as JsonValue;

use crate::gateway::JobGateway;

/// Starts a work result for one acquired job
#[derive(Debug, Clone)]
pub struct WorkResultBuilder {
    job_id: String,
}

impl WorkResultBuilder {
    pub fn new(job: &AcquiredJob) -> Self {
        Self {
            job_id: job.id().to_string(),
        }
    }

    /// Id of the job the results are built for
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Completes the job
    pub fn success(&self) -> CompleteResult {
        CompleteResult {
            params: CompleteJobParams::new(self.job_id.clone()),
        }
    }

    /// Fails the job
    pub fn failure(&self) -> FailResult {
        FailResult {
            params: FailJobParams::new(self.job_id.clone()),
        }
    }

    /// Completes the job with a BPMN error
    pub fn bpmn_error(&self) -> BpmnErrorResult {
        BpmnErrorResult {
            params: BpmnErrorJobParams::new(self.job_id.clone()),
        }
    }

    /// Completes the job with a CMMN terminate transition
    pub fn cmmn_terminate(&self) -> CmmnTerminateResult {
        CmmnTerminateResult {
            params: CmmnTerminateJobParams::new(self.job_id.clone()),
        }
    }
}

/// Appends an inline variable, creating the list on first use
fn push_variable(
    variables: &mut Option<Vec<Variable>>,
    name: impl Into<String>,
    value: impl Into<JsonValue>,
    var_type: impl Into<VariableType>,
) {
    variables
        .get_or_insert_with(Vec::new)
        .push(Variable::new(name, value, var_type));
}

/// Successful completion, optionally with variables
#[derive(Debug, Clone)]
pub struct CompleteResult {
    params: CompleteJobParams,
}

impl CompleteResult {
    pub fn variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<JsonValue>,
        var_type: impl Into<VariableType>,
    ) -> Self {
        push_variable(&mut self.params.variables, name, value, var_type);
        self
    }

    /// Appends prebuilt variables
    pub fn variables(mut self, variables: impl IntoIterator<Item = Variable>) -> Self {
        self.params
            .variables
            .get_or_insert_with(Vec::new)
            .extend(variables);
        self
    }
}

/// Failure report
#[derive(Debug, Clone)]
pub struct FailResult {
    params: FailJobParams,
}

impl FailResult {
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.params.error_message = Some(message.into());
        self
    }

    pub fn error_details(mut self, details: impl Into<String>) -> Self {
        self.params.error_details = Some(details.into());
        self
    }

    /// Remaining retries after this failure
    pub fn retries(mut self, retries: i32) -> Self {
        self.params.retries = Some(retries);
        self
    }

    /// ISO-8601 duration before the job can be acquired again
    pub fn retry_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.params.retry_timeout = Some(timeout.into());
        self
    }
}

/// BPMN error, caught by a boundary event in the process
#[derive(Debug, Clone)]
pub struct BpmnErrorResult {
    params: BpmnErrorJobParams,
}

impl BpmnErrorResult {
    pub fn error_code(mut self, code: impl Into<String>) -> Self {
        self.params.error_code = Some(code.into());
        self
    }

    pub fn variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<JsonValue>,
        var_type: impl Into<VariableType>,
    ) -> Self {
        push_variable(&mut self.params.variables, name, value, var_type);
        self
    }
}

/// CMMN terminate transition of the plan item
#[derive(Debug, Clone)]
pub struct CmmnTerminateResult {
    params: CmmnTerminateJobParams,
}

impl CmmnTerminateResult {
    pub fn variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<JsonValue>,
        var_type: impl Into<VariableType>,
    ) -> Self {
        push_variable(&mut self.params.variables, name, value, var_type);
        self
    }
}

/// How a job ends
#[derive(Debug, Clone, PartialEq)]
pub enum WorkResult {
    Complete(CompleteJobParams),
    Fail(FailJobParams),
    BpmnError(BpmnErrorJobParams),
    CmmnTerminate(CmmnTerminateJobParams),
}

impl WorkResult {
    /// Plain completion without variables
    ///
    /// Used when a handler finishes without choosing a result.
    pub fn complete(job_id: impl Into<String>) -> Self {
        WorkResult::Complete(CompleteJobParams::new(job_id))
    }

    pub fn job_id(&self) -> &str {
        match self {
            WorkResult::Complete(p) => &p.job_id,
            WorkResult::Fail(p) => &p.job_id,
            WorkResult::BpmnError(p) => &p.job_id,
            WorkResult::CmmnTerminate(p) => &p.job_id,
        }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            WorkResult::Complete(_) => "complete",
            WorkResult::Fail(_) => "fail",
            WorkResult::BpmnError(_) => "bpmn error",
            WorkResult::CmmnTerminate(_) => "cmmn terminate",
        }
    }

    /// Performs the gateway call matching this result
    pub async fn execute(self, gateway: &dyn JobGateway) -> Result<()> {
        match self {
            WorkResult::Complete(params) => gateway.complete_job(params).await,
            WorkResult::Fail(params) => gateway.fail_job(params).await,
            WorkResult::BpmnError(params) => gateway.bpmn_error_job(params).await,
            WorkResult::CmmnTerminate(params) => gateway.cmmn_terminate_job(params).await,
        }
    }
}

impl From<CompleteResult> for WorkResult {
    fn from(result: CompleteResult) -> Self {
        WorkResult::Complete(result.params)
    }
}

impl From<FailResult> for WorkResult {
    fn from(result: FailResult) -> Self {
        WorkResult::Fail(result.params)
    }
}

impl From<BpmnErrorResult> for WorkResult {
    fn from(result: BpmnErrorResult) -> Self {
        WorkResult::BpmnError(result.params)
    }
}

impl From<CmmnTerminateResult> for WorkResult {
    fn from(result: CmmnTerminateResult) -> Self {
        WorkResult::CmmnTerminate(result.params)
    }
}
