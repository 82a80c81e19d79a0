//! Job dispatcher
//!
//! Runs the handler for one acquired job and reports the result. Whatever
//! goes wrong (handler error, handler panic, failed report) ends in a
//! best-effort fail call; nothing escapes to the poll loop.

use anyhow::{Context, anyhow};
use extworker_core::domain::job::AcquiredJob;
use extworker_core::dto::job::FailJobParams;
use std::any::Any;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

use crate::gateway::JobGateway;
use crate::handler::JobHandler;
use crate::outcome::{WorkResult, WorkResultBuilder};

/// Hands acquired jobs to a handler and reports their results
pub struct JobDispatcher {
    gateway: Arc<dyn JobGateway>,
    handler: Arc<dyn JobHandler>,
}

impl JobDispatcher {
    pub fn new(gateway: Arc<dyn JobGateway>, handler: Arc<dyn JobHandler>) -> Self {
        Self { gateway, handler }
    }

    /// Processes a single job until its result has been reported
    pub async fn dispatch(&self, job: AcquiredJob) {
        let job_id = job.id().to_string();
        debug!("Dispatching job {}", job_id);

        match self.execute(job).await {
            Ok(kind) => info!("Job {} finished with {}", job_id, kind),
            Err(e) => {
                warn!("Failed to execute job {}: {:#}", job_id, e);
                self.report_failure(&job_id, &e).await;
            }
        }
    }

    /// Runs the handler and executes its result
    ///
    /// The handler runs on its own task so a panic stays contained.
    async fn execute(&self, job: AcquiredJob) -> anyhow::Result<&'static str> {
        let job_id = job.id().to_string();
        let builder = WorkResultBuilder::new(&job);
        let handler = Arc::clone(&self.handler);

        let result = tokio::spawn(async move { handler.handle(job, builder).await })
            .await
            .map_err(|e| anyhow!("Job handler aborted: {}", join_error_message(e)))??
            .unwrap_or_else(|| WorkResult::complete(job_id.clone()));

        let kind = result.kind();
        result
            .execute(self.gateway.as_ref())
            .await
            .with_context(|| format!("Failed to report {} for job {}", kind, job_id))?;

        Ok(kind)
    }

    /// Fails the job with the rendered error
    ///
    /// The message carries the top-level error, the details the whole cause
    /// chain. A failure of this call is logged and dropped.
    async fn report_failure(&self, job_id: &str, e: &anyhow::Error) {
        let params = FailJobParams {
            job_id: job_id.to_string(),
            error_message: Some(e.to_string()),
            error_details: Some(format!("{:?}", e)),
            ..Default::default()
        };

        if let Err(report_err) = self.gateway.fail_job(params).await {
            error!(
                "Failed to report failure of job {}: {:#}",
                job_id, report_err
            );
        }
    }
}

fn join_error_message(e: JoinError) -> String {
    if !e.is_panic() {
        return e.to_string();
    }
    panic_message(e.into_panic())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => format!("panicked: {}", message),
        Err(payload) => match payload.downcast_ref::<&'static str>() {
            Some(message) => format!("panicked: {}", message),
            None => "panicked".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{Call, RecordingGateway};
    use crate::handler::HandlerResult;
    use extworker_core::domain::variable::Variable;
    use extworker_core::dto::job::CompleteJobParams;

    fn dispatcher(gateway: &Arc<RecordingGateway>, handler: impl JobHandler) -> JobDispatcher {
        let gateway: Arc<dyn JobGateway> = gateway.clone();
        JobDispatcher::new(gateway, Arc::new(handler))
    }

    async fn no_result(_job: AcquiredJob, _result: WorkResultBuilder) -> HandlerResult {
        Ok(None)
    }

    async fn with_variables(_job: AcquiredJob, result: WorkResultBuilder) -> HandlerResult {
        Ok(Some(
            result
                .success()
                .variable("testVar", "test content", "string")
                .variable("testVar2", 12, "integer")
                .into(),
        ))
    }

    async fn rejecting(_job: AcquiredJob, _result: WorkResultBuilder) -> HandlerResult {
        Err(anyhow!("Some error message"))
    }

    async fn panicking(_job: AcquiredJob, _result: WorkResultBuilder) -> HandlerResult {
        panic!("handler exploded");
    }

    fn fail_call(gateway: &RecordingGateway) -> FailJobParams {
        match gateway.terminal_calls().last() {
            Some(Call::Fail(params)) => params.clone(),
            other => panic!("expected a fail call, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_result_completes_without_variables() {
        let gateway = Arc::new(RecordingGateway::new());

        dispatcher(&gateway, no_result)
            .dispatch(AcquiredJob::new("JOB-1"))
            .await;

        assert_eq!(
            gateway.terminal_calls(),
            vec![Call::Complete(CompleteJobParams::new("JOB-1"))]
        );
    }

    #[tokio::test]
    async fn test_complete_carries_exact_variables() {
        let gateway = Arc::new(RecordingGateway::new());

        dispatcher(&gateway, with_variables)
            .dispatch(AcquiredJob::new("JOB-1"))
            .await;

        assert_eq!(
            gateway.terminal_calls(),
            vec![Call::Complete(CompleteJobParams {
                job_id: "JOB-1".to_string(),
                variables: Some(vec![
                    Variable::new("testVar", "test content", "string"),
                    Variable::new("testVar2", 12, "integer"),
                ]),
                worker_id: None,
            })]
        );
    }

    #[tokio::test]
    async fn test_handler_error_fails_job() {
        let gateway = Arc::new(RecordingGateway::new());

        dispatcher(&gateway, rejecting)
            .dispatch(AcquiredJob::new("JOB-1"))
            .await;

        assert_eq!(gateway.terminal_calls().len(), 1);
        let params = fail_call(&gateway);
        assert_eq!(params.job_id, "JOB-1");
        assert_eq!(params.error_message.as_deref(), Some("Some error message"));
        assert!(params.error_details.unwrap().contains("Some error message"));
        assert_eq!(params.worker_id, None);
    }

    #[tokio::test]
    async fn test_handler_panic_fails_job() {
        let gateway = Arc::new(RecordingGateway::new());

        dispatcher(&gateway, panicking)
            .dispatch(AcquiredJob::new("JOB-1"))
            .await;

        let params = fail_call(&gateway);
        assert_eq!(params.job_id, "JOB-1");
        assert!(
            params
                .error_message
                .unwrap()
                .contains("panicked: handler exploded")
        );
    }

    #[tokio::test]
    async fn test_failed_report_falls_back_to_fail_call() {
        let gateway = Arc::new(RecordingGateway::new().failing_for("JOB-1"));

        dispatcher(&gateway, no_result)
            .dispatch(AcquiredJob::new("JOB-1"))
            .await;

        let calls = gateway.terminal_calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], Call::Complete(_)));

        let params = fail_call(&gateway);
        assert_eq!(
            params.error_message.as_deref(),
            Some("Failed to report complete for job JOB-1")
        );
        assert!(params.error_details.unwrap().contains("status 500"));
    }
}
