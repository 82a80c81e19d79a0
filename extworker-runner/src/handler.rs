//! Job handlers
//!
//! User logic plugged into a subscription. A handler receives its own copy
//! of the acquired job and a [`WorkResultBuilder`], and resolves to:
//! - `Ok(Some(result))` to end the job with that result
//! - `Ok(None)` to complete the job without variables
//! - `Err(_)` to fail the job with the error text
//!
//! Every handler is asynchronous. Async closures with the right signature
//! are handlers too.

use async_trait::async_trait;
use extworker_core::domain::job::AcquiredJob;
use std::future::Future;

use crate::outcome::{WorkResult, WorkResultBuilder};

/// What a handler resolves to
pub type HandlerResult = anyhow::Result<Option<WorkResult>>;

/// Logic run for every acquired job of a subscription
#[async_trait]
pub trait JobHandler: Send + Sync + 'static {
    async fn handle(&self, job: AcquiredJob, result: WorkResultBuilder) -> HandlerResult;
}

#[async_trait]
impl<F, Fut> JobHandler for F
where
    F: Fn(AcquiredJob, WorkResultBuilder) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, job: AcquiredJob, result: WorkResultBuilder) -> HandlerResult {
        (self)(job, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysComplete;

    #[async_trait]
    impl JobHandler for AlwaysComplete {
        async fn handle(&self, _job: AcquiredJob, result: WorkResultBuilder) -> HandlerResult {
            Ok(Some(result.success().into()))
        }
    }

    async fn run(handler: &dyn JobHandler, job: AcquiredJob) -> HandlerResult {
        let builder = WorkResultBuilder::new(&job);
        handler.handle(job, builder).await
    }

    #[tokio::test]
    async fn test_struct_handler() {
        let result = run(&AlwaysComplete, AcquiredJob::new("JOB-1")).await.unwrap();
        assert_eq!(result, Some(WorkResult::complete("JOB-1")));
    }

    async fn reject_bad(job: AcquiredJob, _result: WorkResultBuilder) -> HandlerResult {
        if job.id() == "JOB-bad" {
            anyhow::bail!("cannot handle {}", job.id());
        }
        Ok(None)
    }

    #[tokio::test]
    async fn test_async_fn_handler() {
        assert!(run(&reject_bad, AcquiredJob::new("JOB-1")).await.unwrap().is_none());

        let err = run(&reject_bad, AcquiredJob::new("JOB-bad")).await.unwrap_err();
        assert_eq!(err.to_string(), "cannot handle JOB-bad");
    }

    #[tokio::test]
    async fn test_closure_handler() {
        let handler = |_job: AcquiredJob, result: WorkResultBuilder| async move {
            let failure = WorkResult::from(result.failure().error_message("nope"));
            Ok::<_, anyhow::Error>(Some(failure))
        };

        let result = run(&handler, AcquiredJob::new("JOB-1")).await.unwrap();
        assert_eq!(result.map(|r| r.kind()), Some("fail"));
    }
}
