//! Job poller
//!
//! Acquires jobs of one topic and dispatches them, one poll cycle after the
//! other:
//! - the first acquisition starts right away
//! - after a batch with jobs the next acquisition starts immediately
//! - after an empty batch the poller sleeps for the wait period
//!
//! Cancellation is checked before every acquisition and right after every
//! drain; it never interrupts a running handler or network call.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::gateway::JobGateway;
use crate::handler::JobHandler;
use crate::scheduler::dispatcher::JobDispatcher;
use crate::scheduler::subscription::{Subscription, SubscriptionParams, SubscriptionState};

/// Poll loop of one subscription
pub struct JobPoller {
    params: SubscriptionParams,
    gateway: Arc<dyn JobGateway>,
    dispatcher: JobDispatcher,
    cancel: CancellationToken,
    state: watch::Sender<SubscriptionState>,
}

impl JobPoller {
    /// Creates a new job poller
    pub fn new(
        params: SubscriptionParams,
        gateway: Arc<dyn JobGateway>,
        handler: Arc<dyn JobHandler>,
    ) -> Self {
        let (state, _) = watch::channel(SubscriptionState::Idle);
        Self {
            params,
            dispatcher: JobDispatcher::new(Arc::clone(&gateway), handler),
            gateway,
            cancel: CancellationToken::new(),
            state,
        }
    }

    /// Spawns the polling loop and returns its handle
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> Subscription {
        let cancel = self.cancel.clone();
        let state = self.state.subscribe();
        let params = self.params.clone();
        let handle = tokio::spawn(self.run());

        Subscription::new(&params, cancel, state, handle)
    }

    /// Runs the polling loop until cancelled
    pub async fn run(self) {
        info!(
            "Subscribed to topic '{}' (wait period: {:?})",
            self.params.topic, self.params.wait_period
        );

        while !self.cancel.is_cancelled() {
            let executed = self.poll_and_dispatch_once().await;

            if self.cancel.is_cancelled() {
                break;
            }

            if executed > 0 {
                debug!("Executed {} job(s), polling again", executed);
                continue;
            }

            self.state.send_replace(SubscriptionState::Waiting);
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = time::sleep(self.params.wait_period) => {}
            }
        }

        self.state.send_replace(SubscriptionState::Cancelled);
        info!("Subscription to topic '{}' stopped", self.params.topic);
    }

    /// Performs a single poll cycle
    ///
    /// A failed acquisition counts as an empty batch.
    async fn poll_and_dispatch_once(&self) -> usize {
        self.state.send_replace(SubscriptionState::Polling);
        debug!("Polling for jobs of topic '{}'", self.params.topic);

        let jobs = match self.gateway.acquire_jobs(self.params.acquire_params()).await {
            Ok(jobs) => jobs,
            Err(e) => {
                error!(
                    "Failed to acquire jobs for topic '{}': {:#}",
                    self.params.topic, e
                );
                Vec::new()
            }
        };

        self.state.send_replace(SubscriptionState::Draining);

        if jobs.is_empty() {
            debug!("No jobs available for topic '{}'", self.params.topic);
            return 0;
        }

        info!(
            "Acquired {} job(s) for topic '{}'",
            jobs.len(),
            self.params.topic
        );

        let count = jobs.len();
        for job in jobs {
            self.dispatcher.dispatch(job).await;
        }

        count
    }
}
