//! Topic subscriptions
//!
//! A [`Subscription`] is the handle of one running poll loop. It can be
//! cancelled, observed, and awaited; dropping it leaves the loop running.

use extworker_core::dto::job::AcquireJobParams;
use std::fmt;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Wait between polls after an acquisition returned no jobs
pub const DEFAULT_WAIT_PERIOD: Duration = Duration::from_secs(30);

/// Settings of one subscription
///
/// Lock duration, number of tasks and number of retries are left to the
/// gateway defaults when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionParams {
    pub topic: String,
    pub lock_duration: Option<String>,
    pub number_of_tasks: Option<u32>,
    pub number_of_retries: Option<u32>,
    pub scope_type: Option<String>,
    pub wait_period: Duration,
}

impl SubscriptionParams {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            lock_duration: None,
            number_of_tasks: None,
            number_of_retries: None,
            scope_type: None,
            wait_period: DEFAULT_WAIT_PERIOD,
        }
    }

    /// ISO-8601 lock duration, e.g. `PT5M`
    pub fn lock_duration(mut self, lock_duration: impl Into<String>) -> Self {
        self.lock_duration = Some(lock_duration.into());
        self
    }

    /// Maximum number of jobs per acquisition
    pub fn number_of_tasks(mut self, number_of_tasks: u32) -> Self {
        self.number_of_tasks = Some(number_of_tasks);
        self
    }

    /// Retries the engine assigns to acquired jobs
    pub fn number_of_retries(mut self, number_of_retries: u32) -> Self {
        self.number_of_retries = Some(number_of_retries);
        self
    }

    /// Restricts acquisition to `bpmn` or `cmmn` jobs
    pub fn scope_type(mut self, scope_type: impl Into<String>) -> Self {
        self.scope_type = Some(scope_type.into());
        self
    }

    pub fn wait_period(mut self, wait_period: Duration) -> Self {
        self.wait_period = wait_period;
        self
    }

    /// Wait period in (fractional) seconds
    ///
    /// Zero, negative, NaN and out-of-range values fall back to
    /// [`DEFAULT_WAIT_PERIOD`].
    pub fn wait_period_seconds(self, seconds: f64) -> Self {
        let wait_period = Duration::try_from_secs_f64(seconds)
            .ok()
            .filter(|period| !period.is_zero())
            .unwrap_or(DEFAULT_WAIT_PERIOD);
        self.wait_period(wait_period)
    }

    pub(crate) fn acquire_params(&self) -> AcquireJobParams {
        AcquireJobParams {
            topic: self.topic.clone(),
            lock_duration: self.lock_duration.clone(),
            number_of_tasks: self.number_of_tasks,
            number_of_retries: self.number_of_retries,
            worker_id: None,
            scope_type: self.scope_type.clone(),
        }
    }
}

/// Where a poll loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// Created, first acquisition not started yet
    Idle,
    /// Waiting for an acquisition to return
    Polling,
    /// Dispatching the jobs of the last acquisition
    Draining,
    /// Sleeping after an empty acquisition
    Waiting,
    /// Stopped for good
    Cancelled,
}

impl fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionState::Idle => write!(f, "Idle"),
            SubscriptionState::Polling => write!(f, "Polling"),
            SubscriptionState::Draining => write!(f, "Draining"),
            SubscriptionState::Waiting => write!(f, "Waiting"),
            SubscriptionState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Handle of a running poll loop
#[derive(Debug)]
pub struct Subscription {
    topic: String,
    wait_period: Duration,
    cancel: CancellationToken,
    state: watch::Receiver<SubscriptionState>,
    handle: JoinHandle<()>,
}

impl Subscription {
    pub(crate) fn new(
        params: &SubscriptionParams,
        cancel: CancellationToken,
        state: watch::Receiver<SubscriptionState>,
        handle: JoinHandle<()>,
    ) -> Self {
        Self {
            topic: params.topic.clone(),
            wait_period: params.wait_period,
            cancel,
            state,
            handle,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn wait_period(&self) -> Duration {
        self.wait_period
    }

    /// Stops the loop
    ///
    /// No acquisition starts after this call. A pending wait is cut short;
    /// jobs that are being dispatched still finish.
    pub fn unsubscribe(&self) {
        if !self.cancel.is_cancelled() {
            info!("Unsubscribing from topic '{}'", self.topic);
        }
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn state(&self) -> SubscriptionState {
        *self.state.borrow()
    }

    /// Waits until the loop has reached the given state
    ///
    /// Returns immediately if it is already there. Returns `false` when
    /// the loop ended without reaching it.
    pub async fn wait_for_state(&self, target: SubscriptionState) -> bool {
        let mut state = self.state.clone();
        state.wait_for(|s| *s == target).await.is_ok()
    }

    /// Waits for the loop to finish after [`unsubscribe`](Self::unsubscribe)
    pub async fn stopped(self) {
        if let Err(e) = self.handle.await {
            warn!("Poll loop for topic '{}' ended abnormally: {}", self.topic, e);
        }
    }
}
