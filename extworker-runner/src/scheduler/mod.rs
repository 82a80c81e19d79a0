//! Scheduler layer for the runner
//!
//! This layer handles polling the engine for new jobs of a topic and
//! handing them to the job handler. It manages the lifecycle of jobs
//! from acquisition to their reported result.

pub mod dispatcher;
pub mod poller;
pub mod subscription;

pub use dispatcher::JobDispatcher;
pub use poller::JobPoller;
pub use subscription::{DEFAULT_WAIT_PERIOD, Subscription, SubscriptionParams, SubscriptionState};
