//! Worker configuration
//!
//! Defines the client-level settings of a worker: which engine to talk to,
//! under which worker id, and with which credentials.

use extworker_client::{Credentials, ExternalWorkerRestClient, RestClientBuilder};
use uuid::Uuid;

/// Engine used when no host is configured
pub const DEFAULT_FLOWABLE_HOST: &str = "https://cloud.flowable.com/work/";

/// Worker configuration
///
/// The worker id is resolved once here and reused for every call the
/// worker makes.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Engine base URL (e.g., "http://localhost:8090")
    pub flowable_host: String,

    /// Worker id the engine locks jobs for
    pub worker_id: String,

    /// Credentials attached to every request
    pub credentials: Option<Credentials>,
}

impl WorkerConfig {
    /// Creates a new configuration without credentials
    pub fn new(flowable_host: impl Into<String>, worker_id: impl Into<String>) -> Self {
        Self {
            flowable_host: flowable_host.into(),
            worker_id: worker_id.into(),
            credentials: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - FLOWABLE_HOST (optional, default: https://cloud.flowable.com/work/)
    /// - FLOWABLE_WORKER_ID (optional, generated when unset)
    /// - FLOWABLE_USERNAME / FLOWABLE_PASSWORD (optional, basic credentials)
    /// - FLOWABLE_BEARER_TOKEN (optional, takes precedence over basic credentials)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let flowable_host =
            var("FLOWABLE_HOST").unwrap_or_else(|| DEFAULT_FLOWABLE_HOST.to_string());
        let worker_id = var("FLOWABLE_WORKER_ID").unwrap_or_else(generate_worker_id);

        let credentials = match (
            var("FLOWABLE_BEARER_TOKEN"),
            var("FLOWABLE_USERNAME"),
            var("FLOWABLE_PASSWORD"),
        ) {
            (Some(token), _, _) => Some(Credentials::bearer(token)),
            (None, Some(username), Some(password)) => Some(Credentials::basic(username, password)),
            (None, Some(_), None) => {
                anyhow::bail!("FLOWABLE_USERNAME is set but FLOWABLE_PASSWORD is not")
            }
            (None, None, Some(_)) => {
                anyhow::bail!("FLOWABLE_PASSWORD is set but FLOWABLE_USERNAME is not")
            }
            (None, None, None) => None,
        };

        Ok(Self {
            flowable_host,
            worker_id,
            credentials,
        })
    }

    /// Sets the credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.worker_id.is_empty() {
            anyhow::bail!("worker_id cannot be empty");
        }

        if self.flowable_host.is_empty() {
            anyhow::bail!("flowable_host cannot be empty");
        }

        if !self.flowable_host.starts_with("http://") && !self.flowable_host.starts_with("https://")
        {
            anyhow::bail!("flowable_host must start with http:// or https://");
        }

        Ok(())
    }

    /// REST client builder preloaded with this configuration
    ///
    /// Use it to customise the HTTP transport before building the client.
    pub fn rest_client_builder(&self) -> RestClientBuilder {
        ExternalWorkerRestClient::builder(self.flowable_host.clone(), self.worker_id.clone())
            .maybe_credentials(self.credentials.clone())
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FLOWABLE_HOST, generate_worker_id())
    }
}

/// Generates a worker id of the form `rust-worker-<random>`
pub fn generate_worker_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("rust-worker-{}", &suffix[..12])
}
