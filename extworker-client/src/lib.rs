//! External Job REST Client
//!
//! A small, type-safe HTTP client for the Flowable external worker job API
//! (`/external-job-api`).
//!
//! The client owns the worker id used for every lifecycle call that does not
//! name one explicitly, and the credentials attached to every request.
//!
//! # Example
//!
//! ```no_run
//! use extworker_client::{Credentials, ExternalWorkerRestClient};
//! use extworker_core::dto::job::AcquireJobParams;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ExternalWorkerRestClient::builder("http://localhost:8090", "my-worker")
//!         .credentials(Credentials::basic("admin", "test"))
//!         .build()?;
//!
//!     let jobs = client.acquire_jobs(AcquireJobParams::new("myTopic")).await?;
//!     println!("Acquired {} job(s)", jobs.len());
//!     Ok(())
//! }
//! ```

mod auth;
pub mod error;
mod jobs;

pub use auth::Credentials;
pub use error::{ClientError, Result};

use reqwest::{Client, ClientBuilder, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Path prefix of the external worker job API
const JOB_API: &str = "/external-job-api";

type CustomizeFn = Box<dyn FnOnce(ClientBuilder) -> ClientBuilder + Send>;

/// HTTP client for the external worker job API
///
/// Groups the endpoints into:
/// - Job queries (list, get)
/// - Job lifecycle (acquire, complete, fail, BPMN error, CMMN terminate)
#[derive(Debug, Clone)]
pub struct ExternalWorkerRestClient {
    /// Base URL of the engine (e.g., "http://localhost:8090")
    base_url: String,
    /// Worker id used when a call does not provide one
    worker_id: String,
    /// Credentials attached to every request
    credentials: Option<Credentials>,
    /// HTTP client instance
    client: Client,
}

/// Builder for [`ExternalWorkerRestClient`]
pub struct RestClientBuilder {
    base_url: String,
    worker_id: String,
    credentials: Option<Credentials>,
    client: Option<Client>,
    customize: Option<CustomizeFn>,
}

impl RestClientBuilder {
    /// Sets the credentials attached to every request
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets optional credentials
    pub fn maybe_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Uses a preconfigured HTTP client
    ///
    /// A customisation hook set with [`customize`](Self::customize) is
    /// ignored when a client is given.
    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Customises the underlying HTTP client before it is built
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use extworker_client::ExternalWorkerRestClient;
    /// use std::time::Duration;
    ///
    /// let client = ExternalWorkerRestClient::builder("http://localhost:8090", "my-worker")
    ///     .customize(|builder| builder.timeout(Duration::from_secs(30)))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn customize<F>(mut self, customize: F) -> Self
    where
        F: FnOnce(ClientBuilder) -> ClientBuilder + Send + 'static,
    {
        self.customize = Some(Box::new(customize));
        self
    }

    /// Builds the client
    pub fn build(self) -> Result<ExternalWorkerRestClient> {
        if self.worker_id.is_empty() {
            return Err(ClientError::InvalidRequest(
                "worker id cannot be empty".to_string(),
            ));
        }

        let client = match (self.client, self.customize) {
            (Some(client), _) => client,
            (None, Some(customize)) => customize(Client::builder()).build()?,
            (None, None) => Client::new(),
        };

        Ok(ExternalWorkerRestClient {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            worker_id: self.worker_id,
            credentials: self.credentials,
            client,
        })
    }
}

impl ExternalWorkerRestClient {
    /// Create a new client without credentials
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the engine (e.g., "http://localhost:8090")
    /// * `worker_id` - Default worker id for lifecycle calls
    ///
    /// # Example
    /// ```
    /// use extworker_client::ExternalWorkerRestClient;
    ///
    /// let client = ExternalWorkerRestClient::new("http://localhost:8090", "my-worker");
    /// assert_eq!(client.worker_id(), "my-worker");
    /// ```
    pub fn new(base_url: impl Into<String>, worker_id: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            worker_id: worker_id.into(),
            credentials: None,
            client: Client::new(),
        }
    }

    /// Start building a client with credentials or a customised transport
    pub fn builder(base_url: impl Into<String>, worker_id: impl Into<String>) -> RestClientBuilder {
        RestClientBuilder {
            base_url: base_url.into(),
            worker_id: worker_id.into(),
            credentials: None,
            client: None,
            customize: None,
        }
    }

    /// Get the base URL of the engine
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the default worker id
    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// Resolve the worker id of a call, falling back to the default
    fn resolve_worker_id(&self, worker_id: Option<String>) -> String {
        worker_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.worker_id.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, JOB_API, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("GET {}", url);
        self.authorize(self.client.get(url))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("POST {}", url);
        self.authorize(self.client.post(url))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(credentials) => credentials.apply(request),
            None => request,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is ignored
    ///
    /// Lifecycle calls answer with 204 or with a body nobody needs.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
