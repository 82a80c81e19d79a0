//! Configuration module
//!
//! Turns the global CLI options into a worker configuration.

use anyhow::{Result, bail};
use extworker_runner::{Credentials, ExternalWorkerClient, WorkerConfig, generate_worker_id};

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    /// URL of the Flowable engine
    pub host: String,
    pub worker_id: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl Config {
    /// Resolves the worker configuration
    ///
    /// A token wins over basic credentials; username and password must be
    /// given together.
    pub fn worker_config(&self) -> Result<WorkerConfig> {
        let worker_id = self
            .worker_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(generate_worker_id);

        let credentials = match (&self.token, &self.username, &self.password) {
            (Some(token), _, _) => Some(Credentials::bearer(token.clone())),
            (None, Some(username), Some(password)) => {
                Some(Credentials::basic(username.clone(), password.clone()))
            }
            (None, Some(_), None) => bail!("--username requires --password"),
            (None, None, Some(_)) => bail!("--password requires --username"),
            (None, None, None) => None,
        };

        let mut config = WorkerConfig::new(self.host.clone(), worker_id);
        config.credentials = credentials;
        config.validate()?;

        Ok(config)
    }

    /// Creates a client for the configured engine
    pub fn client(&self) -> Result<ExternalWorkerClient> {
        ExternalWorkerClient::new(self.worker_config()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            host: "http://localhost:8090".to_string(),
            worker_id: Some("cli-worker".to_string()),
            username: None,
            password: None,
            token: None,
        }
    }

    #[test]
    fn test_worker_config_without_credentials() {
        let worker_config = config().worker_config().unwrap();
        assert_eq!(worker_config.flowable_host, "http://localhost:8090");
        assert_eq!(worker_config.worker_id, "cli-worker");
        assert!(worker_config.credentials.is_none());
    }

    #[test]
    fn test_token_wins_over_basic_credentials() {
        let worker_config = Config {
            username: Some("admin".to_string()),
            password: Some("test".to_string()),
            token: Some("token".to_string()),
            ..config()
        }
        .worker_config()
        .unwrap();

        assert_eq!(worker_config.credentials, Some(Credentials::bearer("token")));
    }

    #[test]
    fn test_username_without_password_is_rejected() {
        let result = Config {
            username: Some("admin".to_string()),
            ..config()
        }
        .worker_config();

        assert!(result.is_err());
    }

    #[test]
    fn test_missing_worker_id_is_generated() {
        let worker_config = Config {
            worker_id: None,
            ..config()
        }
        .worker_config()
        .unwrap();

        assert!(worker_config.worker_id.starts_with("rust-worker-"));
    }
}
