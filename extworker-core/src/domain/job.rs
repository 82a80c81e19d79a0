//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::variable::Variable;

/// External worker job as returned by the job query endpoints
///
/// Only `id` is guaranteed; every other attribute depends on the engine
/// (BPMN or CMMN) and on the state of the job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
    #[serde(default)]
    pub process_instance_id: Option<String>,
    #[serde(default)]
    pub process_definition_id: Option<String>,
    #[serde(default)]
    pub execution_id: Option<String>,
    #[serde(default)]
    pub scope_id: Option<String>,
    #[serde(default)]
    pub sub_scope_id: Option<String>,
    #[serde(default)]
    pub scope_definition_id: Option<String>,
    #[serde(default)]
    pub scope_type: Option<String>,
    #[serde(default)]
    pub element_id: Option<String>,
    #[serde(default)]
    pub element_name: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub retries: Option<i32>,
    #[serde(default)]
    pub exception_message: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub lock_owner: Option<String>,
    #[serde(default)]
    pub lock_expiration_time: Option<DateTime<Utc>>,
}

impl Job {
    /// Creates a job carrying only its id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            correlation_id: None,
            process_instance_id: None,
            process_definition_id: None,
            execution_id: None,
            scope_id: None,
            sub_scope_id: None,
            scope_definition_id: None,
            scope_type: None,
            element_id: None,
            element_name: None,
            topic: None,
            retries: None,
            exception_message: None,
            due_date: None,
            create_time: None,
            tenant_id: None,
            lock_owner: None,
            lock_expiration_time: None,
        }
    }
}

/// A job locked by this worker through the acquire endpoint
///
/// Structure shared between the REST client (decodes it) and the runner
/// (hands a copy to the job handler). The variables keep the order the
/// server sent them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquiredJob {
    #[serde(flatten)]
    pub job: Job,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl AcquiredJob {
    /// Creates an acquired job without variables
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            job: Job::new(id),
            variables: Vec::new(),
        }
    }

    /// Adds a variable, keeping insertion order
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// The job id
    pub fn id(&self) -> &str {
        &self.job.id
    }

    /// Looks up a variable by name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}
