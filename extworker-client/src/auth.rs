//! Request credentials

use reqwest::RequestBuilder;
use std::fmt;

/// Credentials attached to every request
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP basic authentication
    Basic { username: String, password: String },
    /// `Authorization: Bearer <token>`
    Bearer(String),
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
            Credentials::Bearer(token) => request.bearer_auth(token),
        }
    }
}

// Keeps secrets out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Credentials::Bearer(_) => f.debug_tuple("Bearer").field(&"***").finish(),
        }
    }
}
