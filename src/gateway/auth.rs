//! Credential resolution per backing service

use reqwest::RequestBuilder;

use crate::config::{BitbucketConfig, JiraConfig};
use crate::error::{BridgeError, Result};

/// How a request authenticates
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Basic auth: email + API token, or username + app password
    Basic { username: String, secret: String },
    /// Bearer token
    Bearer(String),
}

impl Credentials {
    /// Pick a credential set; a bearer token wins over basic auth
    pub fn resolve(bearer: Option<&str>, basic: Option<(&str, &str)>) -> Option<Self> {
        let present = |s: &&str| !s.trim().is_empty();

        if let Some(token) = bearer.filter(present) {
            return Some(Self::Bearer(token.to_string()));
        }

        basic
            .filter(|(user, secret)| present(user) && present(secret))
            .map(|(user, secret)| Self::Basic {
                username: user.to_string(),
                secret: secret.to_string(),
            })
    }

    /// Jira: bearer token, else email + API token
    pub fn for_jira(config: &JiraConfig) -> Result<Self> {
        let basic = config.email.as_deref().zip(config.api_token.as_deref());
        Self::resolve(config.bearer_token.as_deref(), basic).ok_or_else(|| {
            BridgeError::Configuration(
                "Missing Jira credentials: set JIRA_EMAIL and JIRA_API_TOKEN (or JIRA_BEARER_TOKEN)"
                    .to_string(),
            )
        })
    }

    /// Bitbucket: API token as bearer, else username + app password
    pub fn for_bitbucket(config: &BitbucketConfig) -> Result<Self> {
        let basic = config.username.as_deref().zip(config.app_password.as_deref());
        Self::resolve(config.api_token.as_deref(), basic).ok_or_else(|| {
            BridgeError::Configuration(
                "Missing Bitbucket credentials: set BITBUCKET_USERNAME and BITBUCKET_APP_PASSWORD (or BITBUCKET_API_TOKEN)"
                    .to_string(),
            )
        })
    }

    /// Attach the credentials to an outgoing request
    pub fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, secret } => builder.basic_auth(username, Some(secret)),
            Self::Bearer(token) => builder.bearer_auth(token),
        }
    }

    /// Scheme name for logging
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Bearer(_) => "bearer",
        }
    }
}

// Secrets never reach logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("secret", &"***")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"***").finish(),
        }
    }
}
