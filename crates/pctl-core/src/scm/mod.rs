//! Remote source-code-hosting access used to open pull requests.
//!
//! The publisher only sees [`ScmClientFactory`] and [`PullRequestClient`];
//! [`EnvScmClientFactory`] builds a concrete client from ambient
//! environment variables.

mod github;

use std::collections::HashMap;

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

pub use github::GitHubClient;

/// Title used for every generated pull request
pub const PULL_REQUEST_TITLE: &str = "PCTL Generated Profile Resource Update";

/// Selects the hosting provider (`github`)
pub const ENV_KIND: &str = "GIT_KIND";
/// Overrides the provider's server URL
pub const ENV_SERVER: &str = "GIT_SERVER";
/// Access token for the provider API
pub const ENV_TOKEN: &str = "GIT_TOKEN";

#[derive(Debug, Error)]
pub enum ScmError {
    #[error("$GIT_TOKEN must be set to create pull requests")]
    MissingToken,

    #[error("unsupported git provider `{kind}` (set $GIT_KIND to `github`)")]
    UnsupportedKind { kind: String },

    #[error("invalid git server url {server:?}")]
    InvalidServer {
        server: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client")]
    ClientInit(#[source] reqwest::Error),

    #[error("invalid repository `{repo}`: expected <owner>/<name>")]
    InvalidRepository { repo: String },

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {}: {}", .status.as_u16(), .body.trim())]
    Api {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode pull request from {url}")]
    InvalidResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Pull request creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestInput {
    pub title: String,
    /// Branch containing the changes
    pub head: String,
    /// Branch the changes should be merged into
    pub base: String,
}

impl PullRequestInput {
    /// Request with the standard pctl title.
    pub fn new(head: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            title: PULL_REQUEST_TITLE.to_string(),
            head: head.into(),
            base: base.into(),
        }
    }
}

/// A pull request as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub link: String,
}

/// Opens pull requests on a hosted repository.
pub trait PullRequestClient {
    /// Open a pull request on `repo` (`<owner>/<name>`).
    fn create_pull_request(
        &self,
        repo: &str,
        input: &PullRequestInput,
    ) -> Result<PullRequest, ScmError>;
}

/// Builds a [`PullRequestClient`] on demand.
pub trait ScmClientFactory {
    fn create(&self) -> Result<Box<dyn PullRequestClient>, ScmError>;
}

/// Builds clients from `GIT_KIND`, `GIT_SERVER` and `GIT_TOKEN`.
#[derive(Debug, Clone, Default)]
pub struct EnvScmClientFactory {
    overrides: Option<HashMap<String, String>>,
}

impl EnvScmClientFactory {
    /// Read configuration from the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from `vars` instead of the process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self {
            overrides: Some(vars),
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Construct the concrete client described by the environment.
    pub fn github_client(&self) -> Result<GitHubClient, ScmError> {
        let kind = self.var(ENV_KIND).unwrap_or_else(|| "github".to_string());
        if !kind.eq_ignore_ascii_case("github") {
            return Err(ScmError::UnsupportedKind { kind });
        }
        let token = self.var(ENV_TOKEN).ok_or(ScmError::MissingToken)?;
        let api_base = github::api_base(self.var(ENV_SERVER).as_deref())?;
        tracing::debug!(%api_base, "using GitHub API");
        GitHubClient::new(api_base, token)
    }
}

impl ScmClientFactory for EnvScmClientFactory {
    fn create(&self) -> Result<Box<dyn PullRequestClient>, ScmError> {
        Ok(Box::new(self.github_client()?))
    }
}
