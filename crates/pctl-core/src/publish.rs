//! Publishes working tree changes as a pull request.
//!
//! The sequence is strictly ordered and stops at the first failure:
//! tool lookup, repository check, branch, add, commit, push, client
//! construction, pull request. Nothing is rolled back or retried.

use thiserror::Error;

use crate::git::{Git, GitError};
use crate::runner::CommandRunner;
use crate::scm::{PullRequest, PullRequestInput, ScmClientFactory, ScmError};
use crate::types::ErrorCategory;

const GIT: &str = "git";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to find {tool} on path")]
    ToolNotFound { tool: String },

    #[error("directory is not a git repository")]
    NotARepository(#[source] GitError),

    #[error("failed to create branch {branch}")]
    Branch {
        branch: String,
        #[source]
        source: GitError,
    },

    #[error("failed to add changes")]
    Stage(#[source] GitError),

    #[error("failed to commit changes")]
    Commit(#[source] GitError),

    #[error("failed to push changes")]
    Push(#[source] GitError),

    #[error("failed to create scm client")]
    RemoteClientInitFailed(#[source] ScmError),

    #[error("failed to create pull request from {head} into {base} on {repo}")]
    PullRequestCreateFailed {
        repo: String,
        head: String,
        base: String,
        #[source]
        source: ScmError,
    },
}

impl PublishError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ToolNotFound { .. }
            | Self::NotARepository(_)
            | Self::Branch { .. }
            | Self::Stage(_)
            | Self::Commit(_)
            | Self::RemoteClientInitFailed(_) => ErrorCategory::Environment,
            Self::Push(_) | Self::PullRequestCreateFailed { .. } => ErrorCategory::Retryable,
        }
    }
}

/// Turns local modifications into an opened pull request.
#[derive(Debug)]
pub struct ChangePublisher<R, F> {
    runner: R,
    scm: F,
}

impl<R: CommandRunner, F: ScmClientFactory> ChangePublisher<R, F> {
    pub fn new(runner: R, scm: F) -> Self {
        Self { runner, scm }
    }

    /// Commit and push the working tree driven by `git`, then open a pull
    /// request from `branch` into `base` on `repo` (`<owner>/<name>`).
    pub fn publish(
        &self,
        repo: &str,
        base: &str,
        branch: &str,
        git: &dyn Git,
    ) -> Result<PullRequest, PublishError> {
        if self.runner.lookup(GIT).is_none() {
            return Err(PublishError::ToolNotFound {
                tool: GIT.to_string(),
            });
        }

        git.is_repository().map_err(PublishError::NotARepository)?;
        git.create_branch()
            .map_err(|source| PublishError::Branch {
                branch: branch.to_string(),
                source,
            })?;
        git.add().map_err(PublishError::Stage)?;
        git.commit().map_err(PublishError::Commit)?;
        git.push().map_err(PublishError::Push)?;

        let client = self
            .scm
            .create()
            .map_err(PublishError::RemoteClientInitFailed)?;

        tracing::info!(repo, base, branch, "creating pull request");
        let input = PullRequestInput::new(branch, base);
        let pr = client
            .create_pull_request(repo, &input)
            .map_err(|source| PublishError::PullRequestCreateFailed {
                repo: repo.to_string(),
                head: branch.to_string(),
                base: base.to_string(),
                source,
            })?;
        tracing::info!(number = pr.number, link = %pr.link, "pull request created");
        Ok(pr)
    }
}
