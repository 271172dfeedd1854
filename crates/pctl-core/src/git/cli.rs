//! Git driver backed by the `git` command line.

use std::path::PathBuf;

use crate::runner::{CommandError, CommandRunner};

use super::{Git, GitError};

const GIT: &str = "git";
const COMMIT_MESSAGE: &str = "Push changes to remote";

/// Configuration for [`CliGit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliGitConfig {
    /// Working tree root
    pub location: PathBuf,
    /// Branch changes are published on
    pub branch: String,
    /// Remote pushed to
    pub remote: String,
    /// Branch the pull request targets
    pub base: String,
}

/// [`Git`] implementation that shells out through a [`CommandRunner`].
#[derive(Debug)]
pub struct CliGit<R> {
    config: CliGitConfig,
    runner: R,
}

impl<R: CommandRunner> CliGit<R> {
    pub fn new(config: CliGitConfig, runner: R) -> Self {
        Self { config, runner }
    }

    fn git_dir(&self) -> PathBuf {
        self.config.location.join(".git")
    }

    /// Run `git -C <location> <args>`.
    fn git(&self, args: &[&str]) -> Result<String, CommandError> {
        let location = self.config.location.to_string_lossy();
        let mut full = Vec::with_capacity(args.len() + 2);
        full.extend(["-C", &*location]);
        full.extend_from_slice(args);
        self.runner.run(GIT, &full)
    }

    fn branch_exists(&self, branch: &str) -> Result<bool, CommandError> {
        let reference = format!("refs/heads/{branch}");
        match self.git(&["rev-parse", "--verify", "--quiet", reference.as_str()]) {
            Ok(_) => Ok(true),
            Err(CommandError::Failed { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

impl<R: CommandRunner> Git for CliGit<R> {
    fn is_repository(&self) -> Result<(), GitError> {
        let git_dir = self.git_dir();
        if !git_dir.exists() {
            return Err(GitError::NotARepository {
                path: self.config.location.clone(),
            });
        }
        Ok(())
    }

    fn has_changes(&self) -> Result<bool, GitError> {
        let out = self
            .git(&["status", "--porcelain"])
            .map_err(GitError::StatusCheckFailed)?;
        Ok(!out.trim().is_empty())
    }

    fn create_branch(&self) -> Result<(), GitError> {
        let branch = self.config.branch.as_str();
        if branch == self.config.base {
            tracing::debug!(branch, "publishing on the base branch, not creating a branch");
            return Ok(());
        }

        let branch_err = |source| GitError::BranchCreateFailed {
            branch: branch.to_string(),
            source,
        };
        if self.branch_exists(branch).map_err(branch_err)? {
            tracing::info!(branch, "switching to existing branch");
            self.git(&["checkout", branch]).map_err(branch_err)?;
        } else {
            tracing::info!(branch, "creating new branch");
            self.git(&["checkout", "-b", branch]).map_err(branch_err)?;
        }
        Ok(())
    }

    fn add(&self) -> Result<(), GitError> {
        tracing::info!("adding unstaged changes");
        self.git(&["add", "--all"]).map_err(GitError::StageFailed)?;
        Ok(())
    }

    fn commit(&self) -> Result<(), GitError> {
        if !self.has_changes()? {
            tracing::debug!("nothing to commit");
            return Ok(());
        }
        self.git(&["commit", "-am", COMMIT_MESSAGE])
            .map_err(GitError::CommitFailed)?;
        Ok(())
    }

    fn push(&self) -> Result<(), GitError> {
        let CliGitConfig { remote, branch, .. } = &self.config;
        tracing::info!(%remote, %branch, "pushing to remote");
        self.git(&["push", remote.as_str(), branch.as_str()])
            .map_err(|source| GitError::PushFailed {
                remote: remote.clone(),
                branch: branch.clone(),
                source,
            })?;
        Ok(())
    }
}
