//! Version control operations on a local working tree.
//!
//! [`Git`] is the capability the change publisher depends on; [`CliGit`]
//! implements it on top of the `git` command line.

mod cli;
mod error;

pub use cli::{CliGit, CliGitConfig};
pub use error::GitError;

/// High level git operations used to publish changes.
pub trait Git {
    /// Fail with [`GitError::NotARepository`] unless the location is a repository.
    fn is_repository(&self) -> Result<(), GitError>;

    /// Whether the working tree has uncommitted changes.
    fn has_changes(&self) -> Result<bool, GitError>;

    /// Switch to the publish branch, creating it if needed.
    ///
    /// No-op when the publish branch is the base branch.
    fn create_branch(&self) -> Result<(), GitError>;

    /// Stage all working tree modifications.
    fn add(&self) -> Result<(), GitError>;

    /// Commit staged changes. Succeeds without committing when there is nothing to commit.
    fn commit(&self) -> Result<(), GitError>;

    /// Push the publish branch to the remote.
    fn push(&self) -> Result<(), GitError>;
}
