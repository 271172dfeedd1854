//! Git operation errors

use std::path::PathBuf;

use thiserror::Error;

use crate::runner::CommandError;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("{} is not a git repository", .path.display())]
    NotARepository { path: PathBuf },

    #[error("failed to check if there are changes")]
    StatusCheckFailed(#[source] CommandError),

    #[error("failed to create new branch {branch}")]
    BranchCreateFailed {
        branch: String,
        #[source]
        source: CommandError,
    },

    #[error("failed to run add")]
    StageFailed(#[source] CommandError),

    #[error("failed to run commit")]
    CommitFailed(#[source] CommandError),

    #[error("failed to push changes to remote {remote} with branch {branch}")]
    PushFailed {
        remote: String,
        branch: String,
        #[source]
        source: CommandError,
    },
}
