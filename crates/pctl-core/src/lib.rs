//! pctl Core Library
//!
//! Resolves profiles from a catalog service, turns them into
//! `ProfileSubscription` resources and publishes the result to a git
//! repository as a pull request.

pub mod catalog;
pub mod config;
pub mod git;
pub mod install;
pub mod publish;
pub mod runner;
pub mod scm;
pub mod subscription;
pub mod types;
pub mod writer;

/// Re-exports of commonly used types
pub mod prelude {
    // Catalog
    pub use crate::catalog::{CatalogClient, CatalogError, ProfileDescription};

    // Configuration
    pub use crate::config::{ConfigStore, PctlConfig};

    // Version control
    pub use crate::git::{CliGit, CliGitConfig, Git, GitError};

    // Install and publish
    pub use crate::install::{InstallError, InstallOrchestrator, InstallReport};
    pub use crate::publish::{ChangePublisher, PublishError};

    // Remote SCM
    pub use crate::scm::{EnvScmClientFactory, PullRequest, PullRequestClient, ScmClientFactory};

    // Subscriptions
    pub use crate::subscription::{InstallOptions, SubscriptionResource, build_subscription};

    // Shared
    pub use crate::runner::{CommandRunner, ProcessRunner};
    pub use crate::types::{ErrorCategory, ProfileReference};
    pub use crate::writer::{FileWriter, StreamWriter, Writer};
}
