//! Configuration schema for pctl.toml

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::subscription::{
    DEFAULT_BRANCH, DEFAULT_NAMESPACE, DEFAULT_SUBSCRIPTION_NAME, InstallOptions,
};

/// Root configuration structure for pctl.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PctlConfig {
    /// Catalog service base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_url: Option<String>,

    /// Defaults for generated subscriptions
    #[serde(default)]
    pub install: InstallDefaults,

    /// Defaults for publishing pull requests
    #[serde(default)]
    pub git: GitDefaults,
}

impl PctlConfig {
    /// Keys accepted by [`PctlConfig::set`].
    pub const KEYS: [&'static str; 6] = [
        "catalog_url",
        "install.namespace",
        "install.subscription_name",
        "install.branch",
        "git.remote",
        "git.base",
    ];

    /// Set a single value by its dotted key, e.g. `install.namespace`.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let value = value.trim();
        if value.is_empty() {
            anyhow::bail!("Value for {key} must not be empty");
        }
        let slot = match key {
            "catalog_url" => {
                self.catalog_url = Some(value.to_string());
                return Ok(());
            }
            "install.namespace" => &mut self.install.namespace,
            "install.subscription_name" => &mut self.install.subscription_name,
            "install.branch" => &mut self.install.branch,
            "git.remote" => &mut self.git.remote,
            "git.base" => &mut self.git.base,
            _ => anyhow::bail!(
                "Unknown config key: {key} (expected one of {})",
                Self::KEYS.join(", ")
            ),
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallDefaults {
    pub namespace: String,
    pub subscription_name: String,
    pub branch: String,
}

impl Default for InstallDefaults {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            subscription_name: DEFAULT_SUBSCRIPTION_NAME.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl InstallDefaults {
    pub fn to_options(&self) -> InstallOptions {
        InstallOptions::new()
            .with_namespace(&self.namespace)
            .with_subscription_name(&self.subscription_name)
            .with_branch(&self.branch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitDefaults {
    /// Remote changes are pushed to
    pub remote: String,
    /// Branch pull requests target
    pub base: String,
}

impl Default for GitDefaults {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            base: "main".to_string(),
        }
    }
}
