//! Config store for loading and saving pctl.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::PctlConfig;

/// Environment variable overriding the catalog URL from the config file
pub const ENV_CATALOG_URL: &str = "PCTL_CATALOG_URL";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at `<config dir>/pctl/pctl.toml`.
    pub fn from_default_location() -> anyhow::Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("pctl");
        Ok(Self::from_path(dir.join("pctl.toml")))
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config, falling back to defaults when the file does not exist.
    pub fn load(&self) -> anyhow::Result<PctlConfig> {
        if !self.config_path.exists() {
            return Ok(PctlConfig::default());
        }
        let content = std::fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;
        toml::from_str(&content).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }

    pub fn save(&self, config: &PctlConfig) -> anyhow::Result<()> {
        let content = config.to_toml()?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}

/// Pick the catalog URL: explicit value, then `PCTL_CATALOG_URL`, then config.
pub fn resolve_catalog_url(explicit: Option<&str>, config: &PctlConfig) -> Option<String> {
    resolve_catalog_url_with(explicit, std::env::var(ENV_CATALOG_URL).ok(), config)
}

fn resolve_catalog_url_with(
    explicit: Option<&str>,
    from_env: Option<String>,
    config: &PctlConfig,
) -> Option<String> {
    explicit
        .map(str::to_string)
        .or(from_env)
        .or_else(|| config.catalog_url.clone())
        .filter(|url| !url.trim().is_empty())
}
