//! Configuration management
//!
//! Settings live in `<config dir>/pctl/pctl.toml`; command-line flags and
//! `PCTL_CATALOG_URL` take precedence over the file.

mod schema;
mod store;

pub use schema::{GitDefaults, InstallDefaults, PctlConfig};
pub use store::{ConfigStore, ENV_CATALOG_URL, resolve_catalog_url};
