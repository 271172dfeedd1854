//! Profile description as served by the catalog.

use serde::{Deserialize, Deserializer, Serialize};

/// Profile description returned by `GET profiles/<catalog>/<profile>`.
///
/// Only `url` is needed to build a subscription; the remaining fields are
/// descriptive and default to empty when the catalog omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDescription {
    /// Source location of the profile definition
    #[serde(deserialize_with = "non_empty")]
    pub url: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub version: String,

    /// Catalog the profile was published in
    #[serde(default)]
    pub catalog: String,

    #[serde(default)]
    pub maintainer: String,

    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl ProfileDescription {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: String::new(),
            description: String::new(),
            version: String::new(),
            catalog: String::new(),
            maintainer: String::new(),
            prerequisites: Vec::new(),
        }
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.trim().is_empty() {
        return Err(serde::de::Error::custom("profile url must not be empty"));
    }
    Ok(value)
}
