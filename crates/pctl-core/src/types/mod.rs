//! Shared core types used across the catalog, install and publish layers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Broad classification of a failure, used by callers to decide what to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transient failure (network, remote service); retrying may succeed.
    Retryable,
    /// The caller supplied something wrong (unknown profile, bad reference).
    Input,
    /// The local environment is missing something (tool, credentials, repository).
    Environment,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid profile reference `{input}`: expected <catalog>/<profile>")]
pub struct ReferenceError {
    pub input: String,
}

/// Identifies a profile inside a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileReference {
    catalog_name: String,
    profile_name: String,
}

impl ProfileReference {
    pub fn new(catalog_name: impl Into<String>, profile_name: impl Into<String>) -> Self {
        Self {
            catalog_name: catalog_name.into(),
            profile_name: profile_name.into(),
        }
    }

    /// Parse the `<catalog>/<profile>` form.
    pub fn parse(input: &str) -> Result<Self, ReferenceError> {
        let invalid = || ReferenceError {
            input: input.to_string(),
        };
        let (catalog, profile) = input.split_once('/').ok_or_else(invalid)?;
        if catalog.is_empty() || profile.is_empty() || profile.contains('/') {
            return Err(invalid());
        }
        Ok(Self::new(catalog, profile))
    }

    pub fn catalog_name(&self) -> &str {
        &self.catalog_name
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }
}

impl FromStr for ProfileReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ProfileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.catalog_name, self.profile_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_catalog_and_profile() {
        let reference = ProfileReference::parse("nginx-catalog/weaveworks-nginx").unwrap();
        assert_eq!(reference.catalog_name(), "nginx-catalog");
        assert_eq!(reference.profile_name(), "weaveworks-nginx");
        assert_eq!(reference.to_string(), "nginx-catalog/weaveworks-nginx");
    }

    #[test]
    fn parse_rejects_malformed_references() {
        for input in ["weaveworks-nginx", "/nginx", "catalog/", "a/b/c", ""] {
            let err = ProfileReference::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let reference: ProfileReference = "foo/bar".parse().unwrap();
        assert_eq!(reference, ProfileReference::new("foo", "bar"));
    }
}
