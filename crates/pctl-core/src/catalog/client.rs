//! HTTP client for the profile catalog service.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::types::ErrorCategory;

use super::ProfileDescription;

const USER_AGENT: &str = concat!("pctl/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog url {url:?}: {reason}")]
    InvalidCatalogUrl { url: String, reason: String },

    #[error("failed to build HTTP client")]
    ClientInit(#[source] reqwest::Error),

    #[error("failed to fetch profile from {url}")]
    CatalogRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unable to find profile `{profile_name}` in catalog `{catalog_name}`")]
    ProfileNotFound {
        catalog_name: String,
        profile_name: String,
    },

    #[error("failed to fetch profile: status code {}", .status.as_u16())]
    CatalogRequestFailed { status: StatusCode },

    #[error("failed to parse profile `{profile_name}` from catalog `{catalog_name}`")]
    CatalogResponseInvalid {
        catalog_name: String,
        profile_name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidCatalogUrl { .. } | Self::ProfileNotFound { .. } => ErrorCategory::Input,
            Self::ClientInit(_) => ErrorCategory::Environment,
            Self::CatalogRequest { .. }
            | Self::CatalogRequestFailed { .. }
            | Self::CatalogResponseInvalid { .. } => ErrorCategory::Retryable,
        }
    }
}

/// Resolves profile references against a catalog service.
///
/// Every call issues exactly one GET; nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
}

impl CatalogClient {
    /// Create a client using the transport's default timeout.
    pub fn new() -> Result<Self, CatalogError> {
        Self::build(None)
    }

    /// Create a client that gives up on a request after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, CatalogError> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CatalogError::ClientInit)?;
        Ok(Self { http })
    }

    /// Fetch the description of `profile_name` from `catalog_name`.
    pub fn resolve(
        &self,
        catalog_url: &str,
        catalog_name: &str,
        profile_name: &str,
    ) -> Result<ProfileDescription, CatalogError> {
        let url = profile_url(catalog_url, catalog_name, profile_name)?;
        tracing::debug!(%url, "fetching profile from catalog");

        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|source| CatalogError::CatalogRequest {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::ProfileNotFound {
                catalog_name: catalog_name.to_string(),
                profile_name: profile_name.to_string(),
            });
        }
        if status != StatusCode::OK {
            return Err(CatalogError::CatalogRequestFailed { status });
        }

        let body = response
            .bytes()
            .map_err(|source| CatalogError::CatalogRequest {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| CatalogError::CatalogResponseInvalid {
            catalog_name: catalog_name.to_string(),
            profile_name: profile_name.to_string(),
            source,
        })
    }
}

/// Build `<catalog_url>/profiles/<catalog>/<profile>`.
///
/// Path segments are appended to whatever path the base URL already has.
pub fn profile_url(
    catalog_url: &str,
    catalog_name: &str,
    profile_name: &str,
) -> Result<Url, CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidCatalogUrl {
        url: catalog_url.to_string(),
        reason,
    };
    let mut url = Url::parse(catalog_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("url cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["profiles", catalog_name, profile_name]);
    Ok(url)
}
