//! Install orchestration: catalog lookup, subscription build, output.

use thiserror::Error;

use crate::catalog::{CatalogClient, CatalogError, ProfileDescription};
use crate::subscription::{InstallOptions, SubscriptionResource, build_subscription};
use crate::types::{ErrorCategory, ProfileReference};
use crate::writer::{Writer, WriterError};

#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to output subscription information")]
    Output(#[source] WriterError),
}

impl InstallError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Catalog(err) => err.category(),
            Self::Output(_) => ErrorCategory::Environment,
        }
    }
}

/// What an install produced.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub description: ProfileDescription,
    pub subscription: SubscriptionResource,
}

/// Wires the catalog client, the subscription builder and a writer.
///
/// Publishing the result is a separate step composed by the caller.
#[derive(Debug, Clone)]
pub struct InstallOrchestrator {
    catalog: CatalogClient,
}

impl InstallOrchestrator {
    pub fn new(catalog: CatalogClient) -> Self {
        Self { catalog }
    }

    pub fn install(
        &self,
        catalog_url: &str,
        reference: &ProfileReference,
        options: &InstallOptions,
        writer: &dyn Writer,
    ) -> Result<InstallReport, InstallError> {
        tracing::info!(profile = %reference, "retrieving profile from catalog");
        let description = self.catalog.resolve(
            catalog_url,
            reference.catalog_name(),
            reference.profile_name(),
        )?;

        let subscription = build_subscription(&description, options);
        writer
            .output(&subscription)
            .map_err(InstallError::Output)?;

        tracing::info!(
            name = %subscription.metadata.name,
            namespace = %subscription.metadata.namespace,
            "generated profile subscription"
        );
        Ok(InstallReport {
            description,
            subscription,
        })
    }
}
