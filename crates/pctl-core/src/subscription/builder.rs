//! Builds subscription resources from catalog profiles.

use crate::catalog::ProfileDescription;

use super::schema::{
    API_VERSION, KIND, ObjectMeta, SubscriptionResource, SubscriptionSpec, SubscriptionStatus,
    VALUES_KIND, ValuesReference,
};

/// Default namespace for generated subscriptions
pub const DEFAULT_NAMESPACE: &str = "default";

/// Default subscription name
pub const DEFAULT_SUBSCRIPTION_NAME: &str = "pctl-profile";

/// Default profile branch
pub const DEFAULT_BRANCH: &str = "main";

/// Caller-supplied settings for a generated subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Namespace the subscription is created in
    pub namespace: String,
    /// Name of the subscription resource
    pub subscription_name: String,
    /// Branch of the profile repository to track
    pub branch: String,
    /// Key inside the values config map, if any
    pub values_key: Option<String>,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            subscription_name: DEFAULT_SUBSCRIPTION_NAME.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            values_key: None,
        }
    }
}

impl InstallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_subscription_name(mut self, name: impl Into<String>) -> Self {
        self.subscription_name = name.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_values_key(mut self, key: impl Into<String>) -> Self {
        self.values_key = Some(key.into());
        self
    }

    /// Name of the config map holding values for this subscription.
    pub fn values_config_map_name(&self) -> String {
        format!("{}-values", self.subscription_name)
    }
}

/// Map a profile description and install options to a subscription.
///
/// `valuesFrom` is only populated when a non-empty values key was supplied.
pub fn build_subscription(
    description: &ProfileDescription,
    options: &InstallOptions,
) -> SubscriptionResource {
    let values_from = options
        .values_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .map(|key| {
            vec![ValuesReference {
                kind: VALUES_KIND.to_string(),
                name: options.values_config_map_name(),
                values_key: key.to_string(),
            }]
        });

    SubscriptionResource {
        api_version: API_VERSION.to_string(),
        kind: KIND.to_string(),
        metadata: ObjectMeta {
            creation_timestamp: None,
            name: options.subscription_name.clone(),
            namespace: options.namespace.clone(),
        },
        spec: SubscriptionSpec {
            branch: options.branch.clone(),
            profile_url: description.url.clone(),
            values_from,
        },
        status: SubscriptionStatus::default(),
    }
}
