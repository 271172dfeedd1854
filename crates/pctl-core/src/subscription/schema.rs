//! `ProfileSubscription` resource schema.
//!
//! Field order mirrors the serialized shape expected by cluster tooling:
//! keys are emitted alphabetically within each mapping.

use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = "weave.works/v1alpha1";
pub const KIND: &str = "ProfileSubscription";
pub const VALUES_KIND: &str = "ConfigMap";

/// Cluster-applicable subscription to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResource {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: SubscriptionSpec,
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Always serialized, as `null` when unset
    pub creation_timestamp: Option<String>,
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSpec {
    pub branch: String,

    #[serde(rename = "profileURL")]
    pub profile_url: String,

    #[serde(
        rename = "valuesFrom",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub values_from: Option<Vec<ValuesReference>>,
}

/// Reference to a config map holding values for the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesReference {
    pub kind: String,
    pub name: String,
    pub values_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {}

impl SubscriptionResource {
    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
