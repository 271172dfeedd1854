//! Profile subscription resources.

mod builder;
mod schema;

pub use builder::{
    DEFAULT_BRANCH, DEFAULT_NAMESPACE, DEFAULT_SUBSCRIPTION_NAME, InstallOptions,
    build_subscription,
};
pub use schema::{
    API_VERSION, KIND, ObjectMeta, SubscriptionResource, SubscriptionSpec, SubscriptionStatus,
    VALUES_KIND, ValuesReference,
};
