//! Catalog service access.
//!
//! A catalog exposes profile descriptions over HTTP at
//! `<catalog-url>/profiles/<catalog>/<profile>`.

mod client;
mod schema;

pub use client::{CatalogClient, CatalogError, profile_url};
pub use schema::ProfileDescription;
