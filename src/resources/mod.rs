//! Managed resources
//!
//! A [`Resource`] exposes the full create/read/update/delete lifecycle. The
//! host decides which operation to run by diffing prior and desired state;
//! the handler only performs the remote interaction for that operation.

pub mod project;

use crate::provider::ProviderContext;
use crate::schema::Schema;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub use project::{ProjectModel, ProjectResource};

/// Lifecycle operations of a managed entity
///
/// Records are exchanged as JSON objects keyed by attribute name. A
/// returned error means nothing is persisted for that operation.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Create the remote entity from the planned record, returning the new state
    async fn create(&self, plan: Value) -> Result<Value>;

    /// Refresh the persisted state from the remote entity
    async fn read(&self, state: Value) -> Result<Value>;

    /// Apply the planned record to the entity identified by the prior state
    async fn update(&self, plan: Value, state: Value) -> Result<Value>;

    /// Delete the entity identified by the state
    async fn delete(&self, state: Value) -> Result<()>;

    /// Seed a state record from an import id; the host follows with `read`
    fn import_state(&self, id: &str) -> Result<Value>;
}

/// Registration entry for a resource type
pub struct ResourceRegistration {
    /// Appended to the provider type name, e.g. `_jira_project`
    pub type_suffix: &'static str,
    pub schema: fn() -> Schema,
    pub build: fn(ProviderContext) -> Arc<dyn Resource>,
}

/// Every resource this provider manages
pub fn registrations() -> Vec<ResourceRegistration> {
    vec![ResourceRegistration {
        type_suffix: project::TYPE_SUFFIX,
        schema: project::schema,
        build: ProjectResource::build,
    }]
}
