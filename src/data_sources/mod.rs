//! Read-only data sources
//!
//! A [`DataSource`] looks an entity up by the id given in configuration and
//! returns the fully populated record. Nothing is cached; every read hits
//! the remote API.

pub mod issue_screen;
pub mod status;
pub mod workflow_scheme;

use crate::provider::ProviderContext;
use crate::schema::Schema;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub use issue_screen::{IssueScreenDataSource, IssueScreenModel};
pub use status::{StatusDataSource, StatusModel};
pub use workflow_scheme::{WorkflowSchemeDataSource, WorkflowSchemeModel};

/// Read-only lookup of a remote entity
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Resolve the configured id into a full record
    async fn read(&self, config: Value) -> Result<Value>;
}

/// Registration entry for a data source type
pub struct DataSourceRegistration {
    /// Appended to the provider type name, e.g. `_jira_status`
    pub type_suffix: &'static str,
    pub schema: fn() -> Schema,
    pub build: fn(ProviderContext) -> Arc<dyn DataSource>,
}

/// Every data source this provider offers
pub fn registrations() -> Vec<DataSourceRegistration> {
    vec![
        DataSourceRegistration {
            type_suffix: issue_screen::TYPE_SUFFIX,
            schema: issue_screen::schema,
            build: IssueScreenDataSource::build,
        },
        DataSourceRegistration {
            type_suffix: status::TYPE_SUFFIX,
            schema: status::schema,
            build: StatusDataSource::build,
        },
        DataSourceRegistration {
            type_suffix: workflow_scheme::TYPE_SUFFIX,
            schema: workflow_scheme::schema,
            build: WorkflowSchemeDataSource::build,
        },
    ]
}
