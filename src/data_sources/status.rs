//! `atlassian_jira_status` data source

use super::DataSource;
use crate::mapper::{first_match, require_id};
use crate::provider::ProviderContext;
use crate::schema::{Attribute, Schema};
use crate::{ProviderError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const TYPE_SUFFIX: &str = "_jira_status";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

pub fn schema() -> Schema {
    Schema::new(0, "Jira Status Data Source")
        .with_attribute("id", Attribute::required_string("The ID of the status."))
        .with_attribute(
            "name",
            Attribute::computed_string(
                "The name of the status. The name must be unique. The maximum length is 255 characters.",
            ),
        )
        .with_attribute(
            "description",
            Attribute::computed_string(
                "The description of the status. The maximum length is 255 characters.",
            ),
        )
        .with_attribute(
            "category",
            Attribute::computed_string("The category of the status."),
        )
}

pub struct StatusDataSource {
    ctx: ProviderContext,
}

impl StatusDataSource {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    pub fn build(ctx: ProviderContext) -> Arc<dyn DataSource> {
        Arc::new(Self::new(ctx))
    }
}

#[async_trait]
impl DataSource for StatusDataSource {
    async fn read(&self, config: Value) -> Result<Value> {
        debug!("Reading status data source");

        let mut state: StatusModel = serde_json::from_value(config)?;
        debug!(config = ?state, "Loaded status config");

        let status_id = require_id("id", state.id.as_deref())?.to_string();

        let statuses = self
            .ctx
            .client()
            .get_statuses(std::slice::from_ref(&status_id))
            .await
            .map_err(|e| ProviderError::client("Unable to get Jira status", &e))?;
        debug!(count = statuses.len(), "Retrieved statuses from API");

        let status = first_match(statuses, "status", &status_id)?;
        state.name = Some(status.name);
        state.description = Some(status.description);
        state.category = Some(status.status_category);

        Ok(serde_json::to_value(state)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Status;
    use crate::test_support::{Call, FakeJira};
    use serde_json::json;

    fn fake() -> Arc<FakeJira> {
        Arc::new(FakeJira {
            statuses: vec![
                Status {
                    id: "1".to_string(),
                    name: "Open".to_string(),
                    description: "The issue is open and ready for the assignee to start work on it.".to_string(),
                    status_category: "TODO".to_string(),
                },
                Status {
                    id: "3".to_string(),
                    name: "In Progress".to_string(),
                    description: "This issue is being actively worked on.".to_string(),
                    status_category: "IN_PROGRESS".to_string(),
                },
            ],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_read_maps_fields() {
        let fake = fake();
        let source = StatusDataSource::new(fake.context());

        let state: StatusModel =
            serde_json::from_value(source.read(json!({"id": "3"})).await.unwrap()).unwrap();

        assert_eq!(state.name.as_deref(), Some("In Progress"));
        assert_eq!(
            state.description.as_deref(),
            Some("This issue is being actively worked on.")
        );
        assert_eq!(state.category.as_deref(), Some("IN_PROGRESS"));
        assert_eq!(fake.calls(), vec![Call::GetStatuses(vec!["3".to_string()])]);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_passed_through() {
        let fake = fake();
        let source = StatusDataSource::new(fake.context());

        let err = source.read(json!({"id": "done"})).await.unwrap_err();

        // No numeric parsing: the lookup happens and finds nothing
        assert!(matches!(err, ProviderError::UnexpectedResponse(_)));
        assert_eq!(fake.calls(), vec![Call::GetStatuses(vec!["done".to_string()])]);
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let fake = fake();
        let source = StatusDataSource::new(fake.context());

        let err = source.read(json!({"id": ""})).await.unwrap_err();

        assert!(matches!(err, ProviderError::Validation { .. }));
        assert!(fake.calls().is_empty());
    }
}
