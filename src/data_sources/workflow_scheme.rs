//! `atlassian_jira_workflow_scheme` data source

use super::DataSource;
use crate::mapper::parse_numeric_id;
use crate::provider::ProviderContext;
use crate::schema::{Attribute, Schema};
use crate::{ProviderError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const TYPE_SUFFIX: &str = "_jira_workflow_scheme";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSchemeModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub fn schema() -> Schema {
    Schema::new(0, "Jira Workflow Scheme Data Source")
        .with_attribute(
            "id",
            Attribute::required_string("The ID of the workflow scheme."),
        )
        .with_attribute(
            "name",
            Attribute::computed_string("The name of the workflow scheme."),
        )
        .with_attribute(
            "description",
            Attribute::computed_string("The description of the workflow scheme."),
        )
}

pub struct WorkflowSchemeDataSource {
    ctx: ProviderContext,
}

impl WorkflowSchemeDataSource {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    pub fn build(ctx: ProviderContext) -> Arc<dyn DataSource> {
        Arc::new(Self::new(ctx))
    }
}

#[async_trait]
impl DataSource for WorkflowSchemeDataSource {
    async fn read(&self, config: Value) -> Result<Value> {
        debug!("Reading workflow scheme data source");

        let mut state: WorkflowSchemeModel = serde_json::from_value(config)?;
        debug!(config = ?state, "Loaded workflow scheme config");

        let scheme_id = parse_numeric_id("id", state.id.as_deref())?;

        let scheme = self
            .ctx
            .client()
            .get_workflow_scheme(scheme_id)
            .await
            .map_err(|e| ProviderError::client("Unable to get Jira workflow scheme", &e))?;
        debug!(scheme = ?scheme, "Retrieved workflow scheme from API");

        state.name = Some(scheme.name);
        state.description = Some(scheme.description);

        Ok(serde_json::to_value(state)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::WorkflowScheme;
    use crate::test_support::{Call, FakeJira};
    use serde_json::json;

    fn fake() -> Arc<FakeJira> {
        Arc::new(FakeJira {
            workflow_schemes: vec![WorkflowScheme {
                id: 101010,
                name: "Example workflow scheme".to_string(),
                description: "The description of the example workflow scheme.".to_string(),
            }],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_read_maps_fields() {
        let fake = fake();
        let source = WorkflowSchemeDataSource::new(fake.context());

        let state: WorkflowSchemeModel =
            serde_json::from_value(source.read(json!({"id": "101010"})).await.unwrap()).unwrap();

        assert_eq!(state.id.as_deref(), Some("101010"));
        assert_eq!(state.name.as_deref(), Some("Example workflow scheme"));
        assert_eq!(
            state.description.as_deref(),
            Some("The description of the example workflow scheme.")
        );
        assert_eq!(fake.calls(), vec![Call::GetWorkflowScheme(101010)]);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected_before_remote_call() {
        let fake = fake();
        let source = WorkflowSchemeDataSource::new(fake.context());

        let err = source.read(json!({"id": "classic"})).await.unwrap_err();

        let diag = err.to_diagnostic();
        assert_eq!(diag.attribute.as_deref(), Some("id"));
        assert_eq!(diag.summary, "Unable to parse value of \"id\" attribute.");
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_scheme_is_client_error() {
        let fake = fake();
        let source = WorkflowSchemeDataSource::new(fake.context());

        let err = source.read(json!({"id": "7"})).await.unwrap_err();

        assert!(matches!(err, ProviderError::Client { .. }));
        assert!(err.to_string().contains("Unable to get Jira workflow scheme"));
    }
}
