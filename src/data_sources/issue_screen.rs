//! `atlassian_jira_issue_screen` data source

use super::DataSource;
use crate::mapper::{first_match, parse_numeric_id};
use crate::provider::ProviderContext;
use crate::schema::{Attribute, Schema};
use crate::{ProviderError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const TYPE_SUFFIX: &str = "_jira_issue_screen";

/// Page size of the screen lookup
const SCREEN_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueScreenModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub fn schema() -> Schema {
    Schema::new(0, "Jira Issue Screen Data Source")
        .with_attribute("id", Attribute::required_string("The ID of the screen."))
        .with_attribute(
            "name",
            Attribute::computed_string(
                "The name of the screen. The name must be unique. The maximum length is 255 characters.",
            ),
        )
        .with_attribute(
            "description",
            Attribute::computed_string(
                "The description of the screen. The maximum length is 255 characters.",
            ),
        )
}

pub struct IssueScreenDataSource {
    ctx: ProviderContext,
}

impl IssueScreenDataSource {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    pub fn build(ctx: ProviderContext) -> Arc<dyn DataSource> {
        Arc::new(Self::new(ctx))
    }
}

#[async_trait]
impl DataSource for IssueScreenDataSource {
    async fn read(&self, config: Value) -> Result<Value> {
        debug!("Reading issue screen data source");

        let mut state: IssueScreenModel = serde_json::from_value(config)?;
        debug!(config = ?state, "Loaded issue screen config");

        let screen_id = parse_numeric_id("id", state.id.as_deref())?;

        let page = self
            .ctx
            .client()
            .get_screens(&[screen_id], 0, SCREEN_PAGE_SIZE)
            .await
            .map_err(|e| ProviderError::client("Unable to get issue screen", &e))?;
        debug!(count = page.values.len(), "Retrieved issue screens from API");

        let screen = first_match(page.values, "issue screen", &screen_id.to_string())?;
        state.name = Some(screen.name);
        state.description = Some(screen.description);

        Ok(serde_json::to_value(state)?)
    }
}
