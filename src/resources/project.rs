//! `atlassian_jira_project` resource

use super::Resource;
use crate::client::{ProjectPayload, ProjectUpdatePayload};
use crate::mapper::{
    issue_type_scheme_for_project, narrow_int, parse_numeric_id, project_avatar_id, require_id,
};
use crate::provider::ProviderContext;
use crate::schema::{Attribute, PlanModifier, Schema, Validator};
use crate::{ProviderError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

pub const TYPE_SUFFIX: &str = "_jira_project";

/// Maximum length of a project key
const MAX_KEY_LENGTH: usize = 10;

/// Persisted record of a Jira project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub avatar_id: Option<i64>,
    #[serde(default)]
    pub field_configuration_scheme: Option<i64>,
    #[serde(default)]
    pub issue_type_scheme: Option<i64>,
    #[serde(default)]
    pub issue_type_screen_scheme: Option<i64>,
    #[serde(default)]
    pub workflow_scheme: Option<i64>,
    #[serde(default)]
    pub lead_account_id: Option<String>,
    #[serde(default)]
    pub project_type_key: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ProjectModel {
    fn create_payload(&self) -> Result<ProjectPayload> {
        Ok(ProjectPayload {
            key: self.key.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            avatar_id: narrow_int("avatar_id", self.avatar_id)?,
            field_configuration_scheme: narrow_int(
                "field_configuration_scheme",
                self.field_configuration_scheme,
            )?,
            issue_type_scheme: narrow_int("issue_type_scheme", self.issue_type_scheme)?,
            issue_type_screen_scheme: narrow_int(
                "issue_type_screen_scheme",
                self.issue_type_screen_scheme,
            )?,
            workflow_scheme: narrow_int("workflow_scheme", self.workflow_scheme)?,
            lead_account_id: self.lead_account_id.clone().unwrap_or_default(),
            project_type_key: self.project_type_key.clone().unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
        })
    }

    fn update_payload(&self) -> Result<ProjectUpdatePayload> {
        Ok(ProjectUpdatePayload {
            key: self.key.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            avatar_id: narrow_int("avatar_id", self.avatar_id)?,
            project_type_key: self.project_type_key.clone().unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
        })
    }
}

pub fn schema() -> Schema {
    Schema::new(1, "Jira Project Resource")
        .with_attribute(
            "id",
            Attribute::computed_string("The ID of the project.")
                .with_plan_modifier(PlanModifier::UseStateForUnknown),
        )
        .with_attribute(
            "key",
            Attribute::required_string(
                "Project keys must be unique and start with an uppercase letter followed by one or more uppercase alphanumeric characters. The maximum length is 10 characters.",
            )
            .with_validator(Validator::LengthAtMost {
                max: MAX_KEY_LENGTH,
            }),
        )
        .with_attribute("name", Attribute::required_string("The name of the project."))
        .with_attribute(
            "description",
            Attribute::optional_string("A brief description of the project.")
                .with_computed()
                .with_plan_modifier(PlanModifier::DefaultString {
                    value: String::new(),
                }),
        )
        .with_attribute(
            "avatar_id",
            Attribute::optional_int64("An integer value for the project's avatar."),
        )
        .with_attribute(
            "field_configuration_scheme",
            Attribute::optional_int64("The ID of the field configuration scheme for the project."),
        )
        .with_attribute(
            "issue_type_scheme",
            Attribute::optional_int64("The ID of the issue type scheme for the project. If you specify the issue type scheme you cannot specify the project template key."),
        )
        .with_attribute(
            "issue_type_screen_scheme",
            Attribute::optional_int64("The ID of the issue type screen scheme for the project. If you specify the issue type screen scheme you cannot specify the project template key."),
        )
        .with_attribute(
            "workflow_scheme",
            Attribute::optional_int64("The ID of the workflow scheme for the project. If you specify the workflow scheme you cannot specify the project template key."),
        )
        .with_attribute(
            "lead_account_id",
            Attribute::optional_string("The account ID of the project lead.").with_computed(),
        )
        .with_attribute(
            "project_type_key",
            Attribute::optional_string("The project type, which defines the application-specific feature set. Valid values: software, service_desk, business")
                .with_computed(),
        )
        .with_attribute(
            "url",
            Attribute::optional_string("A link to information about this project, such as project documentation.")
                .with_computed()
                .with_plan_modifier(PlanModifier::DefaultString {
                    value: String::new(),
                }),
        )
}

/// Full lifecycle handler for Jira projects
pub struct ProjectResource {
    ctx: ProviderContext,
}

impl ProjectResource {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    pub fn build(ctx: ProviderContext) -> Arc<dyn Resource> {
        Arc::new(Self::new(ctx))
    }
}

#[async_trait]
impl Resource for ProjectResource {
    async fn create(&self, plan: Value) -> Result<Value> {
        debug!("Creating project");

        let mut plan: ProjectModel = serde_json::from_value(plan)?;
        debug!(plan = ?plan, "Loaded project plan");

        let payload = plan.create_payload()?;
        let created = self
            .ctx
            .client()
            .create_project(&payload)
            .await
            .map_err(|e| ProviderError::client("Unable to create project", &e))?;
        info!(id = created.id, key = %created.key, "Created project");

        plan.id = Some(created.id.to_string());

        debug!(state = ?plan, "Storing project into the state");
        Ok(serde_json::to_value(plan)?)
    }

    async fn read(&self, state: Value) -> Result<Value> {
        debug!("Reading project resource");

        let mut state: ProjectModel = serde_json::from_value(state)?;
        debug!(state = ?state, "Loaded project from state");

        let project_id = require_id("id", state.id.as_deref())?.to_string();
        let numeric_id = parse_numeric_id("id", Some(&project_id))?;

        let project = self
            .ctx
            .client()
            .get_project(&project_id)
            .await
            .map_err(|e| ProviderError::client("Unable to get project", &e))?;
        debug!(id = %project.id, "Retrieved project from API");

        state.avatar_id = Some(project_avatar_id(&project)?);
        state.id = Some(project.id);
        state.key = Some(project.key);
        state.name = Some(project.name);
        state.description = Some(project.description);
        state.lead_account_id = Some(project.lead.account_id);
        state.project_type_key = Some(project.project_type_key);
        state.url = Some(project.url);

        let associations = self
            .ctx
            .client()
            .issue_type_scheme_projects(&[numeric_id], 0, 1)
            .await
            .map_err(|e| {
                ProviderError::client("Unable to get issue type schemes for project", &e)
            })?;

        match issue_type_scheme_for_project(&associations.values, numeric_id) {
            Some(scheme_id) => state.issue_type_scheme = Some(scheme_id),
            None => debug!(id = numeric_id, "No issue type scheme association for project"),
        }

        debug!(state = ?state, "Storing project into the state");
        Ok(serde_json::to_value(state)?)
    }

    async fn update(&self, plan: Value, state: Value) -> Result<Value> {
        debug!("Updating project resource");

        let plan: ProjectModel = serde_json::from_value(plan)?;
        debug!(plan = ?plan, "Loaded project plan");

        let state: ProjectModel = serde_json::from_value(state)?;
        debug!(state = ?state, "Loaded project from state");

        let project_id = require_id("id", state.id.as_deref())?;
        let payload = plan.update_payload()?;

        let updated = self
            .ctx
            .client()
            .update_project(project_id, &payload)
            .await
            .map_err(|e| ProviderError::client("Unable to update project", &e))?;
        info!(id = %updated.id, key = %updated.key, "Updated project");

        match plan.issue_type_scheme {
            Some(scheme_id) => {
                self.ctx
                    .client()
                    .assign_issue_type_scheme(&scheme_id.to_string(), &updated.id)
                    .await
                    .map_err(|e| {
                        ProviderError::client("Unable to assign issue type scheme to project", &e)
                    })?;
                debug!(scheme_id = scheme_id, "Assigned issue type scheme to project");
            }
            None => debug!("No issue type scheme planned, skipping assignment"),
        }

        let avatar_id = project_avatar_id(&updated)?;

        let result = ProjectModel {
            id: Some(updated.id),
            key: Some(updated.key),
            name: Some(updated.name),
            description: Some(updated.description),
            avatar_id: Some(avatar_id),
            field_configuration_scheme: plan.field_configuration_scheme,
            issue_type_scheme: plan.issue_type_scheme,
            issue_type_screen_scheme: plan.issue_type_screen_scheme,
            workflow_scheme: plan.workflow_scheme,
            lead_account_id: Some(updated.lead.account_id),
            project_type_key: Some(updated.project_type_key),
            url: Some(updated.url),
        };

        debug!(state = ?result, "Storing project into the state");
        Ok(serde_json::to_value(result)?)
    }

    async fn delete(&self, state: Value) -> Result<()> {
        debug!("Deleting project resource");

        let state: ProjectModel = serde_json::from_value(state)?;
        let project_id = require_id("id", state.id.as_deref())?;

        self.ctx
            .client()
            .delete_project(project_id, false)
            .await
            .map_err(|e| ProviderError::client("Unable to delete project", &e))?;
        info!(id = %project_id, "Deleted project");

        Ok(())
    }

    fn import_state(&self, id: &str) -> Result<Value> {
        let state = ProjectModel {
            id: Some(id.to_string()),
            ..Default::default()
        };
        Ok(serde_json::to_value(state)?)
    }
}
