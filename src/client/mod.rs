//! Jira REST API client
//!
//! [`JiraApi`] names every remote call the handlers make. [`JiraClient`] is
//! the reqwest implementation talking to `{url}/rest/api/3`; tests swap in
//! their own implementations.

mod http;
pub mod models;

pub use http::JiraClient;
pub use models::{
    AvatarUrls, IssueTypeSchemeProjects, IssueTypeSchemeRef, Page, Project, ProjectCreated,
    ProjectLead, ProjectPayload, ProjectUpdatePayload, Screen, Status, WorkflowScheme,
};

use async_trait::async_trait;
use reqwest::StatusCode;

/// Result of a remote call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error returned by the remote API, with the raw response body when one was received
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<StatusCode>,
    pub body: Option<String>,
}

impl ApiError {
    /// Error for a non-success HTTP response
    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            message: format!("HTTP {}", status),
            status: Some(status),
            body: Some(body.into()),
        }
    }

    /// Error raised before any response was received
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status: err.status(),
            body: None,
        }
    }
}

/// Remote operations used by the entity handlers
#[async_trait]
pub trait JiraApi: Send + Sync {
    /// `GET /workflowscheme/{id}`
    async fn get_workflow_scheme(&self, id: i64) -> ApiResult<WorkflowScheme>;

    /// `GET /statuses?id=..`
    async fn get_statuses(&self, ids: &[String]) -> ApiResult<Vec<Status>>;

    /// `GET /screens?id=..&startAt=..&maxResults=..`
    async fn get_screens(
        &self,
        ids: &[i64],
        start_at: u32,
        max_results: u32,
    ) -> ApiResult<Page<Screen>>;

    /// `POST /project`
    async fn create_project(&self, payload: &ProjectPayload) -> ApiResult<ProjectCreated>;

    /// `GET /project/{id}`
    async fn get_project(&self, id: &str) -> ApiResult<Project>;

    /// `PUT /project/{id}`
    async fn update_project(&self, id: &str, payload: &ProjectUpdatePayload)
        -> ApiResult<Project>;

    /// `DELETE /project/{id}?enableUndo=..`
    async fn delete_project(&self, id: &str, enable_undo: bool) -> ApiResult<()>;

    /// `GET /issuetypescheme/project?projectId=..`
    async fn issue_type_scheme_projects(
        &self,
        project_ids: &[i64],
        start_at: u32,
        max_results: u32,
    ) -> ApiResult<Page<IssueTypeSchemeProjects>>;

    /// `PUT /issuetypescheme/project`
    async fn assign_issue_type_scheme(&self, scheme_id: &str, project_id: &str) -> ApiResult<()>;
}
