//! reqwest implementation of [`JiraApi`]

use super::models::AssignIssueTypeScheme;
use super::{
    ApiError, ApiResult, IssueTypeSchemeProjects, JiraApi, Page, Project, ProjectCreated,
    ProjectPayload, ProjectUpdatePayload, Screen, Status, WorkflowScheme,
};
use crate::config::ProviderConfig;
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout for single entity fetches
const GET_TIMEOUT: Duration = Duration::from_secs(10);
/// Per-request timeout for create/update/delete operations
const WRITE_TIMEOUT: Duration = Duration::from_secs(15);

enum Auth {
    Basic { username: String, token: String },
    Bearer(String),
    Anonymous,
}

/// Jira Cloud REST client
pub struct JiraClient {
    client: Client,
    base_url: String,
    auth: Auth,
    request_timeout: Duration,
}

impl JiraClient {
    /// Create a new client from provider configuration
    ///
    /// Returns an error if the configuration has no URL or the HTTP client
    /// cannot be created.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| crate::ProviderError::Config("url is required".to_string()))?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let auth = match (config.username.clone(), config.token()) {
            (Some(username), Some(token)) => Auth::Basic { username, token },
            (None, Some(token)) => Auth::Bearer(token),
            _ => Auth::Anonymous,
        };

        Ok(Self {
            client,
            base_url: format!("{}/rest/api/3", url.trim_end_matches('/')),
            auth,
            request_timeout: config.request_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(reqwest::header::ACCEPT, "application/json");
        match &self.auth {
            Auth::Basic { username, token } => request.basic_auth(username, Some(token)),
            Auth::Bearer(token) => request.bearer_auth(token),
            Auth::Anonymous => request,
        }
    }

    /// Send a request bounded by the tighter of the call's own timeout and
    /// the configured request timeout
    async fn send(&self, request: RequestBuilder, timeout: Duration) -> ApiResult<Response> {
        let response = self
            .authorize(request)
            .timeout(timeout.min(self.request_timeout))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response),
            status => {
                let error_body = response.text().await.unwrap_or_default();
                Err(ApiError::status(status, error_body))
            }
        }
    }

    async fn json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> ApiResult<T> {
        let response = self.send(request, timeout).await?;
        let status = response.status();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError {
            message: format!("failed to decode response: {}", e),
            status: Some(status),
            body: Some(body),
        })
    }
}

#[async_trait]
impl JiraApi for JiraClient {
    async fn get_workflow_scheme(&self, id: i64) -> ApiResult<WorkflowScheme> {
        let url = format!("{}/workflowscheme/{}", self.base_url, id);

        debug!(id = id, "Fetching Jira workflow scheme");

        self.json(self.client.get(&url), GET_TIMEOUT).await
    }

    async fn get_statuses(&self, ids: &[String]) -> ApiResult<Vec<Status>> {
        let url = format!("{}/statuses", self.base_url);
        let params: Vec<(&str, &str)> = ids.iter().map(|id| ("id", id.as_str())).collect();

        debug!(ids = ?ids, "Fetching Jira statuses");

        self.json(self.client.get(&url).query(&params), GET_TIMEOUT)
            .await
    }

    async fn get_screens(
        &self,
        ids: &[i64],
        start_at: u32,
        max_results: u32,
    ) -> ApiResult<Page<Screen>> {
        let url = format!("{}/screens", self.base_url);
        let mut params: Vec<(&str, String)> = ids.iter().map(|id| ("id", id.to_string())).collect();
        params.push(("startAt", start_at.to_string()));
        params.push(("maxResults", max_results.to_string()));

        debug!(ids = ?ids, start_at = start_at, max_results = max_results, "Fetching Jira screens");

        self.json(self.client.get(&url).query(&params), GET_TIMEOUT)
            .await
    }

    async fn create_project(&self, payload: &ProjectPayload) -> ApiResult<ProjectCreated> {
        let url = format!("{}/project", self.base_url);

        debug!(key = %payload.key, "Creating Jira project");

        self.json(self.client.post(&url).json(payload), WRITE_TIMEOUT)
            .await
    }

    async fn get_project(&self, id: &str) -> ApiResult<Project> {
        let url = format!("{}/project/{}", self.base_url, id);

        debug!(id = %id, "Fetching Jira project");

        self.json(self.client.get(&url), GET_TIMEOUT).await
    }

    async fn update_project(
        &self,
        id: &str,
        payload: &ProjectUpdatePayload,
    ) -> ApiResult<Project> {
        let url = format!("{}/project/{}", self.base_url, id);

        debug!(id = %id, "Updating Jira project");

        self.json(self.client.put(&url).json(payload), WRITE_TIMEOUT)
            .await
    }

    async fn delete_project(&self, id: &str, enable_undo: bool) -> ApiResult<()> {
        let url = format!("{}/project/{}", self.base_url, id);

        debug!(id = %id, enable_undo = enable_undo, "Deleting Jira project");

        let request = self
            .client
            .delete(&url)
            .query(&[("enableUndo", enable_undo.to_string())]);
        self.send(request, WRITE_TIMEOUT).await?;
        Ok(())
    }

    async fn issue_type_scheme_projects(
        &self,
        project_ids: &[i64],
        start_at: u32,
        max_results: u32,
    ) -> ApiResult<Page<IssueTypeSchemeProjects>> {
        let url = format!("{}/issuetypescheme/project", self.base_url);
        let mut params: Vec<(&str, String)> = project_ids
            .iter()
            .map(|id| ("projectId", id.to_string()))
            .collect();
        params.push(("startAt", start_at.to_string()));
        params.push(("maxResults", max_results.to_string()));

        debug!(project_ids = ?project_ids, "Fetching Jira issue type scheme associations");

        self.json(self.client.get(&url).query(&params), GET_TIMEOUT)
            .await
    }

    async fn assign_issue_type_scheme(&self, scheme_id: &str, project_id: &str) -> ApiResult<()> {
        let url = format!("{}/issuetypescheme/project", self.base_url);
        let body = AssignIssueTypeScheme {
            issue_type_scheme_id: scheme_id,
            project_id,
        };

        debug!(scheme_id = %scheme_id, project_id = %project_id, "Assigning Jira issue type scheme");

        self.send(self.client.put(&url).json(&body), WRITE_TIMEOUT)
            .await?;
        Ok(())
    }
}
