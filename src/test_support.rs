//! In-memory [`JiraApi`] used by handler tests
//!
//! Records every call so tests can assert on exactly what reached the
//! remote side.

use crate::client::{
    ApiError, ApiResult, AvatarUrls, IssueTypeSchemeProjects, IssueTypeSchemeRef, JiraApi, Page,
    Project, ProjectCreated, ProjectLead, ProjectPayload, ProjectUpdatePayload, Screen, Status,
    WorkflowScheme,
};
use crate::provider::ProviderContext;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetWorkflowScheme(i64),
    GetStatuses(Vec<String>),
    GetScreens(Vec<i64>, u32, u32),
    CreateProject(ProjectPayload),
    GetProject(String),
    UpdateProject(String, ProjectUpdatePayload),
    DeleteProject(String, bool),
    IssueTypeSchemeProjects(Vec<i64>, u32, u32),
    AssignIssueTypeScheme(String, String),
}

pub fn avatar_url(avatar_id: i64) -> String {
    format!(
        "https://example.atlassian.net/rest/api/3/universal_avatar/view/type/project/avatar/{}?size=xsmall",
        avatar_id
    )
}

pub fn association(scheme_id: &str, project_ids: &[&str]) -> IssueTypeSchemeProjects {
    IssueTypeSchemeProjects {
        issue_type_scheme: IssueTypeSchemeRef {
            id: scheme_id.to_string(),
            name: format!("Scheme {}", scheme_id),
            description: None,
            is_default: false,
        },
        project_ids: project_ids.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn project(id: &str, key: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        key: key.to_string(),
        name: name.to_string(),
        description: String::new(),
        lead: ProjectLead {
            account_id: "5b10a2844c20165700ede21g".to_string(),
            display_name: "Mia Krystof".to_string(),
        },
        project_type_key: "software".to_string(),
        url: String::new(),
        avatar_urls: AvatarUrls {
            x16: Some(avatar_url(10424)),
            ..Default::default()
        },
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::status(
        StatusCode::NOT_FOUND,
        format!("{{\"errorMessages\":[\"No {} could be found.\"]}}", what),
    )
}

/// Fake Jira backed by in-memory maps
pub struct FakeJira {
    pub calls: Mutex<Vec<Call>>,
    pub workflow_schemes: Vec<WorkflowScheme>,
    pub statuses: Vec<Status>,
    pub screens: Vec<Screen>,
    pub projects: Mutex<HashMap<String, Project>>,
    pub associations: Vec<IssueTypeSchemeProjects>,
    /// Every call fails with this error when set
    pub failure: Option<ApiError>,
    pub next_id: Mutex<i64>,
}

impl Default for FakeJira {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            workflow_schemes: Vec::new(),
            statuses: Vec::new(),
            screens: Vec::new(),
            projects: Mutex::new(HashMap::new()),
            associations: Vec::new(),
            failure: None,
            next_id: Mutex::new(10000),
        }
    }
}

impl FakeJira {
    pub fn with_project(self, project: Project) -> Self {
        self.projects
            .lock()
            .unwrap()
            .insert(project.id.clone(), project);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn context(self: &Arc<Self>) -> ProviderContext {
        ProviderContext::new(self.clone(), Duration::from_secs(5))
    }

    fn record(&self, call: Call) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl JiraApi for FakeJira {
    async fn get_workflow_scheme(&self, id: i64) -> ApiResult<WorkflowScheme> {
        self.record(Call::GetWorkflowScheme(id))?;
        self.workflow_schemes
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| not_found("workflow scheme"))
    }

    async fn get_statuses(&self, ids: &[String]) -> ApiResult<Vec<Status>> {
        self.record(Call::GetStatuses(ids.to_vec()))?;
        Ok(self
            .statuses
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn get_screens(
        &self,
        ids: &[i64],
        start_at: u32,
        max_results: u32,
    ) -> ApiResult<Page<Screen>> {
        self.record(Call::GetScreens(ids.to_vec(), start_at, max_results))?;
        let values: Vec<Screen> = self
            .screens
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect();
        Ok(Page {
            start_at,
            max_results,
            total: values.len() as u32,
            is_last: true,
            values,
        })
    }

    async fn create_project(&self, payload: &ProjectPayload) -> ApiResult<ProjectCreated> {
        self.record(Call::CreateProject(payload.clone()))?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };

        let mut created = project(&id.to_string(), &payload.key, &payload.name);
        created.description = payload.description.clone();
        created.project_type_key = payload.project_type_key.clone();
        created.url = payload.url.clone();
        if !payload.lead_account_id.is_empty() {
            created.lead.account_id = payload.lead_account_id.clone();
        }
        if payload.avatar_id != 0 {
            created.avatar_urls.x16 = Some(avatar_url(i64::from(payload.avatar_id)));
        }
        self.projects
            .lock()
            .unwrap()
            .insert(created.id.clone(), created);

        Ok(ProjectCreated {
            self_url: format!("https://example.atlassian.net/rest/api/3/project/{}", id),
            id,
            key: payload.key.clone(),
        })
    }

    async fn get_project(&self, id: &str) -> ApiResult<Project> {
        self.record(Call::GetProject(id.to_string()))?;
        self.projects
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("project"))
    }

    async fn update_project(
        &self,
        id: &str,
        payload: &ProjectUpdatePayload,
    ) -> ApiResult<Project> {
        self.record(Call::UpdateProject(id.to_string(), payload.clone()))?;
        let mut projects = self.projects.lock().unwrap();
        let existing = projects.get_mut(id).ok_or_else(|| not_found("project"))?;
        existing.key = payload.key.clone();
        existing.name = payload.name.clone();
        existing.description = payload.description.clone();
        existing.project_type_key = payload.project_type_key.clone();
        existing.url = payload.url.clone();
        if payload.avatar_id != 0 {
            existing.avatar_urls.x16 = Some(avatar_url(i64::from(payload.avatar_id)));
        }
        Ok(existing.clone())
    }

    async fn delete_project(&self, id: &str, enable_undo: bool) -> ApiResult<()> {
        self.record(Call::DeleteProject(id.to_string(), enable_undo))?;
        self.projects
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("project"))
    }

    async fn issue_type_scheme_projects(
        &self,
        project_ids: &[i64],
        start_at: u32,
        max_results: u32,
    ) -> ApiResult<Page<IssueTypeSchemeProjects>> {
        self.record(Call::IssueTypeSchemeProjects(
            project_ids.to_vec(),
            start_at,
            max_results,
        ))?;
        Ok(Page {
            start_at,
            max_results,
            total: self.associations.len() as u32,
            is_last: true,
            values: self.associations.clone(),
        })
    }

    async fn assign_issue_type_scheme(&self, scheme_id: &str, project_id: &str) -> ApiResult<()> {
        self.record(Call::AssignIssueTypeScheme(
            scheme_id.to_string(),
            project_id.to_string(),
        ))
    }
}
