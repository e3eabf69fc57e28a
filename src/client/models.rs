//! Request and response payloads of the Jira REST API (v3)

use serde::{Deserialize, Serialize};

/// Paginated response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(rename = "startAt", default)]
    pub start_at: u32,
    #[serde(rename = "maxResults", default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(rename = "isLast", default)]
    pub is_last: bool,
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowScheme {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "statusCategory", default)]
    pub status_category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screen {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /project`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(rename = "avatarId", skip_serializing_if = "is_zero", default)]
    pub avatar_id: i32,
    #[serde(rename = "fieldConfigurationScheme", skip_serializing_if = "is_zero", default)]
    pub field_configuration_scheme: i32,
    #[serde(rename = "issueTypeScheme", skip_serializing_if = "is_zero", default)]
    pub issue_type_scheme: i32,
    #[serde(rename = "issueTypeScreenScheme", skip_serializing_if = "is_zero", default)]
    pub issue_type_screen_scheme: i32,
    #[serde(rename = "workflowScheme", skip_serializing_if = "is_zero", default)]
    pub workflow_scheme: i32,
    #[serde(rename = "leadAccountId", skip_serializing_if = "String::is_empty", default)]
    pub lead_account_id: String,
    #[serde(rename = "projectTypeKey", skip_serializing_if = "String::is_empty", default)]
    pub project_type_key: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub url: String,
}

/// Body of `PUT /project/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUpdatePayload {
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(rename = "avatarId", skip_serializing_if = "is_zero", default)]
    pub avatar_id: i32,
    #[serde(rename = "projectTypeKey", skip_serializing_if = "String::is_empty", default)]
    pub project_type_key: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub url: String,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

/// Response of `POST /project`; the id is numeric here, unlike `GET`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreated {
    #[serde(rename = "self", default)]
    pub self_url: String,
    pub id: i64,
    pub key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectLead {
    #[serde(rename = "accountId", default)]
    pub account_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvatarUrls {
    #[serde(rename = "16x16", default)]
    pub x16: Option<String>,
    #[serde(rename = "24x24", default)]
    pub x24: Option<String>,
    #[serde(rename = "32x32", default)]
    pub x32: Option<String>,
    #[serde(rename = "48x48", default)]
    pub x48: Option<String>,
}

/// Response of `GET /project/{id}` and `PUT /project/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lead: ProjectLead,
    #[serde(rename = "projectTypeKey", default)]
    pub project_type_key: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "avatarUrls", default)]
    pub avatar_urls: AvatarUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTypeSchemeRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

/// One issue type scheme together with the projects using it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTypeSchemeProjects {
    #[serde(rename = "issueTypeScheme")]
    pub issue_type_scheme: IssueTypeSchemeRef,
    #[serde(rename = "projectIds", default)]
    pub project_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AssignIssueTypeScheme<'a> {
    #[serde(rename = "issueTypeSchemeId")]
    pub issue_type_scheme_id: &'a str,
    #[serde(rename = "projectId")]
    pub project_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_payload_skips_unset_fields() {
        let payload = ProjectPayload {
            key: "TES".to_string(),
            name: "Test Project".to_string(),
            project_type_key: "software".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "key": "TES",
                "name": "Test Project",
                "projectTypeKey": "software"
            })
        );
    }

    #[test]
    fn test_project_deserializes_with_missing_optionals() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": "10000",
            "key": "EX",
            "name": "Example"
        }))
        .unwrap();

        assert_eq!(project.id, "10000");
        assert!(project.description.is_empty());
        assert!(project.avatar_urls.x16.is_none());
        assert!(project.lead.account_id.is_empty());
    }

    #[test]
    fn test_issue_type_scheme_projects_deserialize() {
        let page: Page<IssueTypeSchemeProjects> = serde_json::from_value(serde_json::json!({
            "isLast": true,
            "maxResults": 1,
            "startAt": 0,
            "total": 1,
            "values": [{
                "issueTypeScheme": {
                    "id": "10000",
                    "name": "Default Issue Type Scheme",
                    "isDefault": true
                },
                "projectIds": ["10000", "10001"]
            }]
        }))
        .unwrap();

        assert_eq!(page.values.len(), 1);
        assert!(page.values[0].issue_type_scheme.is_default);
        assert_eq!(page.values[0].project_ids, vec!["10000", "10001"]);
    }
}
