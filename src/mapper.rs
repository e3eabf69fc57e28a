//! Field mapping between typed records and Jira API payloads
//!
//! Pure functions, no I/O. Response-shape assumptions (non-empty lookups,
//! well-formed avatar URLs) are checked here and reported as errors.

use crate::client::{IssueTypeSchemeProjects, Project};
use crate::{ProviderError, Result};

/// Path segment of the avatar URL that carries the avatar id
const AVATAR_ID_SEGMENT: usize = 9;

/// Parse a numeric id attribute, rejecting anything that is not an integer
pub fn parse_numeric_id(attribute: &str, value: Option<&str>) -> Result<i64> {
    value
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| numeric_id_error(attribute))
}

/// Require a non-empty id attribute
pub fn require_id<'a>(attribute: &str, value: Option<&'a str>) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| numeric_id_error(attribute))
}

fn numeric_id_error(attribute: &str) -> ProviderError {
    ProviderError::validation(
        attribute,
        format!("Unable to parse value of \"{}\" attribute.", attribute),
        format!(
            "Value of \"{}\" attribute can only be a numeric string.",
            attribute
        ),
    )
}

/// Narrow an int64 attribute to the API's 32-bit representation
///
/// Unset attributes map to 0, which the payloads omit.
pub fn narrow_int(attribute: &str, value: Option<i64>) -> Result<i32> {
    match value {
        None => Ok(0),
        Some(v) => i32::try_from(v).map_err(|_| {
            ProviderError::validation(
                attribute,
                "Value Out of Range",
                format!(
                    "Value of \"{}\" attribute must fit in a 32-bit integer, got: {}",
                    attribute, v
                ),
            )
        }),
    }
}

/// Extract the avatar id from an avatar URL
///
/// Jira avatar URLs look like
/// `https://example.atlassian.net/rest/api/3/universal_avatar/view/type/project/avatar/10424?size=xsmall`;
/// the id is path segment 9, counting the empty segment before the leading `/`.
pub fn avatar_id_from_url(avatar_url: &str) -> Result<i64> {
    let parsed = url::Url::parse(avatar_url).map_err(|e| {
        ProviderError::UnexpectedResponse(format!("invalid avatar URL '{}': {}", avatar_url, e))
    })?;

    let segment = parsed
        .path()
        .split('/')
        .nth(AVATAR_ID_SEGMENT)
        .ok_or_else(|| {
            ProviderError::UnexpectedResponse(format!(
                "avatar URL '{}' has no avatar id segment",
                avatar_url
            ))
        })?;

    segment.parse().map_err(|_| {
        ProviderError::UnexpectedResponse(format!(
            "avatar URL '{}' has a non-numeric avatar id '{}'",
            avatar_url, segment
        ))
    })
}

/// Avatar id of a project, taken from its 16x16 avatar URL
pub fn project_avatar_id(project: &Project) -> Result<i64> {
    let avatar_url = project.avatar_urls.x16.as_deref().ok_or_else(|| {
        ProviderError::UnexpectedResponse(format!("project {} has no avatar URL", project.id))
    })?;
    avatar_id_from_url(avatar_url)
}

/// Find the issue type scheme whose project list contains `project_id`
pub fn issue_type_scheme_for_project(
    associations: &[IssueTypeSchemeProjects],
    project_id: i64,
) -> Option<i64> {
    let wanted = project_id.to_string();
    associations
        .iter()
        .find(|association| association.project_ids.iter().any(|id| *id == wanted))
        .and_then(|association| association.issue_type_scheme.id.parse().ok())
}

/// First element of a lookup that must return at least one match
pub fn first_match<T>(items: Vec<T>, entity: &str, id: &str) -> Result<T> {
    items.into_iter().next().ok_or_else(|| {
        ProviderError::UnexpectedResponse(format!("no {} found with id {}", entity, id))
    })
}
