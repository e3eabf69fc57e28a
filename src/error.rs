//! Error types for the Atlassian provider
//!
//! Every handler operation returns [`Result`]. Errors are converted into
//! [`Diagnostic`]s (a short summary plus a detail string, optionally
//! attributed to a configuration attribute) before being handed to the host.

use crate::client::ApiError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Error type for provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Local validation failure, rejected before any remote call
    #[error("{summary}: {detail}")]
    Validation {
        attribute: String,
        summary: String,
        detail: String,
    },

    /// The remote API returned an error or could not be reached
    #[error("{summary}: {detail}")]
    Client { summary: String, detail: String },

    /// The remote API answered with a shape the handler cannot use
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Provider configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation was dispatched before `configure`
    #[error("Provider has not been configured")]
    NotConfigured,

    /// No handler is registered for the type name
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// The operation did not finish within the configured deadline
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// JSON record (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProviderError {
    /// Validation error attributed to a single attribute
    pub fn validation(
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Validation {
            attribute: attribute.into(),
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Wrap a remote API error, keeping the raw response body when present
    pub fn client(action: &str, err: &ApiError) -> Self {
        let body = err.body.as_deref().unwrap_or_default();
        Self::Client {
            summary: "Client Error".to_string(),
            detail: format!("{}, got error: {}\n{}", action, err.message, body),
        }
    }

    /// Convert into a host-facing diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Validation {
                attribute,
                summary,
                detail,
            } => Diagnostic::error(summary.clone(), detail.clone()).with_attribute(attribute.clone()),
            Self::Client { summary, detail } => Diagnostic::error(summary.clone(), detail.clone()),
            Self::UnexpectedResponse(msg) => {
                Diagnostic::error("Unexpected Response", msg.clone())
            }
            Self::Config(msg) => Diagnostic::error("Invalid Provider Configuration", msg.clone()),
            Self::NotConfigured => Diagnostic::error(
                "Unconfigured Provider",
                "The provider must be configured before resources or data sources can be used.",
            ),
            Self::UnknownType(name) => Diagnostic::error(
                "Unknown Type",
                format!("No resource or data source is registered as \"{}\".", name),
            ),
            other => Diagnostic::error("Provider Error", other.to_string()),
        }
    }
}

/// A user-facing diagnostic returned to the host runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub summary: String,
    pub detail: String,
    /// Attribute path the diagnostic refers to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}
