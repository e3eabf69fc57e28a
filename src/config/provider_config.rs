//! Provider configuration block
//!
//! Decoded from the `provider "atlassian" { ... }` block the host hands to
//! [`crate::Provider::configure`]. Unset connection fields fall back to
//! environment variables.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable consulted when `url` is unset
pub const URL_ENV: &str = "ATLASSIAN_URL";
/// Environment variable consulted when `username` is unset
pub const USERNAME_ENV: &str = "ATLASSIAN_USERNAME";
/// Environment variable consulted when neither `api_token` nor `api_token_env` is set
pub const API_TOKEN_ENV: &str = "ATLASSIAN_API_TOKEN";

/// Connection settings for the Jira instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Jira instance URL (e.g. `https://example.atlassian.net`)
    #[serde(default)]
    pub url: Option<String>,

    /// Account email used for basic authentication
    #[serde(default)]
    pub username: Option<String>,

    /// API token
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,

    /// Name of an environment variable holding the API token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token_env: Option<String>,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Upper bound for a whole handler operation in seconds
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_operation_timeout() -> u64 {
    300
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            api_token: None,
            api_token_env: None,
            request_timeout_secs: default_request_timeout(),
            operation_timeout_secs: default_operation_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Decode a configuration record and apply environment fallbacks
    ///
    /// A `null` record is treated as an empty block.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let mut config: ProviderConfig = if value.is_null() {
            ProviderConfig::default()
        } else {
            serde_json::from_value(value)?
        };
        config.apply_env_fallbacks(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Fill unset fields from the environment lookup
    pub fn apply_env_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.url.is_none() {
            self.url = lookup(URL_ENV);
        }
        if self.username.is_none() {
            self.username = lookup(USERNAME_ENV);
        }
        if self.api_token.is_none() {
            let env_name = self
                .api_token_env
                .as_deref()
                .map(|name| name.trim_start_matches('$'))
                .unwrap_or(API_TOKEN_ENV);
            self.api_token = lookup(env_name);
        }
    }

    /// The API token, if one is available
    pub fn token(&self) -> Option<String> {
        self.api_token.clone().filter(|t| !t.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.operation_timeout(), Duration::from_secs(300));
        assert!(config.url.is_none());
    }

    #[test]
    fn test_env_fallbacks_fill_unset_fields() {
        let vars = env(&[
            (URL_ENV, "https://env.atlassian.net"),
            (USERNAME_ENV, "env@example.com"),
            (API_TOKEN_ENV, "env-token"),
        ]);
        let mut config = ProviderConfig {
            url: Some("https://explicit.atlassian.net".to_string()),
            ..Default::default()
        };

        config.apply_env_fallbacks(|name| vars.get(name).cloned());

        assert_eq!(config.url.as_deref(), Some("https://explicit.atlassian.net"));
        assert_eq!(config.username.as_deref(), Some("env@example.com"));
        assert_eq!(config.token().as_deref(), Some("env-token"));
    }

    #[test]
    fn test_token_env_override() {
        let vars = env(&[("MY_JIRA_TOKEN", "custom"), (API_TOKEN_ENV, "default")]);
        let mut config = ProviderConfig {
            api_token_env: Some("$MY_JIRA_TOKEN".to_string()),
            ..Default::default()
        };

        config.apply_env_fallbacks(|name| vars.get(name).cloned());

        assert_eq!(config.token().as_deref(), Some("custom"));
    }

    #[test]
    fn test_empty_token_is_absent() {
        let config = ProviderConfig {
            api_token: Some(String::new()),
            ..Default::default()
        };
        assert!(config.token().is_none());
    }

    #[test]
    fn test_token_is_not_serialized() {
        let config = ProviderConfig {
            api_token: Some("secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
