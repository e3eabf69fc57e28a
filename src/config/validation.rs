//! Configuration validation
//!
//! Validates the provider block before a client is built:
//! - URL is present and is an http(s) URL
//! - An API token is available
//! - Timeouts are non-zero

use super::provider_config::ProviderConfig;
use crate::error::Diagnostic;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Host-facing diagnostic attributed to the offending field
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error("Invalid Provider Configuration", self.message.clone())
            .with_attribute(self.field.clone())
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a provider configuration
pub fn validate_provider_config(config: &ProviderConfig) -> ValidationResult {
    let mut errors = Vec::new();

    match config.url.as_deref() {
        None | Some("") => errors.push(ValidationError::new(
            "url",
            format!("A Jira URL must be configured or set via {}", super::URL_ENV),
        )),
        Some(raw) => match url::Url::parse(raw) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            Ok(parsed) => errors.push(ValidationError::new(
                "url",
                format!("Unsupported URL scheme: {}", parsed.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "url",
                format!("Invalid URL '{}': {}", raw, e),
            )),
        },
    }

    if config.token().is_none() {
        let source = config
            .api_token_env
            .clone()
            .unwrap_or_else(|| super::API_TOKEN_ENV.to_string());
        errors.push(ValidationError::new(
            "api_token",
            format!("An API token must be configured or set via {}", source),
        ));
    }

    if config.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "request_timeout_secs",
            "Request timeout must be greater than zero",
        ));
    }

    if config.operation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "operation_timeout_secs",
            "Operation timeout must be greater than zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ProviderConfig {
        ProviderConfig {
            url: Some("https://example.atlassian.net".to_string()),
            username: Some("admin@example.com".to_string()),
            api_token: Some("token".to_string()),
            request_timeout_secs: 30,
            operation_timeout_secs: 300,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_provider_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_url_and_token() {
        let config = ProviderConfig {
            url: None,
            api_token: None,
            ..valid_config()
        };

        let errors = validate_provider_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "url"));
        assert!(errors.iter().any(|e| e.field == "api_token"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let config = ProviderConfig {
            url: Some("ftp://example.com".to_string()),
            ..valid_config()
        };

        let errors = validate_provider_config(&config).unwrap_err();
        assert!(errors[0].message.contains("scheme"));
    }

    #[test]
    fn test_unparseable_url() {
        let config = ProviderConfig {
            url: Some("not a url".to_string()),
            ..valid_config()
        };
        assert!(validate_provider_config(&config).is_err());
    }

    #[test]
    fn test_zero_timeouts() {
        let config = ProviderConfig {
            request_timeout_secs: 0,
            operation_timeout_secs: 0,
            ..valid_config()
        };

        let errors = validate_provider_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_error_diagnostic_attribute() {
        let err = ValidationError::new("url", "bad");
        let diag = err.to_diagnostic();
        assert_eq!(diag.attribute.as_deref(), Some("url"));
        assert_eq!(format!("{}", err), "url: bad");
    }
}
