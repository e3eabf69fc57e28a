//! Configuration system
//!
//! Provider-level settings: Jira URL, credentials and timeouts, with
//! environment variable fallbacks and validation.

mod provider_config;
pub mod validation;

pub use provider_config::{ProviderConfig, API_TOKEN_ENV, URL_ENV, USERNAME_ENV};
pub use validation::{validate_provider_config, ValidationError};
