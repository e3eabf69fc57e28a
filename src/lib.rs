//! Atlassian provider - Jira entities for declarative configuration management
//!
//! The host engine owns the plan/apply lifecycle and persisted state; this
//! crate supplies the Jira-facing pieces it dispatches to.
//!
//! # Architecture
//!
//! - **provider**: Type-name registry, configuration and operation dispatch
//! - **resources**: Managed entities (`atlassian_jira_project`)
//! - **data_sources**: Read-only lookups (workflow scheme, status, issue screen)
//! - **client**: Jira REST API v3 client and wire models
//! - **schema**: Attribute schemas, validation and plan modifiers
//! - **mapper**: Conversions between records and wire models
//! - **config**: Provider configuration and validation

pub mod client;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod provider;
pub mod resources;
pub mod schema;

#[cfg(test)]
mod test_support;

// Re-exports
pub use error::{Diagnostic, ProviderError, Result};
pub use provider::{Provider, ProviderContext, PROVIDER_TYPE_NAME};
