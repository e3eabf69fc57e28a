//! Provider entry point
//!
//! [`Provider`] is what the host talks to: it returns schemas, accepts the
//! provider configuration, and dispatches resource and data-source
//! operations by type name. The host decides which lifecycle operation to
//! run; the provider only routes it to the right handler.
//!
//! The configured [`ProviderContext`] is built once and shared read-only by
//! every handler.

use crate::client::{JiraApi, JiraClient};
use crate::config::{validate_provider_config, ProviderConfig};
use crate::data_sources::{self, DataSource};
use crate::error::Diagnostic;
use crate::resources::{self, Resource};
use crate::schema::{Attribute, ProviderSchema, Schema};
use crate::{ProviderError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Type name of this provider; prefixes every resource and data source
pub const PROVIDER_TYPE_NAME: &str = "atlassian";

/// Shared, immutable dependencies handed to every handler
#[derive(Clone)]
pub struct ProviderContext {
    client: Arc<dyn JiraApi>,
    operation_timeout: Duration,
}

impl ProviderContext {
    pub fn new(client: Arc<dyn JiraApi>, operation_timeout: Duration) -> Self {
        Self {
            client,
            operation_timeout,
        }
    }

    pub fn client(&self) -> &dyn JiraApi {
        self.client.as_ref()
    }

    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }
}

struct Configured {
    context: ProviderContext,
    resources: HashMap<String, Arc<dyn Resource>>,
    data_sources: HashMap<String, Arc<dyn DataSource>>,
}

/// The `atlassian` provider
pub struct Provider {
    type_name: String,
    configured: Option<Configured>,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider {
    /// Create an unconfigured provider
    pub fn new() -> Self {
        Self {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            configured: None,
        }
    }

    /// Create a provider already configured with a client
    pub fn with_client(client: Arc<dyn JiraApi>, operation_timeout: Duration) -> Self {
        let mut provider = Self::new();
        provider.install(ProviderContext::new(client, operation_timeout));
        provider
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_configured(&self) -> bool {
        self.configured.is_some()
    }

    fn full_name(&self, suffix: &str) -> String {
        format!("{}{}", self.type_name, suffix)
    }

    /// Type names of every registered resource
    pub fn resource_types(&self) -> Vec<String> {
        resources::registrations()
            .iter()
            .map(|r| self.full_name(r.type_suffix))
            .collect()
    }

    /// Type names of every registered data source
    pub fn data_source_types(&self) -> Vec<String> {
        data_sources::registrations()
            .iter()
            .map(|r| self.full_name(r.type_suffix))
            .collect()
    }

    /// Schema of the provider block
    pub fn provider_schema() -> Schema {
        Schema::new(0, "Atlassian Provider")
            .with_attribute(
                "url",
                Attribute::optional_string(
                    "URL of the Jira instance. May also be provided via ATLASSIAN_URL.",
                ),
            )
            .with_attribute(
                "username",
                Attribute::optional_string(
                    "Account email for basic authentication. May also be provided via ATLASSIAN_USERNAME.",
                ),
            )
            .with_attribute(
                "api_token",
                Attribute::optional_string(
                    "API token. May also be provided via ATLASSIAN_API_TOKEN.",
                ),
            )
            .with_attribute(
                "api_token_env",
                Attribute::optional_string("Name of an environment variable holding the API token."),
            )
            .with_attribute(
                "request_timeout_secs",
                Attribute::optional_int64(
                    "Upper bound for each HTTP request in seconds. Reads are also capped at 10 seconds and writes at 15 seconds.",
                ),
            )
            .with_attribute(
                "operation_timeout_secs",
                Attribute::optional_int64("Upper bound for a single operation in seconds."),
            )
    }

    /// Full schema: provider block, resources and data sources
    pub fn schema(&self) -> ProviderSchema {
        ProviderSchema {
            provider: Some(Self::provider_schema()),
            resources: resources::registrations()
                .iter()
                .map(|r| (self.full_name(r.type_suffix), (r.schema)()))
                .collect(),
            data_sources: data_sources::registrations()
                .iter()
                .map(|r| (self.full_name(r.type_suffix), (r.schema)()))
                .collect(),
        }
    }

    /// Configure the provider from its configuration block
    ///
    /// Returns every configuration problem as a diagnostic; the provider stays
    /// unchanged when configuration fails.
    pub fn configure(&mut self, config: Value) -> std::result::Result<(), Vec<Diagnostic>> {
        debug!("Configuring provider");

        let config =
            ProviderConfig::from_value(config).map_err(|e| vec![e.to_diagnostic()])?;

        if let Err(errors) = validate_provider_config(&config) {
            warn!(count = errors.len(), "Invalid provider configuration");
            return Err(errors.iter().map(|e| e.to_diagnostic()).collect());
        }

        let client = JiraClient::new(&config).map_err(|e| vec![e.to_diagnostic()])?;
        info!(url = %client.base_url(), "Configured Jira client");

        self.install(ProviderContext::new(
            Arc::new(client),
            config.operation_timeout(),
        ));
        Ok(())
    }

    fn install(&mut self, context: ProviderContext) {
        let resources = resources::registrations()
            .into_iter()
            .map(|r| (self.full_name(r.type_suffix), (r.build)(context.clone())))
            .collect();
        let data_sources = data_sources::registrations()
            .into_iter()
            .map(|r| (self.full_name(r.type_suffix), (r.build)(context.clone())))
            .collect();

        self.configured = Some(Configured {
            context,
            resources,
            data_sources,
        });
    }

    fn resource_schema(&self, type_name: &str) -> Result<Schema> {
        resources::registrations()
            .iter()
            .find(|r| self.full_name(r.type_suffix) == type_name)
            .map(|r| (r.schema)())
            .ok_or_else(|| ProviderError::UnknownType(type_name.to_string()))
    }

    fn data_source_schema(&self, type_name: &str) -> Result<Schema> {
        data_sources::registrations()
            .iter()
            .find(|r| self.full_name(r.type_suffix) == type_name)
            .map(|r| (r.schema)())
            .ok_or_else(|| ProviderError::UnknownType(type_name.to_string()))
    }

    /// Validate a resource configuration against its schema
    pub fn validate_resource_config(&self, type_name: &str, config: &Value) -> Result<Vec<Diagnostic>> {
        Ok(self.resource_schema(type_name)?.validate(config))
    }

    /// Validate a data source configuration against its schema
    pub fn validate_data_source_config(
        &self,
        type_name: &str,
        config: &Value,
    ) -> Result<Vec<Diagnostic>> {
        Ok(self.data_source_schema(type_name)?.validate(config))
    }

    /// Apply the resource's plan modifiers to a proposed record
    pub fn modify_plan(&self, type_name: &str, proposed: Value, prior: Option<&Value>) -> Result<Value> {
        let schema = self.resource_schema(type_name)?;
        match proposed {
            Value::Object(mut planned) => {
                schema.apply_plan_modifiers(&mut planned, prior);
                Ok(Value::Object(planned))
            }
            other => Ok(other),
        }
    }

    fn configured(&self, type_name: &str, known: bool) -> Result<&Configured> {
        match &self.configured {
            Some(configured) => Ok(configured),
            None if known => Err(ProviderError::NotConfigured),
            None => Err(ProviderError::UnknownType(type_name.to_string())),
        }
    }

    fn resource(&self, type_name: &str) -> Result<(Arc<dyn Resource>, Duration)> {
        let known = self.resource_schema(type_name).is_ok();
        let configured = self.configured(type_name, known)?;
        configured
            .resources
            .get(type_name)
            .map(|r| (r.clone(), configured.context.operation_timeout()))
            .ok_or_else(|| ProviderError::UnknownType(type_name.to_string()))
    }

    fn data_source(&self, type_name: &str) -> Result<(Arc<dyn DataSource>, Duration)> {
        let known = self.data_source_schema(type_name).is_ok();
        let configured = self.configured(type_name, known)?;
        configured
            .data_sources
            .get(type_name)
            .map(|d| (d.clone(), configured.context.operation_timeout()))
            .ok_or_else(|| ProviderError::UnknownType(type_name.to_string()))
    }

    pub async fn create(&self, type_name: &str, plan: Value) -> Result<Value> {
        let (resource, timeout) = self.resource(type_name)?;
        bounded(timeout, resource.create(plan)).await
    }

    pub async fn read(&self, type_name: &str, state: Value) -> Result<Value> {
        let (resource, timeout) = self.resource(type_name)?;
        bounded(timeout, resource.read(state)).await
    }

    pub async fn update(&self, type_name: &str, plan: Value, state: Value) -> Result<Value> {
        let (resource, timeout) = self.resource(type_name)?;
        bounded(timeout, resource.update(plan, state)).await
    }

    pub async fn delete(&self, type_name: &str, state: Value) -> Result<()> {
        let (resource, timeout) = self.resource(type_name)?;
        bounded(timeout, resource.delete(state)).await
    }

    pub fn import_state(&self, type_name: &str, id: &str) -> Result<Value> {
        let (resource, _) = self.resource(type_name)?;
        resource.import_state(id)
    }

    pub async fn read_data_source(&self, type_name: &str, config: Value) -> Result<Value> {
        let (data_source, timeout) = self.data_source(type_name)?;
        bounded(timeout, data_source.read(config)).await
    }
}

/// Run an operation under the configured deadline
async fn bounded<T, F>(timeout: Duration, operation: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(timeout, operation)
        .await
        .map_err(|_| ProviderError::Timeout(timeout))?
}
