//! Schema declarations for resources and data sources
//!
//! A [`Schema`] lists the attributes of a record: whether each one is
//! required, optional or computed, its type, validators and plan modifiers.
//! The host uses the schema to build plans; the provider uses it to validate
//! configuration before any remote call.

use crate::error::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Attribute value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int64,
}

impl AttributeType {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Int64 => value.is_i64(),
        }
    }
}

/// Value validators applied to configured attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// String length (in characters) must not exceed the bound
    LengthAtMost { max: usize },
}

impl Validator {
    fn check(&self, attribute: &str, value: &Value) -> Option<Diagnostic> {
        match self {
            Self::LengthAtMost { max } => {
                let s = value.as_str()?;
                let len = s.chars().count();
                (len > *max).then(|| {
                    Diagnostic::error(
                        "Invalid Attribute Value Length",
                        format!(
                            "Attribute {} string length must be at most {}, got: {}",
                            attribute, max, len
                        ),
                    )
                    .with_attribute(attribute)
                })
            }
        }
    }
}

/// Plan modifiers applied when proposing a new state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanModifier {
    /// Keep the prior state's value when the planned value is unknown
    UseStateForUnknown,
    /// Use this string when the attribute is not configured
    DefaultString { value: String },
}

/// A single schema attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,
}

impl Attribute {
    fn new(attr_type: AttributeType, description: impl Into<String>) -> Self {
        Self {
            attr_type,
            description: description.into(),
            required: false,
            optional: false,
            computed: false,
            validators: Vec::new(),
            plan_modifiers: Vec::new(),
        }
    }

    pub fn required_string(description: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(AttributeType::String, description)
        }
    }

    pub fn optional_string(description: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::new(AttributeType::String, description)
        }
    }

    pub fn computed_string(description: impl Into<String>) -> Self {
        Self {
            computed: true,
            ..Self::new(AttributeType::String, description)
        }
    }

    pub fn optional_int64(description: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::new(AttributeType::Int64, description)
        }
    }

    /// Optional attribute the remote may fill in
    pub fn with_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn with_plan_modifier(mut self, modifier: PlanModifier) -> Self {
        self.plan_modifiers.push(modifier);
        self
    }

    /// Computed attributes that cannot be set in configuration
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.required && !self.optional
    }
}

/// Schema of a resource, data source or the provider block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub version: i64,
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(version: i64, description: impl Into<String>) -> Self {
        Self {
            version,
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Validate a configuration record against this schema
    ///
    /// Returns every problem found; an empty list means the record is valid.
    pub fn validate(&self, config: &Value) -> Vec<Diagnostic> {
        let Some(record) = config.as_object() else {
            return vec![Diagnostic::error(
                "Invalid Configuration",
                "Configuration must be an object",
            )];
        };

        let mut diagnostics = Vec::new();

        for name in record.keys() {
            if !self.attributes.contains_key(name) {
                diagnostics.push(
                    Diagnostic::error(
                        "Unsupported Argument",
                        format!("An argument named \"{}\" is not expected here.", name),
                    )
                    .with_attribute(name.clone()),
                );
            }
        }

        for (name, attribute) in &self.attributes {
            let value = record.get(name).filter(|v| !v.is_null());

            match value {
                None if attribute.required => diagnostics.push(
                    Diagnostic::error(
                        "Missing Required Argument",
                        format!("The argument \"{}\" is required, but no definition was found.", name),
                    )
                    .with_attribute(name.clone()),
                ),
                None => {}
                Some(_) if attribute.is_computed_only() => diagnostics.push(
                    Diagnostic::error(
                        "Invalid Configuration for Read-Only Attribute",
                        format!("Cannot set value for this attribute as the provider has marked it as read-only: {}", name),
                    )
                    .with_attribute(name.clone()),
                ),
                Some(v) if !attribute.attr_type.accepts(v) => diagnostics.push(
                    Diagnostic::error(
                        "Incorrect Attribute Type",
                        format!("Attribute {} expects a value of type {:?}", name, attribute.attr_type),
                    )
                    .with_attribute(name.clone()),
                ),
                Some(v) => diagnostics.extend(
                    attribute
                        .validators
                        .iter()
                        .filter_map(|validator| validator.check(name, v)),
                ),
            }
        }

        diagnostics
    }

    /// Apply attribute plan modifiers to a proposed record
    ///
    /// `prior` is the persisted state, absent on create.
    pub fn apply_plan_modifiers(&self, planned: &mut Map<String, Value>, prior: Option<&Value>) {
        for (name, attribute) in &self.attributes {
            for modifier in &attribute.plan_modifiers {
                let unset = planned.get(name).map_or(true, Value::is_null);
                if !unset {
                    continue;
                }
                match modifier {
                    PlanModifier::UseStateForUnknown => {
                        if let Some(value) = prior
                            .and_then(|p| p.get(name))
                            .filter(|v| !v.is_null())
                        {
                            planned.insert(name.clone(), value.clone());
                        }
                    }
                    PlanModifier::DefaultString { value } => {
                        planned.insert(name.clone(), Value::String(value.clone()));
                    }
                }
            }
        }
    }
}

/// Full provider schema as returned to the host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSchema {
    pub provider: Option<Schema>,
    pub resources: BTreeMap<String, Schema>,
    pub data_sources: BTreeMap<String, Schema>,
}
