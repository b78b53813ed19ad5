//! Declarative Schema Files
//!
//! Schemas can be written in TOML or JSON:
//!
//! ```toml
//! name = "person"
//!
//! [fields]
//! name = [
//!     { kind = "required", message = "Name is required." },
//!     { kind = "not_equal", value = "bob", message = "Cannot be bob." },
//!     { kind = "equals", value = "dingo", when = "dingo", message = "Must be dingo." },
//! ]
//! age = [{ kind = "min", value = 18, message = "Must be 18." }]
//! ```
//!
//! Files are compiled eagerly: a malformed file fails at load time, never
//! during validation.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use super::error::SchemaError;
use super::rule::{Rule, Schema};
use crate::rules;

/// Root schema file structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SchemaFile {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub fields: IndexMap<String, Vec<RuleDef>>,
}

/// One rule entry of a field
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleDef {
    pub message: String,
    /// Only enforce the rule while this form-state field is truthy
    pub when: Option<String>,
    /// Apply the rule to every element of an array value
    #[serde(default)]
    pub each: bool,
    #[serde(flatten)]
    pub kind: RuleKind,
}

/// Built-in rule kinds
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    MinLength { min: usize },
    MaxLength { max: usize },
    Min { value: f64 },
    Max { value: f64 },
    Pattern { pattern: String },
    OneOf { values: Vec<Value> },
    Equals { value: Value },
    NotEqual { value: Value },
    MatchesField { field: String },
}

/// A compiled schema together with its metadata
#[derive(Debug, Clone)]
pub struct NamedSchema {
    pub name: String,
    pub description: Option<String>,
    pub schema: Schema,
}

impl SchemaFile {
    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a `.toml` or `.json` schema file
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(SchemaError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Compile every rule definition into a runtime schema
    pub fn compile(&self) -> Result<NamedSchema, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }

        let mut schema = Schema::new();
        for (field, defs) in &self.fields {
            let rules = defs
                .iter()
                .map(|def| def.compile(field))
                .collect::<Result<Vec<_>, _>>()?;
            schema.insert(field.clone(), rules);
        }

        log::debug!(
            "Compiled schema '{}' with {} field(s)",
            self.name,
            schema.len()
        );

        Ok(NamedSchema {
            name: self.name.clone(),
            description: self.description.clone(),
            schema,
        })
    }
}

impl RuleDef {
    /// Build the runtime rule; `field` is only used for error reporting
    pub fn compile(&self, field: &str) -> Result<Rule, SchemaError> {
        let message = self.message.clone();
        let mut rule = match &self.kind {
            RuleKind::Required => rules::required(message),
            RuleKind::MinLength { min } => rules::min_length(*min, message),
            RuleKind::MaxLength { max } => rules::max_length(*max, message),
            RuleKind::Min { value } => rules::min(*value, message),
            RuleKind::Max { value } => rules::max(*value, message),
            RuleKind::Pattern { pattern } => {
                rules::pattern(pattern, message).map_err(|source| SchemaError::InvalidPattern {
                    field: field.to_string(),
                    source,
                })?
            }
            RuleKind::OneOf { values } => rules::one_of(values.clone(), message),
            RuleKind::Equals { value } => rules::equals(value.clone(), message),
            RuleKind::NotEqual { value } => rules::not_equal(value.clone(), message),
            RuleKind::MatchesField { field } => rules::matches_field(field.clone(), message),
        };

        if self.each {
            rule = rules::each(rule);
        }
        if let Some(flag) = &self.when {
            rule = rules::when(flag.clone(), rule);
        }

        Ok(rule)
    }
}
