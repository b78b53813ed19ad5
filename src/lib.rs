//! formcheck
//!
//! Declarative form validation: a schema of ordered, predicate-based rules
//! per field, and an engine tracking each field's validity and error.
//!
//! This library provides:
//! - Rule and schema types, plus a library of common rules
//! - Declarative TOML/JSON schema files and a named schema registry
//! - The validation engine and event-bound handlers
//! - Configuration and the `formcheck` command-line driver

pub mod cli;
pub mod config;
pub mod rules;
pub mod schema;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use schema::{Rule, Schema, SchemaError, SchemaRegistry};
pub use validation::{
    CustomValidation, FieldEvent, FieldStatus, ValidationEngine, ValidationState,
};
