//! Schema System
//!
//! Rule and schema types, declarative schema files and a named registry.

pub mod error;
pub mod file;
pub mod registry;
pub mod rule;

pub use error::SchemaError;
pub use file::{NamedSchema, RuleDef, RuleKind, SchemaFile};
pub use registry::SchemaRegistry;
pub use rule::{Predicate, Rule, Schema};
