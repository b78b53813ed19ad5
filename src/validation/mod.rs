//! Validation Engine
//!
//! Per-field validation state driven by a schema, plus event adapters.

pub mod engine;
pub mod events;

pub use engine::{CustomValidation, FieldStatus, ValidationEngine, ValidationState};
pub use events::FieldEvent;
