//! Validation Engine
//!
//! Owns a schema and the per-field validation state derived from it. The
//! state always holds exactly one entry per schema field; operations only
//! ever replace entries, they never add or remove them.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::schema::Schema;

/// Validity of a single field. `error` is empty iff `is_valid` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStatus {
    pub is_valid: bool,
    pub error: String,
}

impl FieldStatus {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: String::new(),
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: error.into(),
        }
    }
}

impl Default for FieldStatus {
    fn default() -> Self {
        Self::valid()
    }
}

/// Snapshot of every field's status, in schema order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationState {
    fields: IndexMap<String, FieldStatus>,
}

impl ValidationState {
    /// Every schema field starts out valid, even though nothing was checked yet
    pub fn initial(schema: &Schema) -> Self {
        Self {
            fields: schema
                .field_names()
                .map(|name| (name.to_string(), FieldStatus::valid()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldStatus> {
        self.fields.get(field)
    }

    /// Stored error, or `""` for a field this snapshot does not hold
    pub fn error(&self, field: &str) -> &str {
        self.fields
            .get(field)
            .map(|status| status.error.as_str())
            .unwrap_or("")
    }

    /// Stored validity, or `true` for a field this snapshot does not hold
    pub fn field_valid(&self, field: &str) -> bool {
        self.fields
            .get(field)
            .map(|status| status.is_valid)
            .unwrap_or(true)
    }

    /// AND over every stored status
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|status| status.is_valid)
    }

    /// Non-empty error messages in field order
    pub fn errors(&self) -> Vec<&str> {
        self.fields
            .values()
            .filter(|status| !status.error.is_empty())
            .map(|status| status.error.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldStatus)> {
        self.fields.iter().map(|(name, status)| (name.as_str(), status))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Replace an existing entry. Unknown fields are ignored so the key set
    /// never drifts from the schema.
    fn replace(&mut self, field: &str, status: FieldStatus) {
        if let Some(slot) = self.fields.get_mut(field) {
            *slot = status;
        }
    }
}

/// A value to validate against a schema field that is not read from the form state
#[derive(Debug, Clone, PartialEq)]
pub struct CustomValidation {
    pub field: String,
    pub value: Value,
}

impl CustomValidation {
    pub fn new(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

/// Schema-driven validation state machine
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    schema: Arc<Schema>,
    state: ValidationState,
}

impl ValidationEngine {
    pub fn new(schema: Schema) -> Self {
        Self::with_shared(Arc::new(schema))
    }

    /// Build an engine over a schema shared with other engines
    pub fn with_shared(schema: Arc<Schema>) -> Self {
        let state = ValidationState::initial(&schema);
        Self { schema, state }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Read-only view of the current state
    pub fn validation_state(&self) -> &ValidationState {
        &self.state
    }

    /// Evaluate every rule of `field` in order; the first failure supplies
    /// the error. Returns `None` for fields outside the schema.
    pub fn run_all_validators(
        &self,
        field: &str,
        value: &Value,
        form_state: &Value,
    ) -> Option<FieldStatus> {
        let rules = self.schema.rules(field)?;

        let mut status = FieldStatus::valid();
        for rule in rules {
            let passed = rule.check(value, form_state);
            if !passed && status.is_valid {
                status = FieldStatus::invalid(rule.error_message());
            }
        }

        log::trace!("Field '{}' evaluated: {:?}", field, status);
        Some(status)
    }

    /// Validate a field and always record the outcome.
    ///
    /// Returns `None` (and changes nothing) when the field is not in the schema.
    pub fn validate(&mut self, field: &str, value: &Value, form_state: &Value) -> Option<bool> {
        let status = self.run_all_validators(field, value, form_state)?;
        let is_valid = status.is_valid;
        log::debug!("validate '{}': valid={}", field, is_valid);
        self.state.replace(field, status);
        Some(is_valid)
    }

    /// Validate a field but only record the outcome when it passes.
    ///
    /// A failing result leaves the stored status untouched; the computed
    /// result is returned either way.
    pub fn validate_if_true(
        &mut self,
        field: &str,
        value: &Value,
        form_state: &Value,
    ) -> Option<bool> {
        let status = self.run_all_validators(field, value, form_state)?;
        let is_valid = status.is_valid;
        if is_valid {
            log::debug!("validate_if_true '{}': recording success", field);
            self.state.replace(field, status);
        } else {
            log::debug!("validate_if_true '{}': failure not recorded", field);
        }
        Some(is_valid)
    }

    /// Validate every schema field using `form_state[field]` as its value.
    ///
    /// Returns overall validity.
    pub fn validate_all(&mut self, form_state: &Value) -> bool {
        let fields: Vec<String> = self.schema.field_names().map(str::to_string).collect();
        self.validate_fields(form_state, &fields)
    }

    /// Validate a subset of fields against one form-state snapshot.
    ///
    /// Statuses of fields outside `fields` are preserved. Names that are not
    /// schema fields are skipped. Returns overall validity across the whole
    /// schema, not just the subset.
    pub fn validate_fields<S: AsRef<str>>(&mut self, form_state: &Value, fields: &[S]) -> bool {
        // Whole batch is computed against the caller's snapshot before storing
        let mut computed = Vec::with_capacity(fields.len());
        for field in fields {
            let field: &str = field.as_ref();
            let value = form_state.get(field).unwrap_or(&Value::Null);
            match self.run_all_validators(field, value, form_state) {
                Some(status) => computed.push((field, status)),
                None => log::debug!("validate_fields: skipping unknown field '{}'", field),
            }
        }

        for (field, status) in computed {
            self.state.replace(field, status);
        }

        let valid = self.is_valid();
        log::debug!("validate_fields: {} field(s), valid={}", fields.len(), valid);
        valid
    }

    /// Validate values that are not properties of a single form-state object.
    ///
    /// Every pair goes through [`validate`](Self::validate) with `context`
    /// (an empty object when `None`) as the form state. Unknown fields count
    /// as failures.
    pub fn validate_custom(
        &mut self,
        validations: &[CustomValidation],
        context: Option<&Value>,
    ) -> bool {
        let empty = Value::Object(Default::default());
        let context = context.unwrap_or(&empty);

        validations.iter().fold(true, |all_valid, custom| {
            let valid = self.validate(&custom.field, &custom.value, context) == Some(true);
            all_valid && valid
        })
    }

    /// Current error for a field; `""` for unknown fields
    pub fn get_error(&self, field: &str) -> &str {
        self.get_error_in(field, &self.state)
    }

    /// Error for a field in an explicit snapshot
    pub fn get_error_in<'s>(&self, field: &str, snapshot: &'s ValidationState) -> &'s str {
        if self.schema.contains_field(field) {
            snapshot.error(field)
        } else {
            ""
        }
    }

    /// Current validity of a field; `true` for unknown fields
    pub fn get_field_valid(&self, field: &str) -> bool {
        self.get_field_valid_in(field, &self.state)
    }

    /// Validity of a field in an explicit snapshot
    pub fn get_field_valid_in(&self, field: &str, snapshot: &ValidationState) -> bool {
        !self.schema.contains_field(field) || snapshot.field_valid(field)
    }

    /// AND over every field's stored validity
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    /// Non-empty error messages in schema order
    pub fn validation_errors(&self) -> Vec<&str> {
        self.state.errors()
    }
}
