//! Rule and Schema Types
//!
//! A schema maps field names to ordered rule lists. Rules are immutable once
//! built, so a schema can be shared between any number of engines.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Predicate signature: `(field value, form state) -> passed`
pub type Predicate = dyn Fn(&Value, &Value) -> bool + Send + Sync;

/// A single validation rule: an error message plus the predicate guarding it
#[derive(Clone)]
pub struct Rule {
    error_message: String,
    predicate: Arc<Predicate>,
}

impl Rule {
    pub fn new<F>(error_message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        Self {
            error_message: error_message.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Message reported when this rule is the first one to fail
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Evaluate the predicate against a value and the surrounding form state
    pub fn check(&self, value: &Value, form_state: &Value) -> bool {
        (self.predicate)(value, form_state)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}

/// Field name -> ordered rules. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, Vec<Rule>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn field(mut self, name: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.insert(name, rules);
        self
    }

    /// Insert or replace the rule list for a field.
    ///
    /// Replacing keeps the field's original position.
    pub fn insert(&mut self, name: impl Into<String>, rules: Vec<Rule>) {
        self.fields.insert(name.into(), rules);
    }

    /// Rules declared for a field, in evaluation order
    pub fn rules(&self, field: &str) -> Option<&[Rule]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Rule>)> for Schema {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Rule>)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, rules) in iter {
            schema.insert(name, rules);
        }
        schema
    }
}
