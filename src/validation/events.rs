//! Event-bound validation.
//!
//! UI layers adapt their native events to [`FieldEvent`] and hand them to the
//! closures built here.

use serde_json::Value;

use super::engine::ValidationEngine;

/// Framework-neutral input event: which field changed and its new value
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEvent {
    pub name: String,
    pub value: Value,
}

impl FieldEvent {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl ValidationEngine {
    /// Handler for blur-style events: runs [`validate`](Self::validate) on
    /// the event's field and discards the result.
    pub fn validate_on_blur<'a>(&'a mut self, form_state: &'a Value) -> impl FnMut(&FieldEvent) + 'a {
        move |event: &FieldEvent| {
            self.validate(&event.name, &event.value, form_state);
        }
    }

    /// Handler for change-style events: runs
    /// [`validate_if_true`](Self::validate_if_true) on the event's field,
    /// then always forwards the event to `on_change` and returns its result.
    pub fn validate_on_change<'a, F, R>(
        &'a mut self,
        mut on_change: F,
        form_state: &'a Value,
    ) -> impl FnMut(&FieldEvent) -> R + 'a
    where
        F: FnMut(&FieldEvent) -> R + 'a,
    {
        move |event: &FieldEvent| {
            self.validate_if_true(&event.name, &event.value, form_state);
            on_change(event)
        }
    }
}
