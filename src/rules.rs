//! Reusable rule constructors.
//!
//! Every constructor takes the error message reported when the rule is the
//! first to fail for a field. Numeric rules accept JSON numbers as well as
//! numeric strings, since values coming from form inputs are usually text.

use regex::Regex;
use serde_json::Value;

use crate::schema::Rule;

/// Loose truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric view of a value, parsing numeric strings. Non-finite values
/// (`"inf"`, `"NaN"`) are not numbers.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|n: &f64| n.is_finite())
}

/// Equality where `18` and `18.0` are the same number
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Character count of a string or element count of an array
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Value must be present: not null, not an empty string, not an empty array
pub fn required(message: impl Into<String>) -> Rule {
    Rule::new(message, |value, _| match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    })
}

pub fn min_length(min: usize, message: impl Into<String>) -> Rule {
    Rule::new(message, move |value, _| {
        length_of(value).is_some_and(|len| len >= min)
    })
}

pub fn max_length(max: usize, message: impl Into<String>) -> Rule {
    Rule::new(message, move |value, _| {
        length_of(value).is_some_and(|len| len <= max)
    })
}

/// Numeric lower bound (inclusive)
pub fn min(bound: f64, message: impl Into<String>) -> Rule {
    Rule::new(message, move |value, _| {
        as_number(value).is_some_and(|n| n >= bound)
    })
}

/// Numeric upper bound (inclusive)
pub fn max(bound: f64, message: impl Into<String>) -> Rule {
    Rule::new(message, move |value, _| {
        as_number(value).is_some_and(|n| n <= bound)
    })
}

/// String value must match the regular expression
pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Rule, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(Rule::new(message, move |value, _| {
        value.as_str().is_some_and(|s| re.is_match(s))
    }))
}

pub fn one_of(allowed: Vec<Value>, message: impl Into<String>) -> Rule {
    Rule::new(message, move |value, _| {
        allowed.iter().any(|candidate| values_equal(candidate, value))
    })
}

pub fn equals(expected: Value, message: impl Into<String>) -> Rule {
    Rule::new(message, move |value, _| values_equal(value, &expected))
}

pub fn not_equal(forbidden: Value, message: impl Into<String>) -> Rule {
    Rule::new(message, move |value, _| !values_equal(value, &forbidden))
}

/// Value must equal another field of the form state (e.g. password confirmation)
pub fn matches_field(other: impl Into<String>, message: impl Into<String>) -> Rule {
    let other = other.into();
    Rule::new(message, move |value, state| {
        values_equal(state.get(&other).unwrap_or(&Value::Null), value)
    })
}

/// Apply `rule` only while `state[flag]` is truthy; passes otherwise.
///
/// The wrapped rule's message is kept.
pub fn when(flag: impl Into<String>, rule: Rule) -> Rule {
    let flag = flag.into();
    let message = rule.error_message().to_string();
    Rule::new(message, move |value, state| {
        let enabled = state.get(&flag).is_some_and(is_truthy);
        !enabled || rule.check(value, state)
    })
}

/// Every element of an array value must satisfy `rule`; non-arrays fail.
///
/// The wrapped rule's message is kept.
pub fn each(rule: Rule) -> Rule {
    let message = rule.error_message().to_string();
    Rule::new(message, move |value, state| match value {
        Value::Array(items) => items.iter().all(|item| rule.check(item, state)),
        _ => false,
    })
}
