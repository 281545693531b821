//! Tagged validation rules and the interpreter that evaluates them

use crate::state::{FormValue, Value};
use regex::Regex;
use std::fmt;

/// Predicate signature for rules that need to look at other fields
pub type CrossFieldCheck = fn(&Value, &FormValue) -> bool;

/// A single (predicate, message) pair in a field's rule chain
#[derive(Clone)]
pub enum Rule {
    /// Value must be non-empty
    Required { message: &'static str },
    /// Character count (text) or entry count (lists) within bounds
    Length {
        min: Option<usize>,
        max: Option<usize>,
        message: &'static str,
    },
    /// Text must match the pattern
    Pattern {
        regex: Regex,
        message: &'static str,
    },
    /// Numeric value (or numeric text) must be at least `threshold`
    AtLeast {
        threshold: f64,
        message: &'static str,
    },
    /// Arbitrary check against the field value and the whole form
    CrossField {
        check: CrossFieldCheck,
        message: &'static str,
    },
}

impl Rule {
    pub fn required(message: &'static str) -> Self {
        Rule::Required { message }
    }

    pub fn min_len(min: usize, message: &'static str) -> Self {
        Rule::Length {
            min: Some(min),
            max: None,
            message,
        }
    }

    pub fn max_len(max: usize, message: &'static str) -> Self {
        Rule::Length {
            min: None,
            max: Some(max),
            message,
        }
    }

    /// Build a pattern rule. Patterns are compile-time constants in the
    /// schema catalog, so an invalid one is a programming error.
    pub fn pattern(pattern: &str, message: &'static str) -> Self {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(err) => panic!("invalid rule pattern {pattern:?}: {err}"),
        };
        Rule::Pattern { regex, message }
    }

    pub fn at_least(threshold: f64, message: &'static str) -> Self {
        Rule::AtLeast { threshold, message }
    }

    pub fn cross_field(check: CrossFieldCheck, message: &'static str) -> Self {
        Rule::CrossField { check, message }
    }

    /// Message reported when this rule fails
    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required { message }
            | Rule::Length { message, .. }
            | Rule::Pattern { message, .. }
            | Rule::AtLeast { message, .. }
            | Rule::CrossField { message, .. } => message,
        }
    }

    /// Evaluate the predicate. Rules that do not apply to a value's shape pass.
    pub fn passes(&self, value: &Value, form: &FormValue) -> bool {
        match self {
            Rule::Required { .. } => match value {
                Value::Text(s) => !s.is_empty(),
                Value::Number(n) => n.is_some(),
                Value::Bool(b) => *b,
                Value::Tags(set) => !set.is_empty(),
                Value::Images(list) => !list.is_empty(),
            },
            Rule::Length { min, max, .. } => {
                let len = match value {
                    Value::Text(s) => s.chars().count(),
                    Value::Tags(set) => set.len(),
                    Value::Images(list) => list.len(),
                    Value::Number(_) | Value::Bool(_) => return true,
                };
                min.is_none_or(|min| len >= min) && max.is_none_or(|max| len <= max)
            }
            Rule::Pattern { regex, .. } => match value {
                Value::Text(s) => regex.is_match(s),
                _ => true,
            },
            Rule::AtLeast { threshold, .. } => {
                numeric(value).is_some_and(|n| n >= *threshold)
            }
            Rule::CrossField { check, .. } => check(value, form),
        }
    }
}

/// Numeric reading of a value; numeric text is coerced
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => *n,
        Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required { message } => {
                f.debug_struct("Required").field("message", message).finish()
            }
            Rule::Length { min, max, message } => f
                .debug_struct("Length")
                .field("min", min)
                .field("max", max)
                .field("message", message)
                .finish(),
            Rule::Pattern { regex, message } => f
                .debug_struct("Pattern")
                .field("regex", &regex.as_str())
                .field("message", message)
                .finish(),
            Rule::AtLeast { threshold, message } => f
                .debug_struct("AtLeast")
                .field("threshold", threshold)
                .field("message", message)
                .finish(),
            Rule::CrossField { message, .. } => {
                f.debug_struct("CrossField").field("message", message).finish()
            }
        }
    }
}
