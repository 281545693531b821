//! Rule-chain interpreter

use super::Schema;
use crate::state::{FormValue, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Failure of a field's rule chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors keyed by field name; only failing fields are present
pub type FieldErrors = BTreeMap<String, FieldError>;

/// Run a field's rule chain in declared order and report the first failure.
///
/// Unknown fields have no rules and therefore never fail.
pub fn validate_field(
    schema: &Schema,
    field_name: &str,
    value: &Value,
    whole_form: &FormValue,
) -> Option<FieldError> {
    let spec = schema.field(field_name)?;
    spec.rules
        .iter()
        .find(|rule| !rule.passes(value, whole_form))
        .map(|rule| FieldError::new(rule.message()))
}

/// Validate every declared field, touched or not
pub fn validate_form(schema: &Schema, form: &FormValue) -> FieldErrors {
    schema
        .fields()
        .iter()
        .filter_map(|spec| {
            let default;
            let value = match form.get(spec.name) {
                Some(value) => value,
                None => {
                    default = spec.kind.default_value();
                    &default
                }
            };
            validate_field(schema, spec.name, value, form)
                .map(|error| (spec.name.to_string(), error))
        })
        .collect()
}
