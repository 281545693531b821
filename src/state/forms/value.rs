//! Field values and the per-form value map

use super::error::FormError;
use super::list_field::{BoundedList, ImageRef, ToggleSet};
use std::collections::BTreeMap;

/// Current value of a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    /// `None` means the user has not entered a number
    Number(Option<f64>),
    Bool(bool),
    Tags(ToggleSet),
    Images(BoundedList<ImageRef>),
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::Bool(_) => "flag",
            Value::Tags(_) => "tag set",
            Value::Images(_) => "image list",
        }
    }
}

/// Mapping from field name to current value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormValue {
    values: BTreeMap<String, Value>,
}

impl FormValue {
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    fn require(&self, name: &str) -> Result<&Value, FormError> {
        self.get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    pub fn text(&self, name: &str) -> Result<&str, FormError> {
        match self.require(name)? {
            Value::Text(s) => Ok(s),
            other => Err(FormError::mismatch(name, "text", other)),
        }
    }

    pub fn number(&self, name: &str) -> Result<Option<f64>, FormError> {
        match self.require(name)? {
            Value::Number(n) => Ok(*n),
            other => Err(FormError::mismatch(name, "number", other)),
        }
    }

    pub fn flag(&self, name: &str) -> Result<bool, FormError> {
        match self.require(name)? {
            Value::Bool(b) => Ok(*b),
            other => Err(FormError::mismatch(name, "flag", other)),
        }
    }

    pub fn tags(&self, name: &str) -> Result<&ToggleSet, FormError> {
        match self.require(name)? {
            Value::Tags(set) => Ok(set),
            other => Err(FormError::mismatch(name, "tag set", other)),
        }
    }

    pub fn images(&self, name: &str) -> Result<&BoundedList<ImageRef>, FormError> {
        match self.require(name)? {
            Value::Images(list) => Ok(list),
            other => Err(FormError::mismatch(name, "image list", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors() {
        let mut form = FormValue::default();
        form.insert("name", Value::Text("Tee".into()));
        form.insert("price", Value::Number(Some(1.0)));
        assert_eq!(form.text("name"), Ok("Tee"));
        assert_eq!(form.number("price"), Ok(Some(1.0)));
    }

    #[test]
    fn test_accessor_kind_mismatch() {
        let mut form = FormValue::default();
        form.insert("price", Value::Number(None));
        assert_eq!(
            form.text("price"),
            Err(FormError::KindMismatch {
                field: "price".to_string(),
                expected: "text",
                found: "number",
            })
        );
    }

    #[test]
    fn test_accessor_unknown_field() {
        let form = FormValue::default();
        assert_eq!(
            form.tags("tags").err(),
            Some(FormError::UnknownField("tags".to_string()))
        );
    }
}
