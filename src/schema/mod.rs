//! Declarative form schemas
//!
//! A schema is an ordered list of field declarations. Each declaration names
//! the field's kind, which fixes its default value, and its rule chain.
//! Schemas are built once per process and never mutated afterwards.

mod catalog;
mod rule;
mod validator;

#[cfg(test)]
pub use catalog::{account_login, email_login, FIELD_EMAIL, FIELD_USERNAME};
pub use catalog::{
    product, LoginVariant, CATEGORIES, FIELD_CATEGORY, FIELD_DESCRIPTION, FIELD_IMAGES,
    FIELD_PASSWORD, FIELD_PRICE, FIELD_PRODUCT_NAME, FIELD_REMEMBER, FIELD_SKU,
    FIELD_STOCK_QUANTITY, FIELD_TAGS, TAGS,
};
pub use rule::Rule;
pub use validator::{validate_form, FieldError, FieldErrors};

use crate::state::{BoundedList, FormValue, ToggleSet, Value};
use crate::submit::{Payload, PayloadError};

/// Coerces a fully validated form into the payload the save collaborator expects
pub type PayloadBuilder = fn(&FormValue) -> Result<Payload, PayloadError>;

/// Declared kind of a field: decides its default value and accepted values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text { multiline: bool },
    /// Text that is masked when rendered
    Secret,
    /// Raw text input coerced to an optional number on change
    Numeric,
    /// Single selection out of fixed options
    Choice(&'static [&'static str]),
    /// Set-like selection out of fixed options
    Tags(&'static [&'static str]),
    /// Ordered list of image references bounded by `max`
    Images { max: usize },
    Flag,
}

impl FieldKind {
    /// Value a field of this kind holds when the form is created
    pub fn default_value(&self) -> Value {
        match self {
            FieldKind::Text { .. } | FieldKind::Secret | FieldKind::Choice(_) => {
                Value::Text(String::new())
            }
            FieldKind::Numeric => Value::Number(None),
            FieldKind::Tags(_) => Value::Tags(ToggleSet::new()),
            FieldKind::Images { max } => Value::Images(BoundedList::new(*max)),
            FieldKind::Flag => Value::Bool(false),
        }
    }

    /// Whether a value has the shape this kind stores
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::Text { .. } | FieldKind::Secret, Value::Text(_)) => true,
            (FieldKind::Choice(options), Value::Text(s)) => {
                s.is_empty() || options.iter().any(|o| o == s)
            }
            (FieldKind::Numeric, Value::Number(_)) => true,
            (FieldKind::Tags(options), Value::Tags(set)) => {
                set.iter().all(|tag| options.iter().any(|o| o == tag))
            }
            (FieldKind::Images { max }, Value::Images(list)) => list.len() <= *max,
            (FieldKind::Flag, Value::Bool(_)) => true,
            _ => false,
        }
    }
}

/// Declaration of a single field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            rules: Vec::new(),
        }
    }

    /// Append a rule to the end of the chain
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Immutable mapping from field name to declaration and rule chain
#[derive(Debug)]
pub struct Schema {
    pub id: &'static str,
    fields: Vec<FieldSpec>,
    build_payload: PayloadBuilder,
}

impl Schema {
    pub fn new(id: &'static str, fields: Vec<FieldSpec>, build_payload: PayloadBuilder) -> Self {
        debug_assert!(
            {
                let mut names: Vec<_> = fields.iter().map(|f| f.name).collect();
                names.sort_unstable();
                names.windows(2).all(|w| w[0] != w[1])
            },
            "duplicate field name in schema {id}"
        );
        Self {
            id,
            fields,
            build_payload,
        }
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// A form with every declared field set to its default
    pub fn default_form(&self) -> FormValue {
        let mut form = FormValue::default();
        for field in &self.fields {
            form.insert(field.name, field.kind.default_value());
        }
        form
    }

    /// Coerce a validated form into its external payload
    pub fn build_payload(&self, form: &FormValue) -> Result<Payload, PayloadError> {
        (self.build_payload)(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_covers_every_field() {
        let schema = product();
        let form = schema.default_form();
        for field in schema.fields() {
            assert_eq!(form.get(field.name), Some(&field.kind.default_value()));
        }
        assert!(form.get("unknown").is_none());
    }

    #[test]
    fn test_flag_defaults_to_false() {
        assert_eq!(FieldKind::Flag.default_value(), Value::Bool(false));
        assert!(FieldKind::Flag.accepts(&Value::Bool(true)));
        assert!(!FieldKind::Flag.accepts(&Value::Text(String::new())));
    }

    #[test]
    fn test_numeric_defaults_to_absent() {
        assert_eq!(FieldKind::Numeric.default_value(), Value::Number(None));
    }

    #[test]
    fn test_choice_accepts_only_options() {
        let kind = FieldKind::Choice(CATEGORIES);
        assert!(kind.accepts(&Value::Text(CATEGORIES[0].to_string())));
        assert!(kind.accepts(&Value::Text(String::new())));
        assert!(!kind.accepts(&Value::Text("Giày".to_string())));
        assert!(!kind.accepts(&Value::Number(None)));
    }

    #[test]
    fn test_images_kind_carries_capacity() {
        match (FieldKind::Images { max: 5 }).default_value() {
            Value::Images(list) => assert_eq!(list.capacity(), 5),
            other => panic!("unexpected default {other:?}"),
        }
    }

    #[test]
    fn test_field_lookup() {
        let schema = email_login();
        assert_eq!(schema.field(FIELD_EMAIL).map(|f| f.label), Some("Email"));
        assert!(schema.field("nope").is_none());
    }
}
