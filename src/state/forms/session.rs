//! Field registry for a single form instance
//!
//! A `FormSession` owns the current values of one form, the touched flags,
//! and the derived validation errors. Every mutation goes through the
//! session: the value is updated, errors are recomputed for the whole form
//! (rules may look at other fields), and subscribers of every affected field
//! are notified synchronously before the mutating call returns.

use super::error::FormError;
use super::list_field::ImageRef;
use super::value::{FormValue, Value};
use crate::schema::{validate_form, FieldError, FieldErrors, FieldKind, Schema};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

type Callback = Box<dyn FnMut(&FieldView<'_>)>;

/// What the rendering layer sees of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldView<'a> {
    pub name: &'a str,
    pub value: &'a Value,
    /// Error to display; hidden until the field is touched or a submit was attempted
    pub error: Option<&'a FieldError>,
    pub touched: bool,
}

struct Subscription {
    field: String,
    callback: Callback,
}

pub struct FormSession {
    id: Uuid,
    schema: &'static Schema,
    values: FormValue,
    defaults: FormValue,
    errors: FieldErrors,
    touched: BTreeSet<String>,
    submit_attempted: bool,
    subscriptions: Vec<Subscription>,
}

impl FormSession {
    pub fn new(schema: &'static Schema) -> Self {
        let defaults = schema.default_form();
        let errors = validate_form(schema, &defaults);
        let id = Uuid::new_v4();
        tracing::debug!(form = schema.id, session = %id, "form session created");
        Self {
            id,
            schema,
            values: defaults.clone(),
            defaults,
            errors,
            touched: BTreeSet::new(),
            submit_attempted: false,
            subscriptions: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn values(&self) -> &FormValue {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Replace a field's value. The value must have the shape the field's kind stores.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), FormError> {
        let kind = self.kind_of(name)?;
        if !kind.accepts(&value) {
            let expected = kind.default_value().kind_name();
            return Err(FormError::mismatch(name, expected, &value));
        }
        self.mutate(name, |slot| {
            *slot = value;
            Ok(())
        })
    }

    /// Apply raw text input, coerced by the field's declared kind.
    ///
    /// Numeric fields store `None` for empty or unparsable input, never zero.
    pub fn input_text(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        let value = match self.kind_of(name)? {
            FieldKind::Numeric => Value::Number(parse_number(raw)),
            _ => Value::Text(raw.to_string()),
        };
        self.set_value(name, value)
    }

    /// Append an image to an image-list field
    pub fn append_image(&mut self, name: &str, image: ImageRef) -> Result<Uuid, FormError> {
        self.mutate(name, |slot| match slot {
            Value::Images(list) => list
                .append(image)
                .map_err(|err| FormError::from_list(name, err)),
            other => Err(FormError::mismatch(name, "image list", other)),
        })
    }

    /// Remove the image at `index`, shifting later images down
    pub fn remove_image_at(&mut self, name: &str, index: usize) -> Result<ImageRef, FormError> {
        self.mutate(name, |slot| match slot {
            Value::Images(list) => list
                .remove_at(index)
                .map_err(|err| FormError::from_list(name, err)),
            other => Err(FormError::mismatch(name, "image list", other)),
        })
    }

    /// Toggle membership of `tag`. Returns whether it is selected afterwards.
    pub fn toggle_tag(&mut self, name: &str, tag: &str) -> Result<bool, FormError> {
        if let FieldKind::Tags(options) = self.kind_of(name)? {
            if !options.iter().any(|o| *o == tag) {
                return Err(FormError::KindMismatch {
                    field: name.to_string(),
                    expected: "known tag",
                    found: "unknown tag",
                });
            }
        }
        self.mutate(name, |slot| match slot {
            Value::Tags(set) => Ok(set.toggle(tag)),
            other => Err(FormError::mismatch(name, "tag set", other)),
        })
    }

    /// Register a callback run after every mutation affecting `name`.
    /// Callbacks live as long as the session.
    pub fn subscribe(
        &mut self,
        name: &str,
        callback: impl FnMut(&FieldView<'_>) + 'static,
    ) -> Result<(), FormError> {
        self.kind_of(name)?;
        self.subscriptions.push(Subscription {
            field: name.to_string(),
            callback: Box::new(callback),
        });
        Ok(())
    }

    pub fn touched(&self, name: &str) -> bool {
        self.submit_attempted || self.touched.contains(name)
    }

    /// Whether the field differs from its default
    pub fn dirty(&self, name: &str) -> bool {
        self.values.get(name) != self.defaults.get(name)
    }

    pub fn is_dirty(&self) -> bool {
        self.schema.fields().iter().any(|f| self.dirty(f.name))
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    /// Current derived error, whether or not it is displayed yet
    pub fn error(&self, name: &str) -> Option<&FieldError> {
        self.errors.get(name)
    }

    /// Error to display: only once the field was touched or a submit was attempted
    pub fn visible_error(&self, name: &str) -> Option<&FieldError> {
        self.error(name).filter(|_| self.touched(name))
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field_view<'a>(&'a self, name: &'a str) -> Option<FieldView<'a>> {
        let value = self.values.get(name)?;
        Some(FieldView {
            name,
            value,
            error: self.visible_error(name),
            touched: self.touched(name),
        })
    }

    /// Record a submit attempt: every field counts as touched from now on
    pub fn mark_submit_attempted(&mut self) {
        if self.submit_attempted {
            return;
        }
        self.submit_attempted = true;
        let names: Vec<&'static str> = self.schema.fields().iter().map(|f| f.name).collect();
        self.notify(&names);
    }

    /// Restore defaults and forget touched state; subscriptions are kept
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.errors = validate_form(self.schema, &self.values);
        self.touched.clear();
        self.submit_attempted = false;
        tracing::debug!(form = self.schema.id, session = %self.id, "form reset");
        let names: Vec<&'static str> = self.schema.fields().iter().map(|f| f.name).collect();
        self.notify(&names);
    }

    fn kind_of(&self, name: &str) -> Result<FieldKind, FormError> {
        self.schema
            .field(name)
            .map(|f| f.kind)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Apply `edit` to the field's slot. On error the slot must be untouched.
    fn mutate<R>(
        &mut self,
        name: &str,
        edit: impl FnOnce(&mut Value) -> Result<R, FormError>,
    ) -> Result<R, FormError> {
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let result = edit(slot)?;

        self.touched.insert(name.to_string());
        let errors = validate_form(self.schema, &self.values);
        let mut affected: Vec<&str> = vec![name];
        for spec in self.schema.fields() {
            if spec.name != name && errors.get(spec.name) != self.errors.get(spec.name) {
                affected.push(spec.name);
            }
        }
        self.errors = errors;

        tracing::debug!(
            form = self.schema.id,
            field = name,
            error = self.errors.get(name).map(|e| e.message.as_str()),
            "field updated"
        );

        self.notify(&affected);
        Ok(result)
    }

    fn notify<S: AsRef<str>>(&mut self, names: &[S]) {
        let Self {
            subscriptions,
            values,
            errors,
            touched,
            submit_attempted,
            ..
        } = self;
        for name in names {
            let name = name.as_ref();
            let Some(value) = values.get(name) else {
                continue;
            };
            let is_touched = *submit_attempted || touched.contains(name);
            let view = FieldView {
                name,
                value,
                error: if is_touched { errors.get(name) } else { None },
                touched: is_touched,
            };
            for sub in subscriptions.iter_mut().filter(|s| s.field == name) {
                (sub.callback)(&view);
            }
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Debug for FormSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("id", &self.id)
            .field("schema", &self.schema.id)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("touched", &self.touched)
            .field("submit_attempted", &self.submit_attempted)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        account_login, product, FIELD_CATEGORY, FIELD_IMAGES, FIELD_PASSWORD, FIELD_PRICE,
        FIELD_PRODUCT_NAME, FIELD_STOCK_QUANTITY, FIELD_TAGS, FIELD_USERNAME,
    };
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn product_session() -> FormSession {
        FormSession::new(product())
    }

    mod registry {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_session_defaults_every_field() {
            let session = product_session();
            for spec in product().fields() {
                assert_eq!(session.value(spec.name), Some(&spec.kind.default_value()));
            }
            assert!(!session.is_dirty());
        }

        #[test]
        fn test_set_value_marks_touched_and_dirty() {
            let mut session = product_session();
            assert!(!session.touched(FIELD_PRODUCT_NAME));
            session
                .set_value(FIELD_PRODUCT_NAME, Value::Text("Tee".into()))
                .unwrap();
            assert!(session.touched(FIELD_PRODUCT_NAME));
            assert!(session.dirty(FIELD_PRODUCT_NAME));
            assert!(!session.touched(FIELD_PRICE));
            assert_eq!(
                session.value(FIELD_PRODUCT_NAME),
                Some(&Value::Text("Tee".into()))
            );
        }

        #[test]
        fn test_unknown_field_is_rejected() {
            let mut session = product_session();
            assert_eq!(
                session.set_value("colour", Value::Text("red".into())),
                Err(FormError::UnknownField("colour".into()))
            );
        }

        #[test]
        fn test_kind_mismatch_leaves_value() {
            let mut session = product_session();
            let err = session
                .set_value(FIELD_PRICE, Value::Text("1".into()))
                .unwrap_err();
            assert!(matches!(err, FormError::KindMismatch { .. }));
            assert_eq!(session.value(FIELD_PRICE), Some(&Value::Number(None)));
            assert!(!session.touched(FIELD_PRICE));
        }

        #[test]
        fn test_choice_rejects_unknown_option() {
            let mut session = product_session();
            assert!(session
                .set_value(FIELD_CATEGORY, Value::Text("Giày".into()))
                .is_err());
            assert!(session
                .set_value(FIELD_CATEGORY, Value::Text("Quần".into()))
                .is_ok());
        }

        #[test]
        fn test_reset_restores_defaults() {
            let mut session = product_session();
            session.input_text(FIELD_PRODUCT_NAME, "Tee").unwrap();
            session.mark_submit_attempted();
            session.reset();
            assert!(!session.is_dirty());
            assert!(!session.submit_attempted());
            assert!(!session.touched(FIELD_PRODUCT_NAME));
        }
    }

    mod numeric_input {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_numeric_text_is_coerced() {
            let mut session = product_session();
            session.input_text(FIELD_PRICE, "95000").unwrap();
            assert_eq!(session.value(FIELD_PRICE), Some(&Value::Number(Some(95_000.0))));
        }

        #[test]
        fn test_empty_numeric_is_absent_not_zero() {
            let mut session = product_session();
            session.input_text(FIELD_STOCK_QUANTITY, "3").unwrap();
            session.input_text(FIELD_STOCK_QUANTITY, "").unwrap();
            assert_eq!(session.value(FIELD_STOCK_QUANTITY), Some(&Value::Number(None)));
            assert_eq!(
                session.error(FIELD_STOCK_QUANTITY).map(|e| e.message.as_str()),
                Some("Please enter the stock quantity")
            );
        }

        #[test]
        fn test_zero_stock_is_valid() {
            let mut session = product_session();
            session.input_text(FIELD_STOCK_QUANTITY, "0").unwrap();
            assert_eq!(session.error(FIELD_STOCK_QUANTITY), None);
        }

        #[test]
        fn test_price_scenarios() {
            let mut session = product_session();
            session.input_text(FIELD_PRICE, "50000").unwrap();
            assert!(session.error(FIELD_PRICE).is_some());
            session.input_text(FIELD_PRICE, "90000").unwrap();
            assert_eq!(session.error(FIELD_PRICE), None);
        }
    }

    mod error_display {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_pristine_field_hides_error() {
            let session = FormSession::new(account_login());
            assert!(session.error(FIELD_USERNAME).is_some());
            assert_eq!(session.visible_error(FIELD_USERNAME), None);
        }

        #[test]
        fn test_touched_field_shows_error() {
            let mut session = FormSession::new(account_login());
            session.input_text(FIELD_USERNAME, "ab").unwrap();
            assert_eq!(
                session.visible_error(FIELD_USERNAME).map(|e| e.message.as_str()),
                Some("Username must be at least 5 characters")
            );
            assert_eq!(session.visible_error(FIELD_PASSWORD), None);
        }

        #[test]
        fn test_submit_attempt_reveals_all_errors() {
            let mut session = FormSession::new(account_login());
            session.mark_submit_attempted();
            assert!(session.visible_error(FIELD_USERNAME).is_some());
            assert!(session.visible_error(FIELD_PASSWORD).is_some());
        }

        #[test]
        fn test_valid_input_clears_error() {
            let mut session = FormSession::new(account_login());
            session.input_text(FIELD_USERNAME, "validUser1").unwrap();
            assert_eq!(session.error(FIELD_USERNAME), None);
            let view = session.field_view(FIELD_USERNAME).unwrap();
            assert!(view.touched);
            assert_eq!(view.error, None);
        }
    }

    mod list_fields {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_append_until_full_then_noop() {
            let mut session = product_session();
            for i in 0..5 {
                session
                    .append_image(FIELD_IMAGES, ImageRef::new(format!("img-{i}")))
                    .unwrap();
            }
            let before = session.value(FIELD_IMAGES).cloned();
            let err = session
                .append_image(FIELD_IMAGES, ImageRef::new("img-5"))
                .unwrap_err();
            assert!(err.is_bounds_violation());
            assert_eq!(err, FormError::ListFull { field: FIELD_IMAGES.into(), max: 5 });
            assert_eq!(session.value(FIELD_IMAGES).cloned(), before);
        }

        #[test]
        fn test_remove_image_preserves_order() {
            let mut session = product_session();
            for uri in ["a", "b", "c"] {
                session.append_image(FIELD_IMAGES, ImageRef::new(uri)).unwrap();
            }
            assert_eq!(
                session.remove_image_at(FIELD_IMAGES, 1),
                Ok(ImageRef::new("b"))
            );
            let uris: Vec<_> = session
                .values()
                .images(FIELD_IMAGES)
                .unwrap()
                .iter()
                .map(|e| e.item.uri.clone())
                .collect();
            assert_eq!(uris, vec!["a", "c"]);
        }

        #[test]
        fn test_remove_out_of_bounds_is_error() {
            let mut session = product_session();
            let err = session.remove_image_at(FIELD_IMAGES, 0).unwrap_err();
            assert_eq!(
                err,
                FormError::IndexOutOfBounds {
                    field: FIELD_IMAGES.into(),
                    index: 0,
                    len: 0
                }
            );
        }

        #[test]
        fn test_toggle_tag_revalidates() {
            let mut session = product_session();
            assert!(session.error(FIELD_TAGS).is_some());
            assert_eq!(session.toggle_tag(FIELD_TAGS, "Unisex"), Ok(true));
            assert_eq!(session.error(FIELD_TAGS), None);
            assert_eq!(session.toggle_tag(FIELD_TAGS, "Unisex"), Ok(false));
            assert!(session.visible_error(FIELD_TAGS).is_some());
        }

        #[test]
        fn test_toggle_unknown_tag_rejected() {
            let mut session = product_session();
            assert!(session.toggle_tag(FIELD_TAGS, "Vintage").is_err());
            assert!(!session.touched(FIELD_TAGS));
        }

        #[test]
        fn test_list_ops_on_wrong_field() {
            let mut session = product_session();
            assert!(matches!(
                session.append_image(FIELD_TAGS, ImageRef::new("x")),
                Err(FormError::KindMismatch { .. })
            ));
        }
    }

    mod subscriptions {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_subscriber_runs_synchronously() {
            let mut session = product_session();
            let seen = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&seen);
            session
                .subscribe(FIELD_PRODUCT_NAME, move |view| {
                    sink.borrow_mut().push((
                        view.value.clone(),
                        view.error.map(|e| e.message.clone()),
                    ));
                })
                .unwrap();

            session.input_text(FIELD_PRODUCT_NAME, "").unwrap();
            assert_eq!(seen.borrow().len(), 1);
            session.input_text(FIELD_PRODUCT_NAME, "Tee").unwrap();
            assert_eq!(
                seen.borrow().clone(),
                vec![
                    (
                        Value::Text(String::new()),
                        Some("Product name is required".to_string())
                    ),
                    (Value::Text("Tee".into()), None),
                ]
            );
        }

        #[test]
        fn test_other_fields_do_not_notify() {
            let mut session = product_session();
            let count = Rc::new(RefCell::new(0));
            let sink = Rc::clone(&count);
            session
                .subscribe(FIELD_PRICE, move |_| *sink.borrow_mut() += 1)
                .unwrap();
            session.input_text(FIELD_PRODUCT_NAME, "Tee").unwrap();
            assert_eq!(*count.borrow(), 0);
        }

        #[test]
        fn test_submit_attempt_notifies_every_field() {
            let mut session = product_session();
            let count = Rc::new(RefCell::new(0));
            let sink = Rc::clone(&count);
            session
                .subscribe(FIELD_PRICE, move |view| {
                    assert!(view.error.is_some());
                    *sink.borrow_mut() += 1;
                })
                .unwrap();
            session.mark_submit_attempted();
            assert_eq!(*count.borrow(), 1);
        }

        #[test]
        fn test_subscription_survives_reset() {
            let mut session = product_session();
            let count = Rc::new(RefCell::new(0));
            let sink = Rc::clone(&count);
            session
                .subscribe(FIELD_TAGS, move |_| *sink.borrow_mut() += 1)
                .unwrap();
            session.toggle_tag(FIELD_TAGS, "Unisex").unwrap();
            session.reset();
            session.toggle_tag(FIELD_TAGS, "Unisex").unwrap();
            assert_eq!(*count.borrow(), 3);
        }

        #[test]
        fn test_subscribe_unknown_field() {
            let mut session = product_session();
            assert!(session.subscribe("colour", |_| {}).is_err());
        }
    }
}
