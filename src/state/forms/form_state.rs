//! Screen forms: focus order, edit buffers and the session behind them

use super::error::FormError;
use super::field::FormField;
use super::list_field::ImageRef;
use super::session::FormSession;
use super::value::Value;
use crate::schema::{
    product, LoginVariant, CATEGORIES, FIELD_CATEGORY, FIELD_DESCRIPTION, FIELD_IMAGES,
    FIELD_PASSWORD, FIELD_PRICE, FIELD_PRODUCT_NAME, FIELD_REMEMBER, FIELD_SKU,
    FIELD_STOCK_QUANTITY, FIELD_TAGS, TAGS,
};
use std::cell::Cell;
use std::rc::Rc;
use uuid::Uuid;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    /// Edit buffer of the focused control, if it takes typed input
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
    fn session(&self) -> &FormSession;
    fn session_mut(&mut self) -> &mut FormSession;
    /// Whether focus is on the submit button
    fn is_submit_active(&self) -> bool {
        self.active_field() + 1 == self.field_count()
    }
}

/// Push typed input from the focused buffer into the session
fn sync_active(form: &mut impl Form) -> Result<(), FormError> {
    let Some(field) = form.get_active_field_mut() else {
        return Ok(());
    };
    let (name, raw) = (field.name, field.as_text().to_string());
    form.session_mut().input_text(name, &raw)
}

/// Enum representing all possible form states
#[derive(Debug)]
pub enum FormState {
    Login(LoginForm),
    Product(ProductForm),
}

impl FormState {
    fn form(&self) -> &dyn Form {
        match self {
            FormState::Login(f) => f,
            FormState::Product(f) => f,
        }
    }

    fn form_mut(&mut self) -> &mut dyn Form {
        match self {
            FormState::Login(f) => f,
            FormState::Product(f) => f,
        }
    }

    pub fn next_field(&mut self) {
        self.form_mut().next_field();
    }

    pub fn prev_field(&mut self) {
        self.form_mut().prev_field();
    }

    pub fn session(&self) -> &FormSession {
        self.form().session()
    }

    pub fn session_mut(&mut self) -> &mut FormSession {
        self.form_mut().session_mut()
    }

    pub fn is_submit_active(&self) -> bool {
        self.form().is_submit_active()
    }

    /// Whether the focused control takes typed characters
    pub fn is_text_active(&self) -> bool {
        let form = self.form();
        form.get_field(form.active_field()).is_some()
    }

    pub fn is_active_field_multiline(&self) -> bool {
        let form = self.form();
        form.get_field(form.active_field())
            .is_some_and(|f| f.is_multiline)
    }

    /// Type a character into the focused input. Rejected characters are dropped.
    pub fn input_char(&mut self, c: char) -> Result<(), FormError> {
        match self {
            FormState::Login(f) => input_char(f, c),
            FormState::Product(f) => input_char(f, c),
        }
    }

    pub fn backspace(&mut self) -> Result<(), FormError> {
        match self {
            FormState::Login(f) => backspace(f),
            FormState::Product(f) => backspace(f),
        }
    }
}

fn input_char(form: &mut impl Form, c: char) -> Result<(), FormError> {
    let changed = form
        .get_active_field_mut()
        .is_some_and(|field| field.push_char(c));
    if changed {
        sync_active(form)
    } else {
        Ok(())
    }
}

fn backspace(form: &mut impl Form) -> Result<(), FormError> {
    let changed = form
        .get_active_field_mut()
        .is_some_and(|field| field.pop_char());
    if changed {
        sync_active(form)
    } else {
        Ok(())
    }
}

/// Focus slot of the "keep me signed in" checkbox
const REMEMBER_SLOT: usize = 2;

/// Sign-in screen: identifier, password, remember checkbox, submit button
#[derive(Debug)]
pub struct LoginForm {
    pub variant: LoginVariant,
    pub session: FormSession,
    pub identifier: FormField,
    pub password: FormField,
    pub active_field_index: usize,
}

impl LoginForm {
    pub fn new(variant: LoginVariant) -> Self {
        let schema = variant.schema();
        let field = |name: &'static str| {
            schema
                .field(name)
                .and_then(FormField::from_spec)
                .unwrap_or_else(|| FormField::text(name, name, false))
        };
        let identifier = field(variant.identifier_field());
        let password = field(FIELD_PASSWORD);
        Self {
            variant,
            session: FormSession::new(schema),
            identifier,
            password,
            active_field_index: 0,
        }
    }

    pub fn remember(&self) -> bool {
        self.session.values().flag(FIELD_REMEMBER).unwrap_or(false)
    }

    pub fn is_remember_active(&self) -> bool {
        self.active_field_index == REMEMBER_SLOT
    }

    /// Flip the checkbox through the session so it is validated and tracked
    pub fn toggle_remember(&mut self) -> Result<(), FormError> {
        let next = !self.remember();
        self.session.set_value(FIELD_REMEMBER, Value::Bool(next))
    }
}

impl Form for LoginForm {
    fn field_count(&self) -> usize {
        4 // identifier, password, remember, submit
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.identifier),
            1 => Some(&mut self.password),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.identifier),
            1 => Some(&self.password),
            _ => None,
        }
    }
    fn session(&self) -> &FormSession {
        &self.session
    }
    fn session_mut(&mut self) -> &mut FormSession {
        &mut self.session
    }
}

/// Controls of the product screen in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductControl {
    ProductName,
    Sku,
    Category,
    Description,
    Images,
    Tags,
    Price,
    StockQuantity,
    Submit,
}

impl ProductControl {
    pub const ALL: [ProductControl; 9] = [
        ProductControl::ProductName,
        ProductControl::Sku,
        ProductControl::Category,
        ProductControl::Description,
        ProductControl::Images,
        ProductControl::Tags,
        ProductControl::Price,
        ProductControl::StockQuantity,
        ProductControl::Submit,
    ];
}

/// Product entry screen
#[derive(Debug)]
pub struct ProductForm {
    pub session: FormSession,
    pub product_name: FormField,
    pub sku: FormField,
    pub description: FormField,
    pub price: FormField,
    pub stock_quantity: FormField,
    pub category_cursor: usize,
    pub tag_cursor: usize,
    /// Selected image; kept in range by a subscription on the image list
    image_cursor: Rc<Cell<usize>>,
    pub active_field_index: usize,
}

impl ProductForm {
    pub fn new() -> Self {
        let schema = product();
        let input = |name: &'static str| {
            schema
                .field(name)
                .and_then(FormField::from_spec)
                .unwrap_or_else(|| FormField::text(name, name, false))
        };
        let mut session = FormSession::new(schema);
        let image_cursor = Rc::new(Cell::new(0));
        let cursor = Rc::clone(&image_cursor);
        let subscribed = session.subscribe(FIELD_IMAGES, move |view| {
            if let Value::Images(list) = view.value {
                cursor.set(cursor.get().min(list.len().saturating_sub(1)));
            }
        });
        debug_assert!(subscribed.is_ok(), "product schema must declare {FIELD_IMAGES}");

        Self {
            product_name: input(FIELD_PRODUCT_NAME),
            sku: input(FIELD_SKU),
            description: input(FIELD_DESCRIPTION),
            price: input(FIELD_PRICE),
            stock_quantity: input(FIELD_STOCK_QUANTITY),
            session,
            category_cursor: 0,
            tag_cursor: 0,
            image_cursor,
            active_field_index: 0,
        }
    }

    pub fn active_control(&self) -> ProductControl {
        ProductControl::ALL[self.active_field_index.min(ProductControl::ALL.len() - 1)]
    }

    pub fn image_cursor(&self) -> usize {
        self.image_cursor.get()
    }

    pub fn image_count(&self) -> usize {
        self.session
            .values()
            .images(FIELD_IMAGES)
            .map(|list| list.len())
            .unwrap_or(0)
    }

    /// Move the cursor of the focused chooser
    pub fn move_cursor(&mut self, forward: bool) {
        let step = |cursor: usize, len: usize| match (len, forward) {
            (0, _) => 0,
            (_, true) => (cursor + 1) % len,
            (_, false) => (cursor + len - 1) % len,
        };
        match self.active_control() {
            ProductControl::Category => {
                self.category_cursor = step(self.category_cursor, CATEGORIES.len())
            }
            ProductControl::Tags => self.tag_cursor = step(self.tag_cursor, TAGS.len()),
            ProductControl::Images => {
                let next = step(self.image_cursor.get(), self.image_count());
                self.image_cursor.set(next);
            }
            _ => {}
        }
    }

    /// Enter/Space on the focused chooser: pick the category or toggle the tag
    pub fn activate(&mut self) -> Result<(), FormError> {
        match self.active_control() {
            ProductControl::Category => {
                let category = CATEGORIES[self.category_cursor % CATEGORIES.len()];
                self.session
                    .set_value(FIELD_CATEGORY, Value::Text(category.to_string()))
            }
            ProductControl::Tags => {
                let tag = TAGS[self.tag_cursor % TAGS.len()];
                self.session.toggle_tag(FIELD_TAGS, tag).map(|_| ())
            }
            _ => Ok(()),
        }
    }

    /// Append an image and select it
    pub fn append_image(&mut self, image: ImageRef) -> Result<Uuid, FormError> {
        let id = self.session.append_image(FIELD_IMAGES, image)?;
        self.image_cursor.set(self.image_count().saturating_sub(1));
        Ok(id)
    }

    /// Remove the selected image
    pub fn remove_selected_image(&mut self) -> Result<ImageRef, FormError> {
        self.session
            .remove_image_at(FIELD_IMAGES, self.image_cursor.get())
    }

    /// Clear inputs and restore the session defaults
    pub fn reset(&mut self) {
        for field in [
            &mut self.product_name,
            &mut self.sku,
            &mut self.description,
            &mut self.price,
            &mut self.stock_quantity,
        ] {
            field.clear();
        }
        self.category_cursor = 0;
        self.tag_cursor = 0;
        self.active_field_index = 0;
        self.session.reset();
    }
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ProductForm {
    fn field_count(&self) -> usize {
        ProductControl::ALL.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(ProductControl::ALL.len() - 1);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_control() {
            ProductControl::ProductName => Some(&mut self.product_name),
            ProductControl::Sku => Some(&mut self.sku),
            ProductControl::Description => Some(&mut self.description),
            ProductControl::Price => Some(&mut self.price),
            ProductControl::StockQuantity => Some(&mut self.stock_quantity),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match ProductControl::ALL.get(index)? {
            ProductControl::ProductName => Some(&self.product_name),
            ProductControl::Sku => Some(&self.sku),
            ProductControl::Description => Some(&self.description),
            ProductControl::Price => Some(&self.price),
            ProductControl::StockQuantity => Some(&self.stock_quantity),
            _ => None,
        }
    }
    fn session(&self) -> &FormSession {
        &self.session
    }
    fn session_mut(&mut self) -> &mut FormSession {
        &mut self.session
    }
}
