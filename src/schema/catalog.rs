//! Built-in schemas for the sign-in and product screens

use super::{FieldKind, FieldSpec, Rule, Schema};
use crate::state::{FormValue, Value};
use crate::submit::{Credentials, Payload, PayloadError, ProductPayload};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_USERNAME: &str = "username";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_REMEMBER: &str = "rememberMe";

pub const FIELD_PRODUCT_NAME: &str = "productName";
pub const FIELD_SKU: &str = "sku";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_IMAGES: &str = "images";
pub const FIELD_TAGS: &str = "tags";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_STOCK_QUANTITY: &str = "stockQuantity";

pub const CATEGORIES: &[&str] = &["Áo", "Quần", "Phụ kiện"];
pub const TAGS: &[&str] = &["Bán chạy", "Mới về", "Giảm giá", "Hàng hiệu", "Unisex"];
pub const MAX_IMAGES: usize = 5;
pub const MIN_PRICE: f64 = 90_000.0;

/// Which sign-in form the login screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginVariant {
    /// Email address plus a password of at least 8 characters
    #[default]
    Email,
    /// Alphanumeric account name plus the full password policy
    Account,
}

impl LoginVariant {
    pub fn schema(self) -> &'static Schema {
        match self {
            LoginVariant::Email => email_login(),
            LoginVariant::Account => account_login(),
        }
    }

    /// Name of the identifier field for this variant
    pub fn identifier_field(self) -> &'static str {
        match self {
            LoginVariant::Email => FIELD_EMAIL,
            LoginVariant::Account => FIELD_USERNAME,
        }
    }
}

static EMAIL_LOGIN: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(
        "email_login",
        vec![
            FieldSpec::new(FIELD_EMAIL, "Email", FieldKind::Text { multiline: false })
                .rule(Rule::required("Email is required"))
                .rule(Rule::pattern(
                    r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
                    "Email format is invalid",
                )),
            FieldSpec::new(FIELD_PASSWORD, "Password", FieldKind::Secret)
                .rule(Rule::required("Password is required"))
                .rule(Rule::min_len(8, "Password must be at least 8 characters")),
            FieldSpec::new(FIELD_REMEMBER, "Keep me signed in", FieldKind::Flag),
        ],
        |form| credentials(form, FIELD_EMAIL),
    )
});

static ACCOUNT_LOGIN: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(
        "account_login",
        vec![
            FieldSpec::new(
                FIELD_USERNAME,
                "Username",
                FieldKind::Text { multiline: false },
            )
            .rule(Rule::required("Username is required"))
            .rule(Rule::min_len(5, "Username must be at least 5 characters"))
            .rule(Rule::pattern(
                "^[A-Za-z0-9]+$",
                "Username may only contain letters and digits",
            )),
            FieldSpec::new(FIELD_PASSWORD, "Password", FieldKind::Secret)
                .rule(Rule::required("Password is required"))
                .rule(Rule::min_len(8, "Password must be at least 8 characters"))
                .rule(Rule::pattern(
                    "[A-Z]",
                    "Password must contain an uppercase letter",
                ))
                .rule(Rule::pattern(
                    "[a-z]",
                    "Password must contain a lowercase letter",
                ))
                .rule(Rule::pattern("[0-9]", "Password must contain a digit"))
                .rule(Rule::pattern(
                    "[@$!%*?&]",
                    "Password must contain one of @$!%*?&",
                ))
                .rule(Rule::pattern(
                    "^[A-Za-z0-9@$!%*?&]+$",
                    "Password may only contain letters, digits and @$!%*?&",
                ))
                .rule(Rule::cross_field(
                    password_avoids_username,
                    "Password must not contain the username",
                )),
            FieldSpec::new(FIELD_REMEMBER, "Keep me signed in", FieldKind::Flag),
        ],
        |form| credentials(form, FIELD_USERNAME),
    )
});

static PRODUCT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(
        "product",
        vec![
            FieldSpec::new(
                FIELD_PRODUCT_NAME,
                "Product name *",
                FieldKind::Text { multiline: false },
            )
            .rule(Rule::required("Product name is required")),
            FieldSpec::new(FIELD_SKU, "SKU *", FieldKind::Text { multiline: false })
                .rule(Rule::min_len(3, "SKU must be at least 3 characters")),
            FieldSpec::new(FIELD_CATEGORY, "Category *", FieldKind::Choice(CATEGORIES))
                .rule(Rule::required("Please choose a category")),
            FieldSpec::new(
                FIELD_DESCRIPTION,
                "Description *",
                FieldKind::Text { multiline: true },
            )
            .rule(Rule::required("Description is required")),
            FieldSpec::new(
                FIELD_IMAGES,
                "Images (max 5)",
                FieldKind::Images { max: MAX_IMAGES },
            )
            .rule(Rule::max_len(MAX_IMAGES, "At most 5 images")),
            FieldSpec::new(FIELD_TAGS, "Tags *", FieldKind::Tags(TAGS))
                .rule(Rule::required("Select at least 1 tag")),
            FieldSpec::new(FIELD_PRICE, "Price (VND)", FieldKind::Numeric)
                .rule(Rule::at_least(MIN_PRICE, "Price must be at least 90,000 VND")),
            FieldSpec::new(FIELD_STOCK_QUANTITY, "Stock quantity", FieldKind::Numeric)
                .rule(Rule::required("Please enter the stock quantity")),
        ],
        product_payload,
    )
});

pub fn email_login() -> &'static Schema {
    &EMAIL_LOGIN
}

pub fn account_login() -> &'static Schema {
    &ACCOUNT_LOGIN
}

pub fn product() -> &'static Schema {
    &PRODUCT
}

/// Case-insensitive; an empty username never matches
fn password_avoids_username(password: &Value, form: &FormValue) -> bool {
    let (Value::Text(password), Ok(username)) = (password, form.text(FIELD_USERNAME)) else {
        return true;
    };
    username.is_empty() || !password.to_lowercase().contains(&username.to_lowercase())
}

fn credentials(form: &FormValue, identifier: &'static str) -> Result<Payload, PayloadError> {
    Ok(Payload::SignIn(Credentials {
        account: form.text(identifier)?.to_string(),
        password: form.text(FIELD_PASSWORD)?.to_string(),
        remember: form.flag(FIELD_REMEMBER)?,
    }))
}

fn product_payload(form: &FormValue) -> Result<Payload, PayloadError> {
    let price = form
        .number(FIELD_PRICE)?
        .ok_or(PayloadError::Missing(FIELD_PRICE))?;
    let stock = form
        .number(FIELD_STOCK_QUANTITY)?
        .ok_or(PayloadError::Missing(FIELD_STOCK_QUANTITY))?;
    if stock < 0.0 || stock.fract() != 0.0 || stock > f64::from(u32::MAX) {
        return Err(PayloadError::NotACount {
            field: FIELD_STOCK_QUANTITY,
            value: stock,
        });
    }

    Ok(Payload::Product(ProductPayload {
        product_name: form.text(FIELD_PRODUCT_NAME)?.to_string(),
        sku: form.text(FIELD_SKU)?.to_string(),
        category: form.text(FIELD_CATEGORY)?.to_string(),
        description: form.text(FIELD_DESCRIPTION)?.to_string(),
        images: form
            .images(FIELD_IMAGES)?
            .iter()
            .map(|entry| entry.item.clone())
            .collect(),
        tags: declared_order(form.tags(FIELD_TAGS)?.iter(), TAGS),
        price,
        stock_quantity: stock as u32,
    }))
}

/// Selected options in the order the schema declares them
fn declared_order<'a>(
    selected: impl Iterator<Item = &'a String>,
    options: &[&str],
) -> Vec<String> {
    let mut selected: Vec<&String> = selected.collect();
    selected.sort_by_key(|tag| options.iter().position(|o| *o == tag.as_str()));
    selected.into_iter().cloned().collect()
}
