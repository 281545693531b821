//! Typed payloads handed to the save collaborator

use crate::state::{FormError, ImageRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Sign-in credentials. The password never leaves the process in serialized form.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub account: String,
    #[serde(skip)]
    pub password: String,
    /// Keep the session after the app exits
    pub remember: bool,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .field("remember", &self.remember)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub product_name: String,
    pub sku: String,
    pub category: String,
    pub description: String,
    pub images: Vec<ImageRef>,
    pub tags: Vec<String>,
    pub price: f64,
    pub stock_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    SignIn(Credentials),
    Product(ProductPayload),
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::SignIn(_) => "sign_in",
            Payload::Product(_) => "product",
        }
    }
}

/// A validated form coerced for saving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Identifies this attempt; a retry of the same values gets a new key
    pub idempotency_key: Uuid,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Submission {
    pub fn new(payload: Payload) -> Self {
        Self {
            idempotency_key: Uuid::new_v4(),
            submitted_at: Utc::now(),
            payload,
        }
    }
}

/// Coercion failures after validation passed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("`{0}` has no value")]
    Missing(&'static str),
    #[error("`{field}` must be a whole non-negative number, got {value}")]
    NotACount { field: &'static str, value: f64 },
    #[error(transparent)]
    Form(#[from] FormError),
}
