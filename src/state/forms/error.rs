//! Errors raised by form mutations

use super::list_field::ListError;
use super::value::Value;
use thiserror::Error;

/// Rejected mutation of a form session; the form is left unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` expects a {expected} value, got {found}")]
    KindMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{field}: only {max} entries allowed")]
    ListFull { field: String, max: usize },
    #[error("{field}: no entry at position {index} ({len} entries)")]
    IndexOutOfBounds {
        field: String,
        index: usize,
        len: usize,
    },
}

impl FormError {
    pub(crate) fn mismatch(field: &str, expected: &'static str, found: &Value) -> Self {
        FormError::KindMismatch {
            field: field.to_string(),
            expected,
            found: found.kind_name(),
        }
    }

    pub(crate) fn from_list(field: &str, err: ListError) -> Self {
        match err {
            ListError::Full { max } => FormError::ListFull {
                field: field.to_string(),
                max,
            },
            ListError::OutOfBounds { index, len } => FormError::IndexOutOfBounds {
                field: field.to_string(),
                index,
                len,
            },
        }
    }

    /// Bounds violations are shown to the user as notices
    pub fn is_bounds_violation(&self) -> bool {
        matches!(
            self,
            FormError::ListFull { .. } | FormError::IndexOutOfBounds { .. }
        )
    }
}
