//! Form domain layer
//!
//! Values, list fields and the session that validates them are independent of
//! rendering. `form_state` binds a session to the edit buffers and focus order
//! of one screen.

mod error;
mod field;
mod form_state;
mod list_field;
mod session;
mod value;

pub use error::FormError;
pub use field::FormField;
#[cfg(test)]
pub use field::InputMode;
pub use form_state::{Form, FormState, LoginForm, ProductControl, ProductForm};
pub use list_field::{BoundedList, ImageRef, ListState, ToggleSet};
pub use session::{FieldView, FormSession};
pub use value::{FormValue, Value};
