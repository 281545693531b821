//! Collaborators the app talks to outside the form core

mod images;
mod local;

pub use images::{ImageSource, SampleImages};
pub use local::{LocalBackend, DEFAULT_SIGN_IN_DELAY};
