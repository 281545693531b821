//! Submitting validated forms to an external collaborator

mod controller;
mod payload;

#[cfg(test)]
pub use controller::MockSaveCollaborator;
pub use controller::{
    PendingSave, SaveCollaborator, SubmissionController, SubmitError, DEFAULT_TIMEOUT,
};
pub use payload::{Credentials, Payload, PayloadError, ProductPayload, Submission};
