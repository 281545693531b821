//! Submission controller: gate on validity, guard re-entry, call the collaborator

use super::payload::{PayloadError, Submission};
use crate::schema::FieldErrors;
use crate::state::FormSession;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot::{self, error::TryRecvError};
use uuid::Uuid;

/// Default upper bound for a single save call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// External collaborator that persists a submission
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaveCollaborator: Send + Sync {
    /// Save a submission. Called at most once per submission.
    async fn save(&self, submission: &Submission) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    InFlight,
    #[error("{} field(s) need attention", .0.len())]
    Blocked(FieldErrors),
    #[error("{0}")]
    External(String),
    #[error("no response after {} seconds", .0.as_secs())]
    TimedOut(Duration),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Tracks the single submission allowed in flight per form
#[derive(Debug)]
pub struct SubmissionController {
    in_flight: Option<Uuid>,
    timeout: Duration,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl SubmissionController {
    pub fn new(timeout: Duration) -> Self {
        Self {
            in_flight: None,
            timeout,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validate and coerce the form, then take the in-flight guard.
    ///
    /// Every field counts as touched afterwards, so all errors become visible.
    pub fn begin(&mut self, session: &mut FormSession) -> Result<Submission, SubmitError> {
        if let Some(key) = self.in_flight {
            tracing::warn!(form = session.schema().id, %key, "submit ignored while in flight");
            return Err(SubmitError::InFlight);
        }
        session.mark_submit_attempted();
        if !session.is_valid() {
            let errors = session.errors().clone();
            tracing::warn!(
                form = session.schema().id,
                fields = ?errors.keys().collect::<Vec<_>>(),
                "submit blocked by validation"
            );
            return Err(SubmitError::Blocked(errors));
        }
        let payload = session.schema().build_payload(session.values())?;
        let submission = Submission::new(payload);
        self.in_flight = Some(submission.idempotency_key);
        tracing::info!(
            form = session.schema().id,
            key = %submission.idempotency_key,
            kind = submission.payload.kind(),
            "submission started"
        );
        Ok(submission)
    }

    /// Release the guard once the collaborator answered, whatever the outcome
    pub fn complete(&mut self, result: &Result<(), SubmitError>) {
        let key = self.in_flight.take();
        match result {
            Ok(()) => tracing::info!(key = ?key, "submission saved"),
            Err(err) => tracing::warn!(key = ?key, error = %err, "submission failed"),
        }
    }

    /// Begin a submission and issue the save on a background task.
    ///
    /// The guard stays taken until [`complete`](Self::complete) is called with
    /// the resolved result. Form values are never touched here, so a failed save
    /// can be retried as is.
    pub fn submit(
        &mut self,
        session: &mut FormSession,
        saver: Arc<dyn SaveCollaborator>,
    ) -> Result<PendingSave, SubmitError> {
        let submission = self.begin(session)?;
        let (tx, rx) = oneshot::channel();
        let timeout = self.timeout;
        let task_submission = submission.clone();
        tokio::spawn(async move {
            let result = dispatch(saver.as_ref(), &task_submission, timeout).await;
            // Receiver is gone only if the app already quit
            let _ = tx.send(result);
        });
        Ok(PendingSave {
            submission,
            result: rx,
        })
    }
}

/// A save issued by [`SubmissionController::submit`] that has not resolved yet
#[derive(Debug)]
pub struct PendingSave {
    pub submission: Submission,
    result: oneshot::Receiver<Result<(), SubmitError>>,
}

impl PendingSave {
    /// The save result if it has arrived, without waiting
    pub fn try_result(&mut self) -> Option<Result<(), SubmitError>> {
        match self.result.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(SubmitError::External(
                "save task stopped unexpectedly".to_string(),
            ))),
        }
    }
}

/// Invoke the collaborator exactly once, bounded by `timeout`
pub async fn dispatch(
    saver: &dyn SaveCollaborator,
    submission: &Submission,
    timeout: Duration,
) -> Result<(), SubmitError> {
    match tokio::time::timeout(timeout, saver.save(submission)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(SubmitError::External(format!("{err:#}"))),
        Err(_) => Err(SubmitError::TimedOut(timeout)),
    }
}
