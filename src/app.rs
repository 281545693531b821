//! Application state and core logic

use crate::backend::{ImageSource, LocalBackend, SampleImages};
use crate::config::AppConfig;
use crate::state::{AppState, FormError, FormState, Notice, ProductControl, View};
use crate::submit::{Payload, PendingSave, SaveCollaborator, SubmissionController, SubmitError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Second Ctrl+C within this window quits
const DOUBLE_CTRL_C_WINDOW: Duration = Duration::from_secs(1);

/// A save running on a background task
struct PendingSubmission {
    /// Session the submission was taken from
    session_id: Uuid,
    save: PendingSave,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Collaborator that persists submissions
    backend: Arc<dyn SaveCollaborator>,
    /// Where new product images come from
    images: Box<dyn ImageSource>,
    controller: SubmissionController,
    pending: Option<PendingSubmission>,
    /// Whether the app should quit
    quit: bool,
    /// One-line feedback in the status bar
    pub status_message: Option<String>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App instance backed by local storage
    pub fn new(config: &AppConfig) -> Self {
        let backend = LocalBackend::new(config.data_dir(), config.sign_in_delay());
        tracing::info!(data_dir = %backend.data_dir().display(), "using local backend");
        Self::with_backend(config, Arc::new(backend))
    }

    pub fn with_backend(config: &AppConfig, backend: Arc<dyn SaveCollaborator>) -> Self {
        Self {
            state: AppState::new(config.start_screen(), config.login_variant()),
            backend,
            images: Box::new(SampleImages),
            controller: SubmissionController::new(config.submit_timeout()),
            pending: None,
            quit: false,
            status_message: None,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether a save is in flight
    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return Ok(());
        }
        self.last_ctrl_c = None;

        // Notice dialog is modal
        if self.state.has_notice() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_notice();
            }
            return Ok(());
        }

        self.status_message = None;

        if key.code == KeyCode::F(2) {
            if self.is_busy() {
                self.status_message = Some("Wait for the current save to finish".to_string());
            } else {
                self.state.navigate(self.state.current_view.toggle());
            }
            return Ok(());
        }

        let is_submit_key = key.code == KeyCode::Char('s')
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER));
        if is_submit_key {
            self.submit();
            return Ok(());
        }

        let result = match self.state.current_view {
            View::Login => self.handle_login_key(key),
            View::Product => self.handle_product_key(key),
        };
        if let Err(err) = result {
            self.report_form_error(err);
        }
        Ok(())
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        match self.last_ctrl_c {
            Some(prev) if now.duration_since(prev) <= DOUBLE_CTRL_C_WINDOW => self.quit = true,
            _ => {
                self.last_ctrl_c = Some(now);
                self.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    /// Keys shared by every form: focus movement, typing, submit button
    fn handle_common_key(&mut self, key: KeyEvent) -> Result<bool, FormError> {
        if key.code == KeyCode::Enter && self.state.form.is_submit_active() {
            self.submit();
            return Ok(true);
        }
        let form = &mut self.state.form;
        match key.code {
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Enter if form.is_active_field_multiline() => form.input_char('\n')?,
            KeyCode::Enter if form.is_text_active() => form.next_field(),
            KeyCode::Backspace if form.is_text_active() => form.backspace()?,
            KeyCode::Char(c) if form.is_text_active() => form.input_char(c)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Result<(), FormError> {
        if self.handle_common_key(key)? {
            return Ok(());
        }
        let FormState::Login(form) = &mut self.state.form else {
            return Ok(());
        };
        if form.is_remember_active() && matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            form.toggle_remember()?;
        }
        Ok(())
    }

    fn handle_product_key(&mut self, key: KeyEvent) -> Result<(), FormError> {
        if self.handle_common_key(key)? {
            return Ok(());
        }
        let FormState::Product(form) = &mut self.state.form else {
            return Ok(());
        };
        let control = form.active_control();
        match key.code {
            KeyCode::Left => form.move_cursor(false),
            KeyCode::Right => form.move_cursor(true),
            KeyCode::Enter | KeyCode::Char(' ') => form.activate()?,
            KeyCode::Char('a') if control == ProductControl::Images => {
                let image = self.images.next_image(form.image_count());
                form.append_image(image)?;
            }
            KeyCode::Char('x') | KeyCode::Delete if control == ProductControl::Images => {
                form.remove_selected_image()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn report_form_error(&mut self, err: FormError) {
        if err.is_bounds_violation() {
            let message = match &err {
                FormError::ListFull { max, .. } => format!("You can add at most {max} images"),
                _ => "There is no image to remove".to_string(),
            };
            self.state.push_notice(Notice::info("Notice", message));
        } else {
            tracing::warn!(error = %err, "form input rejected");
            self.state.push_notice(Notice::error("Error", err.to_string()));
        }
    }

    /// Validate the current form and start saving it in the background
    pub fn submit(&mut self) {
        let session = self.state.form.session_mut();
        let session_id = session.id();
        match self.controller.submit(session, Arc::clone(&self.backend)) {
            Ok(save) => {
                self.pending = Some(PendingSubmission { session_id, save });
                self.status_message = Some("Saving…".to_string());
            }
            Err(SubmitError::Blocked(errors)) => {
                self.status_message = Some(format!("{} field(s) need attention", errors.len()));
            }
            Err(SubmitError::InFlight) => {
                self.status_message = Some("A save is already in progress".to_string());
            }
            Err(err) => self.state.push_notice(Notice::error("Error", err.to_string())),
        }
    }

    /// Pick up the result of a background save, if it has arrived
    pub fn poll_submission(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some(result) = pending.save.try_result() else {
            return;
        };
        let Some(pending) = self.pending.take() else {
            return;
        };
        self.controller.complete(&result);
        self.status_message = None;
        self.finish_submission(pending, result);
    }

    fn finish_submission(&mut self, pending: PendingSubmission, result: Result<(), SubmitError>) {
        let same_session = self.state.form.session().id() == pending.session_id;
        match (result, pending.save.submission.payload) {
            (Ok(()), Payload::Product(product)) => {
                self.state.push_notice(Notice::info(
                    "Success",
                    format!("Saved product: {}", product.product_name),
                ));
                if let (true, FormState::Product(form)) = (same_session, &mut self.state.form) {
                    form.reset();
                }
            }
            (Ok(()), Payload::SignIn(credentials)) => {
                self.state.push_notice(Notice::info(
                    "Success",
                    format!("Welcome {}", credentials.account),
                ));
                self.state.navigate(View::Product);
            }
            (Err(err @ SubmitError::TimedOut(_)), _) => {
                self.state.push_notice(Notice::error("Timed out", err.to_string()));
            }
            (Err(err), _) => {
                self.state.push_notice(Notice::error("Save failed", err.to_string()));
            }
        }
    }
}
