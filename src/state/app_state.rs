//! Application state definitions

use super::forms::{FormState, LoginForm, ProductForm};
use crate::schema::LoginVariant;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Login,
    #[default]
    Product,
}

impl View {
    pub fn toggle(self) -> Self {
        match self {
            View::Login => View::Product,
            View::Product => View::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Login => "Sign in",
            View::Product => "New product",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Message shown in a dialog until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    pub login_variant: LoginVariant,
    pub form: FormState,
    notices: VecDeque<Notice>,
}

impl AppState {
    pub fn new(view: View, login_variant: LoginVariant) -> Self {
        Self {
            current_view: view,
            login_variant,
            form: Self::fresh_form(view, login_variant),
            notices: VecDeque::new(),
        }
    }

    fn fresh_form(view: View, login_variant: LoginVariant) -> FormState {
        match view {
            View::Login => FormState::Login(LoginForm::new(login_variant)),
            View::Product => FormState::Product(ProductForm::new()),
        }
    }

    /// Switch screens; the new screen starts from a fresh session
    pub fn navigate(&mut self, view: View) {
        tracing::debug!(from = ?self.current_view, to = ?view, "navigate");
        self.current_view = view;
        self.form = Self::fresh_form(view, self.login_variant);
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Notice currently on screen
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn has_notice(&self) -> bool {
        !self.notices.is_empty()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(View::default(), LoginVariant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FIELD_PRODUCT_NAME;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_opens_product_screen() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Product);
        assert!(matches!(state.form, FormState::Product(_)));
    }

    #[test]
    fn test_navigate_creates_fresh_session() {
        let mut state = AppState::default();
        let first = state.form.session().id();
        state
            .form
            .session_mut()
            .input_text(FIELD_PRODUCT_NAME, "Tee")
            .unwrap();
        state.navigate(View::Login);
        assert!(matches!(state.form, FormState::Login(_)));
        state.navigate(View::Product);
        assert_ne!(state.form.session().id(), first);
        assert!(!state.form.session().is_dirty());
    }

    #[test]
    fn test_login_uses_configured_variant() {
        let state = AppState::new(View::Login, LoginVariant::Account);
        match &state.form {
            FormState::Login(form) => assert_eq!(form.variant, LoginVariant::Account),
            other => panic!("unexpected form {other:?}"),
        }
    }

    #[test]
    fn test_notices_are_fifo() {
        let mut state = AppState::default();
        assert!(!state.has_notice());
        state.push_notice(Notice::error("a", "first"));
        state.push_notice(Notice::info("b", "second"));
        assert_eq!(state.current_notice().map(|n| n.message.as_str()), Some("first"));
        state.dismiss_notice();
        assert_eq!(state.current_notice().map(|n| n.level), Some(NoticeLevel::Info));
        state.dismiss_notice();
        assert!(state.dismiss_notice().is_none());
    }

    #[test]
    fn test_view_toggle() {
        assert_eq!(View::Login.toggle(), View::Product);
        assert_eq!(View::Product.toggle(), View::Login);
    }
}
