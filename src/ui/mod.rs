//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::FormState;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match &app.state.form {
        FormState::Login(form) => forms::draw_login(frame, main_area, form, app.is_busy()),
        FormState::Product(form) => forms::draw_product(frame, main_area, form, app.is_busy()),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Notices are modal and drawn last
    if let Some(notice) = app.state.current_notice() {
        components::render_notice_dialog(frame, notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::state::{Notice, View};
    use crate::submit::MockSaveCollaborator;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app(view: View) -> App {
        let config = AppConfig {
            start_screen: Some(view),
            ..Default::default()
        };
        App::with_backend(&config, Arc::new(MockSaveCollaborator::new()))
    }

    #[test]
    fn test_pristine_form_shows_no_errors() {
        let screen = render(&app(View::Product));
        assert!(screen.contains("Product information"));
        assert!(!screen.contains("Product name is required"));
    }

    #[test]
    fn test_submit_attempt_reveals_errors() {
        let mut app = app(View::Product);
        app.state.form.session_mut().mark_submit_attempted();
        let screen = render(&app);
        assert!(screen.contains("Product name is required"));
        assert!(screen.contains("Select at least 1 tag"));
    }

    #[test]
    fn test_login_masks_password() {
        let mut app = app(View::Login);
        app.state.form.next_field();
        for c in "hunter22".chars() {
            app.state.form.input_char(c).unwrap();
        }
        let screen = render(&app);
        assert!(!screen.contains("hunter22"));
        assert!(screen.contains("••••••••"));
    }

    #[test]
    fn test_login_draws_remember_checkbox() {
        let mut app = app(View::Login);
        assert!(render(&app).contains("[ ] Keep me signed in"));
        if let FormState::Login(form) = &mut app.state.form {
            form.toggle_remember().unwrap();
        }
        assert!(render(&app).contains("[x] Keep me signed in"));
    }

    #[test]
    fn test_notice_is_drawn() {
        let mut app = app(View::Product);
        app.state.push_notice(Notice::info("Success", "Saved product: Tee"));
        let screen = render(&app);
        assert!(screen.contains("Saved product: Tee"));
    }
}
