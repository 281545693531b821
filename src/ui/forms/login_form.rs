//! Sign-in form rendering

use super::field_renderer::{draw_checkbox, draw_field, draw_help_text, FIELD_HEIGHT};
use crate::platform::SUBMIT_SHORTCUT;
use crate::schema::{LoginVariant, FIELD_REMEMBER};
use crate::state::{Form, LoginForm};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the sign-in form
pub fn draw_login(frame: &mut Frame, area: Rect, form: &LoginForm, busy: bool) {
    let title = match form.variant {
        LoginVariant::Email => " Sign in ",
        LoginVariant::Account => " Sign in with account ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),  // Identifier
            Constraint::Length(FIELD_HEIGHT),  // Password
            Constraint::Length(2),             // Remember me
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),
            Constraint::Length(1), // Help text
        ])
        .margin(1)
        .split(inner);

    let active = form.active_field();
    draw_field(frame, chunks[0], &form.identifier, &form.session, active == 0);
    draw_field(frame, chunks[1], &form.password, &form.session, active == 1);

    let remember_label = form
        .session
        .schema()
        .field(FIELD_REMEMBER)
        .map_or("Keep me signed in", |f| f.label);
    draw_checkbox(
        frame,
        chunks[2],
        remember_label,
        form.remember(),
        form.is_remember_active(),
    );

    let label = if busy { "Signing in…" } else { "Sign in" };
    render_button(frame, chunks[3], label, form.is_submit_active(), !busy);

    draw_help_text(
        frame,
        chunks[5],
        &format!("Tab:next  Space:check  Enter:submit  {SUBMIT_SHORTCUT}:submit  F2:product"),
    );
}
