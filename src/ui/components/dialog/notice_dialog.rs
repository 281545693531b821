//! Notice dialog component

use super::base::{render_dialog, DialogConfig};
use crate::state::{Notice, NoticeLevel};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render a notice overlay centered on the screen
pub fn render_notice_dialog(frame: &mut Frame, notice: &Notice) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to dismiss"),
    ]);

    let color = match notice.level {
        NoticeLevel::Info => Color::Green,
        NoticeLevel::Error => Color::Red,
    };

    render_dialog(
        frame,
        DialogConfig {
            title: &notice.title,
            accent: color,
            message: &notice.message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
