//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Border and text styles. A disabled button stays dim even when focused.
fn button_styles(is_focused: bool, is_enabled: bool) -> (Style, Style) {
    match (is_enabled, is_focused) {
        (false, _) => (
            Style::default().fg(Color::DarkGray),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
        (true, true) => (
            Style::default().fg(Color::Cyan),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        (true, false) => (Style::default().fg(Color::Gray), Style::default()),
    }
}

/// Render a bordered, centered button
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_focused: bool,
    is_enabled: bool,
) {
    let (border_style, text_style) = button_styles(is_focused, is_enabled);
    let paragraph = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
