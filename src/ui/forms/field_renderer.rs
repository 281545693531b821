//! Field rendering utilities for forms

use crate::state::{FieldView, FormField, FormSession};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a single-line field: bordered input plus the error line
pub const FIELD_HEIGHT: u16 = 4;

fn border_style(is_active: bool, has_error: bool) -> Style {
    if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Split off the bottom row for the error message
fn split_error_row(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn draw_error_row(frame: &mut Frame, area: Rect, view: Option<&FieldView<'_>>) {
    if let Some(error) = view.and_then(|v| v.error) {
        let line = Line::from(Span::styled(
            format!(" {}", error.message),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Draw a one-line checkbox such as `[x] Keep me signed in`
pub fn draw_checkbox(frame: &mut Frame, area: Rect, label: &str, checked: bool, is_active: bool) {
    let mark = if checked { "[x]" } else { "[ ]" };
    let style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let line = Line::from(vec![
        Span::styled(format!(" {mark} "), style),
        Span::styled(label.to_string(), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw a typed input with its validation state
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    session: &FormSession,
    is_active: bool,
) {
    let view = session.field_view(field.name);
    let has_error = view.as_ref().is_some_and(|v| v.error.is_some());
    let (input_area, error_area) = split_error_row(area);

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if field.is_multiline {
        let mut lines: Vec<Line> = display_str
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, has_error));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), input_area);
    draw_error_row(frame, error_area, view.as_ref());
}

/// One selectable option in a chip row
pub struct Chip<'a> {
    pub label: &'a str,
    pub selected: bool,
}

/// Draw a row of chips; `cursor` marks the focused chip while the row is active
pub fn draw_chips(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    chips: &[Chip<'_>],
    cursor: Option<usize>,
    view: Option<&FieldView<'_>>,
) {
    let has_error = view.is_some_and(|v| v.error.is_some());
    let (input_area, error_area) = split_error_row(area);

    let mut spans = Vec::with_capacity(chips.len() * 2);
    for (idx, chip) in chips.iter().enumerate() {
        let mut style = if chip.selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let focused = cursor == Some(idx);
        if focused {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        let text = if focused {
            format!("[{}]", chip.label)
        } else {
            format!(" {} ", chip.label)
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style(cursor.is_some(), has_error));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .block(block),
        input_area,
    );
    draw_error_row(frame, error_area, view);
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}
