//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Horizontal padding inside the border, both sides together
const PADDING: u16 = 4;
const MIN_HEIGHT: u16 = 5;

/// What a dialog shows and how it is tinted
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Used for the title and the border
    pub accent: Color,
    /// May contain `\n`
    pub message: &'a str,
    /// Key hint on the last row
    pub hint: Option<Line<'a>>,
    pub max_width: u16,
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let inner_width = config.max_width.saturating_sub(PADDING + 2).max(1) as usize;
    let lines = wrap_text(config.message, inner_width);

    let widest = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(config.title.chars().count()))
        .max()
        .unwrap_or(0) as u16;
    let hint_rows = if config.hint.is_some() { 2 } else { 0 };
    let area = centered(
        frame.area(),
        (widest + PADDING + 2).min(config.max_width),
        (lines.len() as u16 + hint_rows + 2).max(MIN_HEIGHT),
    );

    let mut content: Vec<Line> = lines.into_iter().map(Line::from).collect();
    if let Some(hint) = config.hint {
        content.push(Line::default());
        content.push(hint);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.accent))
        .title(Span::styled(
            format!(" {} ", config.title),
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(Color::Black));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Rect of the given size centered in `outer`, clamped to fit
fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

/// Greedy word wrap counted in characters, keeping blank paragraphs
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let separator = usize::from(!line.is_empty());
            let needed = line.chars().count() + separator + word.chars().count();
            if needed > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_counts_characters() {
        let lines = wrap_text("Đã lưu sản phẩm: Áo thun", 10);
        assert_eq!(lines, vec!["Đã lưu sản", "phẩm: Áo", "thun"]);
    }

    #[test]
    fn test_wrap_keeps_blank_paragraphs() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_centered_clamps_to_outer() {
        let outer = Rect::new(0, 0, 20, 6);
        assert_eq!(centered(outer, 10, 4), Rect::new(5, 1, 10, 4));
        assert_eq!(centered(outer, 40, 10), outer);
    }
}
