//! Product form rendering

use super::field_renderer::{draw_chips, draw_field, draw_help_text, Chip, FIELD_HEIGHT};
use crate::platform::SUBMIT_SHORTCUT;
use crate::schema::{CATEGORIES, FIELD_CATEGORY, FIELD_IMAGES, FIELD_TAGS, TAGS};
use crate::state::{Form, ListState, ProductControl, ProductForm, Value};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the product form in two columns
pub fn draw_product(frame: &mut Frame, area: Rect, form: &ProductForm, busy: bool) {
    let block = Block::default()
        .title(" Product information ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Columns
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Help text
        ])
        .split(inner);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT), // Product name
            Constraint::Length(FIELD_HEIGHT), // SKU
            Constraint::Length(FIELD_HEIGHT), // Category
            Constraint::Min(FIELD_HEIGHT),    // Description
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(FIELD_HEIGHT),    // Images
            Constraint::Length(FIELD_HEIGHT), // Tags
            Constraint::Length(FIELD_HEIGHT), // Price
            Constraint::Length(FIELD_HEIGHT), // Stock quantity
        ])
        .split(columns[1]);

    let active = form.active_control();
    let session = &form.session;

    draw_field(
        frame,
        left[0],
        &form.product_name,
        session,
        active == ProductControl::ProductName,
    );
    draw_field(frame, left[1], &form.sku, session, active == ProductControl::Sku);
    draw_category(frame, left[2], form, active == ProductControl::Category);
    draw_field(
        frame,
        left[3],
        &form.description,
        session,
        active == ProductControl::Description,
    );

    draw_images(frame, right[0], form, active == ProductControl::Images);
    draw_tags(frame, right[1], form, active == ProductControl::Tags);
    draw_field(frame, right[2], &form.price, session, active == ProductControl::Price);
    draw_field(
        frame,
        right[3],
        &form.stock_quantity,
        session,
        active == ProductControl::StockQuantity,
    );

    let label = if busy { "Saving…" } else { "Save product" };
    render_button(frame, rows[1], label, form.is_submit_active(), !busy);

    draw_help_text(frame, rows[2], &help_text(active));
}

fn help_text(active: ProductControl) -> String {
    let specific = match active {
        ProductControl::Category => "←/→:choose  Enter:select",
        ProductControl::Tags => "←/→:choose  Space:toggle",
        ProductControl::Images => "a:add  ←/→:select  x:remove",
        ProductControl::Submit => "Enter:save",
        _ => "type to edit",
    };
    format!("Tab:next  {specific}  {SUBMIT_SHORTCUT}:save  F2:sign in")
}

fn draw_category(frame: &mut Frame, area: Rect, form: &ProductForm, is_active: bool) {
    let current = match form.session.value(FIELD_CATEGORY) {
        Some(Value::Text(s)) => s.as_str(),
        _ => "",
    };
    let chips: Vec<Chip> = CATEGORIES
        .iter()
        .map(|c| Chip {
            label: c,
            selected: *c == current,
        })
        .collect();
    let label = form
        .session
        .schema()
        .field(FIELD_CATEGORY)
        .map_or("Category", |f| f.label);
    draw_chips(
        frame,
        area,
        label,
        &chips,
        is_active.then_some(form.category_cursor),
        form.session.field_view(FIELD_CATEGORY).as_ref(),
    );
}

fn draw_tags(frame: &mut Frame, area: Rect, form: &ProductForm, is_active: bool) {
    let selected = form.session.values().tags(FIELD_TAGS).ok();
    let chips: Vec<Chip> = TAGS
        .iter()
        .map(|t| Chip {
            label: t,
            selected: selected.is_some_and(|set| set.contains(*t)),
        })
        .collect();
    let label = form
        .session
        .schema()
        .field(FIELD_TAGS)
        .map_or("Tags", |f| f.label);
    draw_chips(
        frame,
        area,
        label,
        &chips,
        is_active.then_some(form.tag_cursor),
        form.session.field_view(FIELD_TAGS).as_ref(),
    );
}

fn draw_images(frame: &mut Frame, area: Rect, form: &ProductForm, is_active: bool) {
    let Ok(images) = form.session.values().images(FIELD_IMAGES) else {
        return;
    };
    let view = form.session.field_view(FIELD_IMAGES);
    let has_error = view.as_ref().is_some_and(|v| v.error.is_some());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let mut lines: Vec<Line> = images
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let name = entry
                .item
                .uri
                .rsplit('/')
                .next()
                .and_then(|s| s.split('?').next())
                .unwrap_or(&entry.item.uri);
            let style = if is_active && idx == form.image_cursor() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!("{}. {name}", idx + 1), style))
        })
        .collect();

    match images.state() {
        ListState::Empty => lines.push(Line::from(Span::styled(
            "No images yet. Press a to add one",
            Style::default().fg(Color::DarkGray),
        ))),
        ListState::Partial => lines.push(Line::from(Span::styled(
            "+ add",
            Style::default().fg(Color::DarkGray),
        ))),
        ListState::Full => {}
    }

    let border = if has_error {
        Color::Red
    } else if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(format!(" Images {}/{} ", images.len(), images.capacity()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        chunks[0],
    );

    if let Some(error) = view.as_ref().and_then(|v| v.error) {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", error.message),
                Style::default().fg(Color::Red),
            )),
            chunks[1],
        );
    }
}
