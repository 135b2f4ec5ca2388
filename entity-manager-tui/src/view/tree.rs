//! Entity tree page

use entity_manager_core::services::{DeviceRow, EntityRow, IntegrationRow, TreeRow};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::App;
use crate::view::theme::{colors, Styles};

/// Display columns reserved for entity labels
const LABEL_WIDTH: usize = 32;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    match app.manager.empty_state() {
        Some(title) => render_empty(app, frame, area, &title),
        None => render_list(app, frame, area),
    }
}

fn render_empty(app: &App, frame: &mut Frame, area: Rect, title: &str) {
    let c = colors();
    let title_style = if app.manager.load_error().is_some() {
        Style::default().fg(c.error)
    } else {
        Style::default().fg(c.fg)
    };

    let hint = if app.manager.search().is_empty() {
        "  Press v to switch the view, Alt+r to reload"
    } else {
        "  Press Esc to clear the search"
    };

    let content = vec![
        Line::from(""),
        Line::styled(format!("  {title}"), title_style),
        Line::from(""),
        Line::styled(hint, Styles::muted()),
    ];
    frame.render_widget(Paragraph::new(content), area);
}

fn render_list(app: &App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app
        .rows()
        .iter()
        .map(|row| ListItem::new(row_line(row)))
        .collect();

    let list = List::new(items).highlight_style(Styles::selected());

    let mut state = ListState::default();
    state.select(Some(app.cursor.index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn row_line(row: &TreeRow) -> Line<'static> {
    match row {
        TreeRow::Integration(row) => integration_line(row),
        TreeRow::Device(row) => device_line(row),
        TreeRow::Entity(row) => entity_line(row),
    }
}

fn chevron(expanded: bool) -> &'static str {
    if expanded {
        "▾ "
    } else {
        "▸ "
    }
}

fn integration_line(row: &IntegrationRow) -> Line<'static> {
    let c = colors();
    Line::from(vec![
        Span::styled(chevron(row.expanded), Style::default().fg(c.highlight)),
        Span::styled(
            row.name.clone(),
            Style::default().fg(c.fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {} devices · {} shown · {} disabled / {} total",
                row.device_count, row.shown, row.disabled, row.total
            ),
            Styles::muted(),
        ),
    ])
}

fn device_line(row: &DeviceRow) -> Line<'static> {
    let c = colors();
    Line::from(vec![
        Span::raw("  "),
        Span::styled(chevron(row.expanded), Style::default().fg(c.highlight)),
        Span::styled(row.label.clone(), Style::default().fg(c.fg)),
        Span::styled(
            format!(
                "  {} shown · {} disabled / {} total",
                row.shown, row.disabled, row.total
            ),
            Styles::muted(),
        ),
    ])
}

fn entity_line(row: &EntityRow) -> Line<'static> {
    let c = colors();
    let checkbox = if row.selected { "[x] " } else { "[ ] " };
    let status_color = if row.entity.is_disabled {
        c.warning
    } else {
        c.success
    };

    let mut spans = vec![
        Span::raw("      "),
        Span::styled(checkbox, Style::default().fg(c.highlight)),
        Span::styled(fit(&row.entity.label(), LABEL_WIDTH), Style::default().fg(c.fg)),
        Span::raw("  "),
        Span::styled(row.entity.entity_id.to_string(), Styles::muted()),
        Span::raw("  "),
        Span::styled(row.status(), Style::default().fg(status_color)),
    ];
    if let Some(category) = row.entity.entity_category.as_deref() {
        spans.push(Span::styled(format!("  ({category})"), Styles::muted()));
    }
    Line::from(spans)
}

/// Pad or truncate to exactly `width` display columns
fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{text}{}", " ".repeat(width - text_width));
    }

    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out.push_str(&" ".repeat(width - used - 1));
    out
}
