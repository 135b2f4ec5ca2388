//! Top-level layout

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{App, InputMode};

use super::components;
use super::theme::{colors, Styles};
use super::tree;

pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();
    let show_search = app.input_mode == InputMode::Search || !app.search_input.is_empty();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                                  // title bar
            Constraint::Length(u16::from(show_search)),             // search line
            Constraint::Min(1),                                     // tree
            Constraint::Length(1),                                  // status bar
        ])
        .split(size);

    render_title_bar(app, frame, main_layout[0]);
    if show_search {
        render_search_line(app, frame, main_layout[1]);
    }
    render_content(app, frame, main_layout[2]);
    components::statusbar::render(app, frame, main_layout[3]);

    // Dialogs, then overlays on top
    components::modal::render(app, frame);
}

fn render_title_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let title = Paragraph::new(title_text(app))
        .style(Style::default().bg(c.highlight).fg(c.selected_fg));
    frame.render_widget(title, area);
}

fn title_text(app: &App) -> String {
    let stats = app.manager.stats();
    format!(
        " Entity Manager │ view: {} │ {} integrations · {} devices · {} entities · {} selected │ {}",
        app.manager.view_state(),
        stats.integrations,
        stats.devices,
        stats.entities,
        stats.selected,
        loaded_label(app.manager.last_loaded_at()),
    )
}

/// Time of the last successful load, in local time
fn loaded_label(loaded_at: Option<DateTime<Utc>>) -> String {
    match loaded_at {
        Some(at) => format!("loaded {}", at.with_timezone(&Local).format("%H:%M:%S")),
        None => "not loaded".to_string(),
    }
}

fn render_search_line(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let active = app.input_mode == InputMode::Search;
    let prefix_style = if active {
        Styles::hint_key()
    } else {
        Styles::muted()
    };
    let line = Line::from(vec![
        Span::styled(" / ", prefix_style),
        Span::styled(app.search_input.as_str(), Style::default().fg(c.fg)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if active && app.manager.modal().is_none() && app.overlay.is_none() {
        let width = unicode_width::UnicodeWidthStr::width(app.search_input.as_str());
        let x = area.x + 3 + u16::try_from(width).unwrap_or(u16::MAX);
        frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
    }
}

fn render_content(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let border_style = if app.manager.modal().is_some() {
        Styles::border()
    } else {
        Styles::border_focused()
    };

    let block = Block::default()
        .title(format!(" Entities ({}) ", app.manager.view_state()))
        .title_style(Style::default().fg(c.fg).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(c.bg).fg(c.fg));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    tree::render(app, frame, inner_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::test_app;

    #[test]
    fn loaded_label_formats_clock_time() {
        assert_eq!(loaded_label(None), "not loaded");
        let label = loaded_label(Some(Utc::now()));
        assert!(label.starts_with("loaded "));
        assert_eq!(label.len(), "loaded 00:00:00".len());
    }

    #[test]
    fn title_shows_stats_and_load_time() {
        let app = test_app();
        let title = title_text(&app);
        assert!(title.contains("view: disabled"));
        assert!(title.contains("4 integrations"));
        assert!(title.contains("│ loaded "));
    }
}
