//! Status bar: key hints plus the latest status message

use entity_manager_core::services::{Modal, MutationState};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::{App, InputMode, Overlay};
use crate::view::theme::Styles;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = get_hints(app);

    let mut spans = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    if app.manager.mutation_state() == MutationState::Committing {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled("Applying…", Style::default().fg(Color::Yellow)));
    } else if let Some(ref msg) = app.status_message {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
    }

    let content = Line::from(spans);
    let paragraph = Paragraph::new(content).style(Styles::statusbar());

    frame.render_widget(paragraph, area);
}

fn get_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.overlay.is_some() {
        return vec![("Esc", "Close")];
    }

    match app.manager.modal() {
        Some(Modal::Rename(_)) => {
            return vec![("Tab", "Switch Field"), ("Enter", "Save"), ("Esc", "Cancel")];
        }
        Some(Modal::BulkRename(_)) => {
            return vec![
                ("Tab", "Next Field"),
                ("←→", "Target"),
                ("Enter", "Apply"),
                ("Esc", "Cancel"),
            ];
        }
        None => {}
    }

    if app.input_mode == InputMode::Search {
        return vec![("Enter", "Keep Filter"), ("Esc", "Clear")];
    }

    let mut hints = vec![
        ("↑↓", "Move"),
        ("Space", "Expand/Check"),
        ("e/d", "Enable/Disable"),
        ("r", "Rename"),
    ];
    if app.manager.selection().is_empty() {
        hints.push(("a", "Check All"));
    } else {
        hints.push(("Alt+e/d", "Bulk Enable/Disable"));
        hints.push(("Alt+n", "Bulk Rename"));
    }
    hints.push(("/", "Search"));
    hints.push(("v", "View"));
    hints.push(("?", "Help"));
    hints
}
