//! Dialogs and overlays

use entity_manager_core::services::{
    BulkRenameSession, InlineMessage, Modal, PreviewItem, RenameField, RenamePhase, RenameSession,
};
use entity_manager_core::types::RenameTarget;
use entity_manager_core::Notice;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{App, BulkField, Overlay};

/// Draw the active dialog, then any overlay above it
pub fn render(app: &App, frame: &mut Frame) {
    match app.manager.modal() {
        Some(Modal::Rename(session)) => render_rename(frame, session),
        Some(Modal::BulkRename(session)) => render_bulk_rename(frame, session, app.bulk_field),
        None => {}
    }

    match &app.overlay {
        Some(Overlay::Help) => render_help(frame),
        Some(Overlay::Notice(notice)) => render_notice(frame, notice),
        None => {}
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Bordered dialog frame; returns the padded inner area
fn dialog(frame: &mut Frame, area: Rect, title: &str, border: Color) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(Color::Black));

    frame.render_widget(block, area);

    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    )
}

/// Label line plus the value line of a text input
fn input_lines(label: &str, value: &str, focused: bool) -> [Line<'static>; 2] {
    let label = Line::styled(label.to_string(), Style::default().fg(Color::Gray));
    let value = if focused {
        Line::styled(format!("  {value}▎"), Style::default().fg(Color::Cyan))
    } else {
        Line::styled(format!("  {value}"), Style::default().fg(Color::White))
    };
    [label, value]
}

fn message_line(message: Option<&InlineMessage>) -> Line<'static> {
    match message {
        Some(InlineMessage::Error(text)) => {
            Line::styled(text.clone(), Style::default().fg(Color::Red))
        }
        Some(InlineMessage::Success(text)) => {
            Line::styled(text.clone(), Style::default().fg(Color::Green))
        }
        None => Line::from(""),
    }
}

fn render_rename(frame: &mut Frame, session: &RenameSession) {
    let area = centered_rect(60, 14, frame.area());
    let inner = dialog(frame, area, "Rename Entity", Color::Cyan);

    let editing = session.phase() == RenamePhase::Editing;
    let mut lines = vec![Line::from(vec![
        Span::styled("Entity  ", Style::default().fg(Color::Gray)),
        Span::styled(
            session.entity_id().to_string(),
            Style::default().fg(Color::Yellow),
        ),
    ])];
    lines.push(Line::from(""));

    lines.extend(input_lines(
        "Friendly Name",
        &session.name_input,
        editing && session.focus == RenameField::Name,
    ));
    lines.push(Line::from(""));
    lines.extend(input_lines(
        "Entity ID",
        &session.new_id_input,
        editing && session.focus == RenameField::EntityId,
    ));
    lines.push(Line::from(""));

    lines.push(match session.phase() {
        RenamePhase::Committing => {
            Line::styled("Saving…", Style::default().fg(Color::Yellow))
        }
        _ => message_line(session.message()),
    });
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Tab switch field · Enter save · Esc cancel",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_bulk_rename(frame: &mut Frame, session: &BulkRenameSession, focus: BulkField) {
    let area = centered_rect(76, 24, frame.area());
    let inner = dialog(frame, area, "Bulk Rename", Color::Cyan);

    let mut lines = vec![Line::styled(
        format!("{} entities selected", session.entity_ids().len()),
        Style::default().fg(Color::Gray),
    )];
    lines.push(Line::from(""));

    // Target switch
    let target_focused = focus == BulkField::Target;
    let mut target_spans = vec![Span::styled("Rename  ", Style::default().fg(Color::Gray))];
    for target in [RenameTarget::Name, RenameTarget::EntityId] {
        let style = match (target == session.target(), target_focused) {
            (true, true) => Style::default().fg(Color::Black).bg(Color::Cyan),
            (true, false) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            (false, _) => Style::default().fg(Color::DarkGray),
        };
        target_spans.push(Span::styled(format!(" {} ", target.label()), style));
        target_spans.push(Span::raw(" "));
    }
    if target_focused {
        target_spans.push(Span::styled("(←→ to switch)", Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(target_spans));
    lines.push(Line::from(""));

    let editable = !session.is_committing();
    lines.extend(input_lines(
        "Find",
        session.find(),
        editable && focus == BulkField::Find,
    ));
    lines.extend(input_lines(
        "Replace with",
        session.replace(),
        editable && focus == BulkField::Replace,
    ));
    lines.push(Line::from(""));

    // Preview
    match session.preview() {
        Some(preview) => {
            lines.push(Line::styled(
                preview.summary(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            let room = usize::from(inner.height).saturating_sub(lines.len() + 4);
            for item in preview.items.iter().take(room) {
                lines.push(preview_line(item));
            }
            if preview.items.len() > room {
                lines.push(Line::styled(
                    format!("  … {} more", preview.items.len() - room),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
        None => lines.push(Line::styled(
            "Type a find string to preview",
            Style::default().fg(Color::DarkGray),
        )),
    }
    lines.push(Line::from(""));

    lines.push(if session.is_committing() {
        Line::styled("Applying…", Style::default().fg(Color::Yellow))
    } else {
        message_line(session.message())
    });

    let apply_hint = if session.can_commit() {
        "Enter apply · Tab next field · Esc cancel"
    } else {
        "Tab next field · Esc cancel"
    };
    lines.push(Line::styled(apply_hint, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn preview_line(item: &PreviewItem) -> Line<'static> {
    match item {
        PreviewItem::Changed { old, new, .. } => Line::from(vec![
            Span::styled(format!("  {old}"), Style::default().fg(Color::Gray)),
            Span::styled(" → ", Style::default().fg(Color::DarkGray)),
            Span::styled(new.clone(), Style::default().fg(Color::Green)),
        ]),
        PreviewItem::Skipped { entity_id } => Line::styled(
            format!("  {entity_id} (no match)"),
            Style::default().fg(Color::DarkGray),
        ),
    }
}

fn render_notice(frame: &mut Frame, notice: &Notice) {
    let (title, message) = match notice {
        Notice::Blocking { title, message } => (title.as_str(), message.clone()),
        other => ("Notice", other.to_string()),
    };

    let area = centered_rect(56, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    frame.render_widget(block, area);

    let inner = Rect::new(
        area.x + 2,
        area.y + 2,
        area.width.saturating_sub(4),
        area.height.saturating_sub(4),
    );

    let lines = vec![
        Line::styled(message, Style::default().fg(Color::White)),
        Line::from(""),
        Line::styled(
            "Press Esc or Enter to close",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<10}"), Style::default().fg(Color::Yellow)),
        Span::styled(desc, Style::default().fg(Color::White)),
    ])
}

fn help_heading(text: &'static str) -> Line<'static> {
    Line::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 28, frame.area());
    let inner = dialog(frame, area, "Help", Color::Cyan);

    let lines = vec![
        help_heading("Tree"),
        help_line("↑↓ / jk", "Move"),
        help_line("g / G", "First / last row"),
        help_line("Space", "Expand header · check entity"),
        help_line("e", "Enable entity, device or integration"),
        help_line("d", "Disable entity"),
        help_line("r", "Rename entity"),
        Line::from(""),
        help_heading("Selection"),
        help_line("a / Alt+a", "Check / uncheck all shown"),
        help_line("x", "Clear selection"),
        help_line("Alt+e", "Enable checked"),
        help_line("Alt+d", "Disable checked"),
        help_line("Alt+n", "Bulk rename checked"),
        Line::from(""),
        help_heading("View"),
        help_line("/", "Search"),
        help_line("v", "Disabled → enabled → all"),
        help_line("Alt+r", "Reload"),
        help_line("t", "Toggle theme"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::styled(
            "Press Esc to close the help",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
