//! Entity tree and search line

use entity_manager_core::services::TreeRow;
use entity_manager_core::Command;

use crate::message::{SearchMessage, TreeMessage};
use crate::model::{App, BulkField, InputMode};

pub fn update(app: &mut App, msg: TreeMessage) {
    let len = app.rows().len();

    match msg {
        TreeMessage::SelectPrevious => app.cursor.select_previous(),
        TreeMessage::SelectNext => app.cursor.select_next(len),
        TreeMessage::SelectFirst => app.cursor.select_first(),
        TreeMessage::SelectLast => app.cursor.select_last(len),
        TreeMessage::PageUp => app.cursor.page_up(),
        TreeMessage::PageDown => app.cursor.page_down(len),

        TreeMessage::Toggle => toggle_row(app),
        TreeMessage::EnableRow => enable_row(app),
        TreeMessage::DisableRow => disable_row(app),
        TreeMessage::RenameRow => rename_row(app),

        TreeMessage::SelectAllVisible => {
            let ids = app.manager.visible_entity_ids();
            app.dispatch(Command::SelectAll(ids));
        }
        TreeMessage::DeselectAllVisible => {
            let ids = app.manager.visible_entity_ids();
            app.dispatch(Command::DeselectAll(ids));
        }
        TreeMessage::ClearSelection => app.dispatch(Command::ClearSelection),

        TreeMessage::EnableSelected => app.dispatch(Command::EnableSelected),
        TreeMessage::DisableSelected => app.dispatch(Command::DisableSelected),
        TreeMessage::BulkRename => {
            app.dispatch(Command::OpenBulkRename);
            app.bulk_field = BulkField::default();
        }
    }
}

fn toggle_row(app: &mut App) {
    let Some(row) = app.current_row() else {
        return;
    };
    let command = match row {
        TreeRow::Integration(row) => Command::ToggleIntegration(row.name),
        TreeRow::Device(row) => Command::ToggleDevice(row.device_key),
        TreeRow::Entity(row) => Command::ToggleSelection(row.entity.entity_id.clone()),
    };
    app.dispatch(command);
}

fn enable_row(app: &mut App) {
    let Some(row) = app.current_row() else {
        return;
    };
    let command = match row {
        TreeRow::Integration(row) => Command::EnableIntegration { name: row.name },
        TreeRow::Device(row) => Command::EnableDevice {
            integration: row.integration,
            device_key: row.device_key,
        },
        TreeRow::Entity(row) if !row.entity.is_disabled => {
            app.set_status(format!("{} is already enabled", row.entity.entity_id));
            return;
        }
        TreeRow::Entity(row) => Command::EnableEntity(row.entity.entity_id.clone()),
    };
    app.dispatch(command);
}

fn disable_row(app: &mut App) {
    match app.current_row() {
        Some(TreeRow::Entity(row)) if row.entity.is_disabled => {
            app.set_status(format!("{} is already disabled", row.entity.entity_id));
        }
        Some(TreeRow::Entity(row)) => {
            app.dispatch(Command::DisableEntity(row.entity.entity_id.clone()));
        }
        Some(_) => app.set_status("Check entities and press Alt+d to disable several at once"),
        None => {}
    }
}

fn rename_row(app: &mut App) {
    match app.current_row() {
        Some(TreeRow::Entity(row)) => app.dispatch(Command::OpenRename(row.entity.entity_id.clone())),
        Some(_) => app.set_status("Move to an entity row to rename it"),
        None => {}
    }
}

pub fn update_search(app: &mut App, msg: SearchMessage) {
    match msg {
        SearchMessage::Start => {
            app.input_mode = InputMode::Search;
        }
        SearchMessage::Input(c) => {
            app.search_input.push(c);
            apply_search(app);
        }
        SearchMessage::Backspace => {
            app.search_input.pop();
            apply_search(app);
        }
        SearchMessage::Submit => {
            app.input_mode = InputMode::Normal;
        }
        SearchMessage::Cancel => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            apply_search(app);
        }
    }
}

/// Filter as the user types
pub fn apply_search(app: &mut App) {
    let term = app.search_input.clone();
    app.dispatch(Command::SetSearch(term));
}
