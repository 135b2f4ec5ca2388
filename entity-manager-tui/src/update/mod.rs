//! src/update/mod.rs
//! Update layer: apply one `AppMessage` to the model.
//!
//!     update(app, msg)
//!         ├── Tree(..)    → tree::update          cursor, row and bulk actions
//!         ├── Search(..)  → tree::update_search   live filter
//!         ├── Modal(..)   → modal::update         rename / bulk rename inputs
//!         └── the rest is handled inline
//!
//! Anything that touches entity state goes through `App::dispatch`, which
//! runs the core command to completion on the app's runtime and surfaces the
//! resulting notice (blocking → overlay, otherwise → status line).
//!

mod modal;
mod tree;

use entity_manager_core::Command;

use crate::message::AppMessage;
use crate::model::{App, Overlay};

pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::Tree(tree_msg) => tree::update(app, tree_msg),

        AppMessage::Search(search_msg) => tree::update_search(app, search_msg),

        AppMessage::Modal(modal_msg) => modal::update(app, modal_msg),

        AppMessage::GoBack => {
            if app.search_input.is_empty() {
                app.clear_status();
            } else {
                app.search_input.clear();
                tree::apply_search(app);
            }
        }

        AppMessage::Refresh => {
            app.clear_status();
            app.dispatch(Command::Refresh);
        }

        AppMessage::CycleViewState => {
            let next = app.manager.view_state().next();
            app.dispatch(Command::SetViewState(next));
            app.set_status(format!("Showing {next} entities"));
        }

        AppMessage::ShowHelp => {
            app.overlay = Some(Overlay::Help);
        }

        AppMessage::ToggleTheme => app.toggle_theme(),

        AppMessage::CloseOverlay => {
            app.overlay = None;
        }

        AppMessage::Noop => {}
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use entity_manager_core::services::{BulkRenamePhase, Modal, TreeRow};
    use entity_manager_core::types::{EntityId, RenameTarget, ViewState};

    use super::*;
    use crate::message::{ModalMessage, SearchMessage, TreeMessage};
    use crate::model::test_support::test_app;
    use crate::model::{BulkField, InputMode};
    use crate::view::theme::Theme;

    fn tree(app: &mut App, msg: TreeMessage) {
        update(app, AppMessage::Tree(msg));
    }

    fn modal(app: &mut App, msg: ModalMessage) {
        update(app, AppMessage::Modal(msg));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            modal(app, ModalMessage::Input(c));
        }
    }

    fn current_entity(app: &App) -> EntityId {
        match app.current_row() {
            Some(TreeRow::Entity(row)) => row.entity.entity_id.clone(),
            other => panic!("expected entity row, got {other:?}"),
        }
    }

    /// Expand `hue` and its first device, leaving the cursor on the first entity
    fn open_first_device(app: &mut App) {
        tree(app, TreeMessage::SelectFirst);
        tree(app, TreeMessage::Toggle);
        tree(app, TreeMessage::SelectNext);
        tree(app, TreeMessage::Toggle);
        tree(app, TreeMessage::SelectNext);
    }

    #[test]
    fn starts_collapsed_on_disabled_view() {
        let app = test_app();
        assert_eq!(app.manager.view_state(), ViewState::Disabled);
        let rows = app.rows();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.depth() == 0));
    }

    #[test]
    fn toggle_expands_headers_and_checks_entities() {
        let mut app = test_app();
        open_first_device(&mut app);
        assert_eq!(current_entity(&app), EntityId::new("light.living_room"));

        tree(&mut app, TreeMessage::Toggle);
        assert!(app.manager.selection().contains("light.living_room"));
        tree(&mut app, TreeMessage::Toggle);
        assert!(app.manager.selection().is_empty());
    }

    #[test]
    fn cursor_is_clamped_when_rows_disappear() {
        let mut app = test_app();
        open_first_device(&mut app);
        tree(&mut app, TreeMessage::SelectLast);
        assert_eq!(app.cursor.index, 7);

        // esphome header: enabling it empties the integration in this view
        tree(&mut app, TreeMessage::EnableRow);
        assert_eq!(app.status_message.as_deref(), Some("Enabled 1 entities."));
        assert_eq!(app.rows().len(), 7);
        assert_eq!(app.cursor.index, 6);
    }

    #[test]
    fn enable_row_reloads_and_drops_entity() {
        let mut app = test_app();
        open_first_device(&mut app);
        tree(&mut app, TreeMessage::EnableRow);

        assert!(app.overlay.is_none());
        assert!(!app
            .manager
            .visible_entity_ids()
            .contains(&EntityId::new("light.living_room")));
    }

    #[test]
    fn enable_integration_from_header() {
        let mut app = test_app();
        tree(&mut app, TreeMessage::SelectFirst);
        tree(&mut app, TreeMessage::EnableRow);
        assert!(app.manager.snapshot().integration("hue").is_none());
        assert_eq!(app.rows().len(), 3);
    }

    #[test]
    fn bulk_disable_without_selection_warns() {
        let mut app = test_app();
        tree(&mut app, TreeMessage::DisableSelected);
        assert_eq!(app.status_message.as_deref(), Some("No entities selected"));
        assert!(app.overlay.is_none());
    }

    #[test]
    fn bulk_enable_reports_summary() {
        let mut app = test_app();
        update(&mut app, AppMessage::Search(SearchMessage::Start));
        for c in "power".chars() {
            update(&mut app, AppMessage::Search(SearchMessage::Input(c)));
        }
        update(&mut app, AppMessage::Search(SearchMessage::Submit));
        assert_eq!(app.input_mode, InputMode::Normal);

        tree(&mut app, TreeMessage::SelectAllVisible);
        assert_eq!(app.manager.selection().len(), 2);

        tree(&mut app, TreeMessage::EnableSelected);
        assert_eq!(app.status_message.as_deref(), Some("Enabled 2 entities."));
        assert!(app.manager.selection().is_empty());
        assert_eq!(
            app.manager.empty_state().as_deref(),
            Some("No disabled entities found")
        );
    }

    #[test]
    fn search_filters_live_and_esc_clears() {
        let mut app = test_app();
        update(&mut app, AppMessage::Search(SearchMessage::Start));
        for c in "Garage".chars() {
            update(&mut app, AppMessage::Search(SearchMessage::Input(c)));
        }
        assert_eq!(app.manager.search(), "garage");
        assert_eq!(app.rows().len(), 1);

        update(&mut app, AppMessage::Search(SearchMessage::Submit));
        update(&mut app, AppMessage::GoBack);
        assert!(app.search_input.is_empty());
        assert_eq!(app.rows().len(), 4);
    }

    #[test]
    fn cycle_view_state_reloads() {
        let mut app = test_app();
        update(&mut app, AppMessage::CycleViewState);
        assert_eq!(app.manager.view_state(), ViewState::Enabled);
        assert_eq!(app.status_message.as_deref(), Some("Showing enabled entities"));
    }

    #[test]
    fn single_rename_flow() {
        let mut app = test_app();
        open_first_device(&mut app);
        tree(&mut app, TreeMessage::RenameRow);

        // Replace the prefilled name
        for _ in 0.."Living Room Ceiling".len() {
            modal(&mut app, ModalMessage::Backspace);
        }
        type_text(&mut app, "Lounge Ceiling");
        modal(&mut app, ModalMessage::Confirm);

        let Some(Modal::Rename(session)) = app.manager.modal() else {
            panic!("dialog stays open until the settle");
        };
        assert_eq!(session.message().unwrap().text(), "Renamed successfully.");

        assert!(app.settle());
        assert!(app.manager.modal().is_none());
        let entity = app
            .manager
            .snapshot()
            .find_entity("light.living_room")
            .unwrap();
        assert_eq!(entity.name.as_deref(), Some("Lounge Ceiling"));
    }

    #[test]
    fn rename_without_changes_stays_open() {
        let mut app = test_app();
        open_first_device(&mut app);
        tree(&mut app, TreeMessage::RenameRow);
        modal(&mut app, ModalMessage::NextField);
        modal(&mut app, ModalMessage::Confirm);

        let Some(Modal::Rename(session)) = app.manager.modal() else {
            panic!("expected rename dialog");
        };
        assert_eq!(session.message().unwrap().text(), "No changes detected.");
        assert!(app.manager.pending().is_none());

        modal(&mut app, ModalMessage::Close);
        assert!(app.manager.modal().is_none());
    }

    #[test]
    fn bulk_rename_flow() {
        let mut app = test_app();
        open_first_device(&mut app);
        tree(&mut app, TreeMessage::Toggle);
        tree(&mut app, TreeMessage::SelectNext);
        tree(&mut app, TreeMessage::Toggle);
        tree(&mut app, TreeMessage::BulkRename);
        assert_eq!(app.bulk_field, BulkField::Find);

        type_text(&mut app, "Living Room");
        modal(&mut app, ModalMessage::NextField);
        type_text(&mut app, "Lounge");

        let Some(Modal::BulkRename(session)) = app.manager.modal() else {
            panic!("expected bulk rename dialog");
        };
        assert_eq!(session.target(), RenameTarget::Name);
        assert_eq!(session.preview().unwrap().match_count(), 2);

        modal(&mut app, ModalMessage::Confirm);
        let Some(Modal::BulkRename(session)) = app.manager.modal() else {
            panic!("dialog stays open until the settle");
        };
        assert_eq!(session.phase(), BulkRenamePhase::Succeeded);
        assert!(app.manager.selection().is_empty());

        assert!(app.settle());
        assert!(app.manager.modal().is_none());
        let lamp = app
            .manager
            .snapshot()
            .find_entity("light.living_room_lamp")
            .unwrap();
        assert_eq!(lamp.name.as_deref(), Some("Lounge Lamp"));
    }

    #[test]
    fn bulk_rename_without_matches_is_refused() {
        let mut app = test_app();
        open_first_device(&mut app);
        tree(&mut app, TreeMessage::Toggle);
        tree(&mut app, TreeMessage::BulkRename);
        type_text(&mut app, "zzz");
        modal(&mut app, ModalMessage::Confirm);

        assert_eq!(
            app.status_message.as_deref(),
            Some("Nothing to rename: no entity matches")
        );
        assert!(app.manager.pending().is_none());
    }

    #[test]
    fn bulk_target_toggles_to_entity_id() {
        let mut app = test_app();
        open_first_device(&mut app);
        tree(&mut app, TreeMessage::Toggle);
        tree(&mut app, TreeMessage::BulkRename);
        modal(&mut app, ModalMessage::PrevField);
        assert_eq!(app.bulk_field, BulkField::Target);
        modal(&mut app, ModalMessage::ToggleTarget);

        let Some(Modal::BulkRename(session)) = app.manager.modal() else {
            panic!("expected bulk rename dialog");
        };
        assert_eq!(session.target(), RenameTarget::EntityId);
    }

    #[test]
    fn help_and_theme() {
        let mut app = test_app();
        update(&mut app, AppMessage::ShowHelp);
        assert_eq!(app.overlay, Some(Overlay::Help));
        update(&mut app, AppMessage::CloseOverlay);
        assert!(app.overlay.is_none());

        update(&mut app, AppMessage::ToggleTheme);
        assert_eq!(app.config.theme, Theme::Light);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = test_app();
        update(&mut app, AppMessage::Quit);
        assert!(app.should_quit);
    }
}
