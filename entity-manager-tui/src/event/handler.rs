//! Event handler

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use entity_manager_core::services::Modal;

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, ModalMessage, SearchMessage, TreeMessage};
use crate::model::{App, BulkField, InputMode, Overlay};

/// Wait up to `timeout` for the next terminal event
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Translate an event into a message
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // Resize redraws on the next loop iteration
        _ => AppMessage::Noop,
    }
}

fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // Press only; Release/Repeat would double every key on Windows
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    // Popups sit above dialogs, dialogs above the search line
    if let Some(overlay) = &app.overlay {
        return handle_overlay_keys(key, overlay);
    }
    if let Some(modal) = app.manager.modal() {
        return handle_modal_keys(key, modal, app.bulk_field);
    }
    if app.input_mode == InputMode::Search {
        return handle_search_keys(key);
    }

    handle_tree_keys(key)
}

fn handle_overlay_keys(key: KeyEvent, overlay: &Overlay) -> AppMessage {
    match (overlay, key.code) {
        (_, KeyCode::Esc | KeyCode::Enter) => AppMessage::CloseOverlay,
        (Overlay::Help, KeyCode::Char('?' | 'q')) => AppMessage::CloseOverlay,
        _ => AppMessage::Noop,
    }
}

fn handle_modal_keys(key: KeyEvent, modal: &Modal, bulk_field: BulkField) -> AppMessage {
    let msg = match key.code {
        KeyCode::Esc => ModalMessage::Close,
        KeyCode::Enter => ModalMessage::Confirm,
        KeyCode::Tab => ModalMessage::NextField,
        KeyCode::BackTab => ModalMessage::PrevField,
        KeyCode::Backspace => ModalMessage::Backspace,

        // The target row of the bulk dialog is a switch, not a text input
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if matches!(modal, Modal::BulkRename(_)) && bulk_field == BulkField::Target =>
        {
            ModalMessage::ToggleTarget
        }
        KeyCode::Char(_)
            if matches!(modal, Modal::BulkRename(_)) && bulk_field == BulkField::Target =>
        {
            return AppMessage::Noop;
        }

        KeyCode::Char(c) if is_text_input(&key) => ModalMessage::Input(c),
        _ => return AppMessage::Noop,
    };
    AppMessage::Modal(msg)
}

fn handle_search_keys(key: KeyEvent) -> AppMessage {
    let msg = match key.code {
        KeyCode::Esc => SearchMessage::Cancel,
        KeyCode::Enter => SearchMessage::Submit,
        KeyCode::Backspace => SearchMessage::Backspace,
        KeyCode::Char(c) if is_text_input(&key) => SearchMessage::Input(c),
        _ => return AppMessage::Noop,
    };
    AppMessage::Search(msg)
}

fn handle_tree_keys(key: KeyEvent) -> AppMessage {
    // Global shortcuts
    if DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::HELP.matches(&key) || DefaultKeymap::HELP_ALT.matches(&key) {
        return AppMessage::ShowHelp;
    }
    if DefaultKeymap::REFRESH.matches(&key) || DefaultKeymap::REFRESH_F5.matches(&key) {
        return AppMessage::Refresh;
    }
    if DefaultKeymap::BACK.matches(&key) {
        return AppMessage::GoBack;
    }
    if DefaultKeymap::SEARCH.matches(&key) {
        return AppMessage::Search(SearchMessage::Start);
    }
    if DefaultKeymap::CYCLE_VIEW.matches(&key) {
        return AppMessage::CycleViewState;
    }
    if DefaultKeymap::TOGGLE_THEME.matches(&key) {
        return AppMessage::ToggleTheme;
    }

    // Bulk actions
    if DefaultKeymap::ENABLE_SELECTED.matches(&key) {
        return AppMessage::Tree(TreeMessage::EnableSelected);
    }
    if DefaultKeymap::DISABLE_SELECTED.matches(&key) {
        return AppMessage::Tree(TreeMessage::DisableSelected);
    }
    if DefaultKeymap::BULK_RENAME.matches(&key) {
        return AppMessage::Tree(TreeMessage::BulkRename);
    }
    if DefaultKeymap::DESELECT_ALL.matches(&key) {
        return AppMessage::Tree(TreeMessage::DeselectAllVisible);
    }

    // Row actions
    if DefaultKeymap::ENABLE.matches(&key) {
        return AppMessage::Tree(TreeMessage::EnableRow);
    }
    if DefaultKeymap::DISABLE.matches(&key) {
        return AppMessage::Tree(TreeMessage::DisableRow);
    }
    if DefaultKeymap::RENAME.matches(&key) {
        return AppMessage::Tree(TreeMessage::RenameRow);
    }
    if DefaultKeymap::SELECT_ALL.matches(&key) {
        return AppMessage::Tree(TreeMessage::SelectAllVisible);
    }
    if DefaultKeymap::CLEAR_SELECTION.matches(&key) {
        return AppMessage::Tree(TreeMessage::ClearSelection);
    }
    if DefaultKeymap::NAV_TOGGLE.matches(&key) || DefaultKeymap::NAV_TOGGLE_SPACE.matches(&key) {
        return AppMessage::Tree(TreeMessage::Toggle);
    }

    let msg = match key.code {
        KeyCode::Up | KeyCode::Char('k') => TreeMessage::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => TreeMessage::SelectNext,
        KeyCode::Home | KeyCode::Char('g') => TreeMessage::SelectFirst,
        KeyCode::End | KeyCode::Char('G') => TreeMessage::SelectLast,
        KeyCode::PageUp => TreeMessage::PageUp,
        KeyCode::PageDown => TreeMessage::PageDown,
        _ => return AppMessage::Noop,
    };
    AppMessage::Tree(msg)
}

/// Plain or shifted character
fn is_text_input(key: &KeyEvent) -> bool {
    key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

#[cfg(test)]
mod tests {
    use entity_manager_core::types::EntityId;
    use entity_manager_core::Command;

    use super::*;
    use crate::model::test_support::test_app;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn alt(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT))
    }

    #[test]
    fn tree_keys() {
        let app = test_app();
        assert_eq!(handle_event(press(KeyCode::Char('q')), &app), AppMessage::Quit);
        assert_eq!(
            handle_event(press(KeyCode::Char('j')), &app),
            AppMessage::Tree(TreeMessage::SelectNext)
        );
        assert_eq!(
            handle_event(press(KeyCode::Char(' ')), &app),
            AppMessage::Tree(TreeMessage::Toggle)
        );
        assert_eq!(
            handle_event(alt('e'), &app),
            AppMessage::Tree(TreeMessage::EnableSelected)
        );
        assert_eq!(
            handle_event(press(KeyCode::Char('e')), &app),
            AppMessage::Tree(TreeMessage::EnableRow)
        );
        assert_eq!(
            handle_event(press(KeyCode::Char('/')), &app),
            AppMessage::Search(SearchMessage::Start)
        );
        assert_eq!(handle_event(press(KeyCode::F(5)), &app), AppMessage::Refresh);
    }

    #[test]
    fn release_events_are_ignored() {
        let app = test_app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_event(Event::Key(key), &app), AppMessage::Noop);
    }

    #[test]
    fn search_mode_captures_characters() {
        let mut app = test_app();
        app.input_mode = InputMode::Search;
        assert_eq!(
            handle_event(press(KeyCode::Char('q')), &app),
            AppMessage::Search(SearchMessage::Input('q'))
        );
        assert_eq!(
            handle_event(press(KeyCode::Esc), &app),
            AppMessage::Search(SearchMessage::Cancel)
        );
    }

    #[test]
    fn modal_keys_take_priority() {
        let mut app = test_app();
        app.dispatch(Command::OpenRename(EntityId::new("light.hallway")));
        assert_eq!(
            handle_event(press(KeyCode::Char('q')), &app),
            AppMessage::Modal(ModalMessage::Input('q'))
        );
        assert_eq!(
            handle_event(press(KeyCode::Esc), &app),
            AppMessage::Modal(ModalMessage::Close)
        );
        assert_eq!(
            handle_event(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), &app),
            AppMessage::Quit
        );
    }

    #[test]
    fn bulk_target_row_is_a_switch() {
        let mut app = test_app();
        app.dispatch(Command::ToggleSelection(EntityId::new("light.hallway")));
        app.dispatch(Command::OpenBulkRename);
        app.bulk_field = BulkField::Target;
        assert_eq!(
            handle_event(press(KeyCode::Char(' ')), &app),
            AppMessage::Modal(ModalMessage::ToggleTarget)
        );
        assert_eq!(handle_event(press(KeyCode::Char('z')), &app), AppMessage::Noop);

        app.bulk_field = BulkField::Find;
        assert_eq!(
            handle_event(press(KeyCode::Char(' ')), &app),
            AppMessage::Modal(ModalMessage::Input(' '))
        );
    }

    #[test]
    fn overlay_swallows_tree_keys() {
        let mut app = test_app();
        app.overlay = Some(Overlay::Help);
        assert_eq!(handle_event(press(KeyCode::Char('j')), &app), AppMessage::Noop);
        assert_eq!(handle_event(press(KeyCode::Char('q')), &app), AppMessage::CloseOverlay);
    }
}
