//! Key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    pub const fn alt(code: KeyCode) -> Self {
        Self::new(KeyModifiers::ALT, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.modifiers == self.modifiers && key.code == self.code
    }
}

/// Default bindings
pub struct DefaultKeymap;

impl DefaultKeymap {
    // Global
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));
    pub const HELP: KeyBinding = KeyBinding::key(KeyCode::Char('?'));
    pub const HELP_ALT: KeyBinding = KeyBinding::alt(KeyCode::Char('h'));
    pub const REFRESH: KeyBinding = KeyBinding::alt(KeyCode::Char('r'));
    pub const REFRESH_F5: KeyBinding = KeyBinding::key(KeyCode::F(5));
    pub const BACK: KeyBinding = KeyBinding::key(KeyCode::Esc);
    pub const SEARCH: KeyBinding = KeyBinding::key(KeyCode::Char('/'));
    pub const CYCLE_VIEW: KeyBinding = KeyBinding::key(KeyCode::Char('v'));
    pub const TOGGLE_THEME: KeyBinding = KeyBinding::key(KeyCode::Char('t'));

    // Navigation
    pub const NAV_UP: KeyBinding = KeyBinding::key(KeyCode::Up);
    pub const NAV_DOWN: KeyBinding = KeyBinding::key(KeyCode::Down);
    pub const NAV_TOGGLE: KeyBinding = KeyBinding::key(KeyCode::Enter);
    pub const NAV_TOGGLE_SPACE: KeyBinding = KeyBinding::key(KeyCode::Char(' '));

    // Row actions
    pub const ENABLE: KeyBinding = KeyBinding::key(KeyCode::Char('e'));
    pub const DISABLE: KeyBinding = KeyBinding::key(KeyCode::Char('d'));
    pub const RENAME: KeyBinding = KeyBinding::key(KeyCode::Char('r'));

    // Selection
    pub const SELECT_ALL: KeyBinding = KeyBinding::key(KeyCode::Char('a'));
    pub const DESELECT_ALL: KeyBinding = KeyBinding::alt(KeyCode::Char('a'));
    pub const CLEAR_SELECTION: KeyBinding = KeyBinding::key(KeyCode::Char('x'));

    // Bulk actions on the selection
    pub const ENABLE_SELECTED: KeyBinding = KeyBinding::alt(KeyCode::Char('e'));
    pub const DISABLE_SELECTED: KeyBinding = KeyBinding::alt(KeyCode::Char('d'));
    pub const BULK_RENAME: KeyBinding = KeyBinding::alt(KeyCode::Char('n'));
}
