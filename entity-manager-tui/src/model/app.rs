//! Application state

use entity_manager_core::services::TreeRow;
use entity_manager_core::{Command, EntityManager, Notice};
use tokio::runtime::Runtime;

use super::{BulkField, InputMode, Overlay, TreeCursor};
use crate::backend::{ConfigService, TuiConfig};
use crate::view::theme::{set_theme_index, Theme};

/// Application state
pub struct App {
    pub should_quit: bool,

    /// Drives the async view-model; every command runs to completion on it
    pub runtime: Runtime,

    pub manager: EntityManager,

    pub config: TuiConfig,

    config_service: Box<dyn ConfigService>,

    pub cursor: TreeCursor,

    pub input_mode: InputMode,

    /// Raw search text as typed (the manager keeps it lower-cased)
    pub search_input: String,

    pub bulk_field: BulkField,

    pub overlay: Option<Overlay>,

    /// Latest non-blocking notice or hint
    pub status_message: Option<String>,
}

impl App {
    pub fn new(
        runtime: Runtime,
        manager: EntityManager,
        config: TuiConfig,
        config_service: Box<dyn ConfigService>,
    ) -> Self {
        set_theme_index(config.theme.index());
        Self {
            should_quit: false,
            runtime,
            manager,
            config,
            config_service,
            cursor: TreeCursor::default(),
            input_mode: InputMode::Normal,
            search_input: String::new(),
            bulk_field: BulkField::default(),
            overlay: None,
            status_message: None,
        }
    }

    /// Initial fetch
    pub fn load(&mut self) {
        self.runtime.block_on(self.manager.load());
        self.sync_cursor();
    }

    /// Dispatch a command and surface its notice
    pub fn dispatch(&mut self, command: Command) {
        if let Some(notice) = self.runtime.block_on(self.manager.dispatch(command)) {
            self.show_notice(notice);
        }
        self.sync_cursor();
    }

    /// Run a scheduled post-rename settle. Returns `true` if one ran.
    pub fn settle(&mut self) -> bool {
        let settled = self.runtime.block_on(self.manager.run_pending());
        if settled {
            self.bulk_field = BulkField::default();
            self.sync_cursor();
        }
        settled
    }

    /// Switch between dark and light and persist the choice
    pub fn toggle_theme(&mut self) {
        self.config.theme = match self.config.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        set_theme_index(self.config.theme.index());
        if let Err(e) = self.config_service.save(&self.config) {
            log::error!("Failed to save config: {e:#}");
            self.set_status(format!("Failed to save config: {e}"));
        }
    }

    pub fn show_notice(&mut self, notice: Notice) {
        if notice.is_blocking() {
            self.overlay = Some(Overlay::Notice(notice));
        } else {
            self.set_status(notice.to_string());
        }
    }

    pub fn rows(&self) -> Vec<TreeRow> {
        self.manager.rows()
    }

    /// Row under the cursor
    pub fn current_row(&self) -> Option<TreeRow> {
        self.rows().into_iter().nth(self.cursor.index)
    }

    pub fn sync_cursor(&mut self) {
        let len = self.rows().len();
        self.cursor.clamp(len);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
