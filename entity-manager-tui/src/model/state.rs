//! UI-only state: cursor, input mode, overlays

use entity_manager_core::Notice;

/// Rows moved by PageUp / PageDown
pub const PAGE_SIZE: usize = 10;

/// Cursor over the flattened tree rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeCursor {
    pub index: usize,
}

impl TreeCursor {
    pub fn select_previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.index < len - 1 {
            self.index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.index = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        self.index = len.saturating_sub(1);
    }

    pub fn page_up(&mut self) {
        self.index = self.index.saturating_sub(PAGE_SIZE);
    }

    pub fn page_down(&mut self, len: usize) {
        self.index = (self.index + PAGE_SIZE).min(len.saturating_sub(1));
    }

    /// Keep the cursor on a row after the row list shrank
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }
}

/// Where plain character keys go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Focused input of the bulk rename dialog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BulkField {
    Target,
    #[default]
    Find,
    Replace,
}

impl BulkField {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Target => Self::Find,
            Self::Find => Self::Replace,
            Self::Replace => Self::Target,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Target => Self::Replace,
            Self::Find => Self::Target,
            Self::Replace => Self::Find,
        }
    }
}

/// Popup drawn above everything else, including an open dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
    /// Blocking failure that must be acknowledged
    Notice(Notice),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_in_bounds() {
        let mut cursor = TreeCursor::default();
        cursor.select_previous();
        assert_eq!(cursor.index, 0);

        cursor.select_next(3);
        cursor.select_next(3);
        cursor.select_next(3);
        assert_eq!(cursor.index, 2);

        cursor.page_down(25);
        assert_eq!(cursor.index, 12);
        cursor.page_down(15);
        assert_eq!(cursor.index, 14);
        cursor.page_up();
        assert_eq!(cursor.index, 4);

        cursor.clamp(2);
        assert_eq!(cursor.index, 1);
        cursor.clamp(0);
        assert_eq!(cursor.index, 0);
        cursor.select_next(0);
        assert_eq!(cursor.index, 0);
    }

    #[test]
    fn bulk_field_cycles() {
        assert_eq!(BulkField::default().next(), BulkField::Replace);
        assert_eq!(BulkField::Replace.next(), BulkField::Target);
        assert_eq!(BulkField::Target.prev(), BulkField::Replace);
    }
}
