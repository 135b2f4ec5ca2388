//! Entity tree messages

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeMessage {
    SelectPrevious,
    SelectNext,
    SelectFirst,
    SelectLast,
    PageUp,
    PageDown,

    /// Expand/collapse a header row, check/uncheck an entity row
    Toggle,

    /// Enable the entity, device or integration under the cursor
    EnableRow,
    /// Disable the entity under the cursor
    DisableRow,
    /// Open the rename dialog for the entity under the cursor
    RenameRow,

    /// Check every entity of the filtered view
    SelectAllVisible,
    /// Uncheck every entity of the filtered view
    DeselectAllVisible,
    ClearSelection,

    EnableSelected,
    DisableSelected,
    BulkRename,
}

/// Search input line messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMessage {
    Start,
    Input(char),
    Backspace,
    /// Keep the term and return to the tree
    Submit,
    /// Drop the term and return to the tree
    Cancel,
}
