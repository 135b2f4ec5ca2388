//! Top-level application message

use super::{ModalMessage, SearchMessage, TreeMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    Quit,

    /// Entity tree page
    Tree(TreeMessage),

    /// Search input line
    Search(SearchMessage),

    /// Rename / bulk rename dialogs
    Modal(ModalMessage),

    /// Clear the search term, else the status line
    GoBack,

    /// Reload the snapshot
    Refresh,

    /// disabled → enabled → all
    CycleViewState,

    ShowHelp,

    /// Dark ↔ light, saved to the config file
    ToggleTheme,

    /// Dismiss the help or notice overlay
    CloseOverlay,

    /// Ignored event
    Noop,
}
