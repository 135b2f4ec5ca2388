//! View-model engines and the owning entity manager

mod bulk_rename;
mod command;
mod expansion;
mod filter;
mod manager;
mod notice;
mod rename;
mod selection;
mod tree_view;

pub use bulk_rename::{
    current_value, BulkRenamePhase, BulkRenameSession, PreviewItem, RenamePreview,
};
pub use command::Command;
pub use expansion::{ExpansionState, ToggleSet};
pub use filter::{filter_hierarchy, matches_entity};
pub use manager::{EntityManager, ManagerConfig, Modal, MutationState, PendingSettle};
pub use notice::{BulkAction, InlineMessage, Notice};
pub use rename::{build_request, RenameField, RenamePhase, RenameSession};
pub use selection::SelectionSet;
pub use tree_view::{empty_title, rows, DeviceRow, EntityRow, IntegrationRow, TreeRow, ViewStats};
