//! Commands accepted by the view-model

use crate::types::{EntityId, ViewState};

/// User action dispatched to [`EntityManager`](super::EntityManager)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    EnableEntity(EntityId),
    DisableEntity(EntityId),
    /// Enable every listed entity under one device of an integration
    EnableDevice {
        integration: String,
        device_key: String,
    },
    /// Enable every listed entity under the integration
    EnableIntegration { name: String },
    EnableSelected,
    DisableSelected,
    ToggleSelection(EntityId),
    SelectAll(Vec<EntityId>),
    DeselectAll(Vec<EntityId>),
    ClearSelection,
    ToggleIntegration(String),
    ToggleDevice(String),
    SetSearch(String),
    SetViewState(ViewState),
    Refresh,
    OpenRename(EntityId),
    OpenBulkRename,
    CloseModal,
}

impl Command {
    /// Whether the command issues a mutating backend call
    pub fn is_mutation(&self) -> bool {
        match self {
            Self::EnableEntity(_)
            | Self::DisableEntity(_)
            | Self::EnableDevice { .. }
            | Self::EnableIntegration { .. }
            | Self::EnableSelected
            | Self::DisableSelected => true,
            Self::ToggleSelection(_)
            | Self::SelectAll(_)
            | Self::DeselectAll(_)
            | Self::ClearSelection
            | Self::ToggleIntegration(_)
            | Self::ToggleDevice(_)
            | Self::SetSearch(_)
            | Self::SetViewState(_)
            | Self::Refresh
            | Self::OpenRename(_)
            | Self::OpenBulkRename
            | Self::CloseModal => false,
        }
    }
}
