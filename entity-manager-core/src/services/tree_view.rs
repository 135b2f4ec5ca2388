//! Flattened render rows for the visible tree

use std::sync::Arc;

use serde::Serialize;

use crate::services::{ExpansionState, SelectionSet};
use crate::types::{DeviceRegistry, Entity, Hierarchy, ViewState};

/// Integration header row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationRow {
    pub name: String,
    pub expanded: bool,
    pub device_count: usize,
    pub shown: usize,
    pub disabled: usize,
    pub total: usize,
}

/// Device header row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRow {
    pub integration: String,
    /// Device id or `no_device`
    pub device_key: String,
    pub label: String,
    pub expanded: bool,
    pub shown: usize,
    pub disabled: usize,
    pub total: usize,
}

/// Entity row with checkbox state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRow {
    pub entity: Arc<Entity>,
    pub device_key: String,
    pub selected: bool,
}

impl EntityRow {
    /// Status badge: `enabled`, `disabled` or `disabled by: <actor>`
    pub fn status(&self) -> String {
        match (self.entity.is_disabled, self.entity.disabled_by.as_deref()) {
            (false, _) => "enabled".to_string(),
            (true, Some(actor)) if !actor.is_empty() => format!("disabled by: {actor}"),
            (true, _) => "disabled".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum TreeRow {
    Integration(IntegrationRow),
    Device(DeviceRow),
    Entity(EntityRow),
}

impl TreeRow {
    /// Nesting depth (0 = integration)
    pub fn depth(&self) -> usize {
        match self {
            Self::Integration(_) => 0,
            Self::Device(_) => 1,
            Self::Entity(_) => 2,
        }
    }
}

/// Flatten the visible tree into rows.
///
/// Collapsed levels emit only their header row; their children are not
/// produced at all.
pub fn rows(
    hierarchy: &Hierarchy,
    registry: &DeviceRegistry,
    expansion: &ExpansionState,
    selection: &SelectionSet,
) -> Vec<TreeRow> {
    let mut rows = Vec::new();

    for integration in &hierarchy.integrations {
        let expanded = expansion.is_integration_expanded(integration.name());
        rows.push(TreeRow::Integration(IntegrationRow {
            name: integration.name().to_string(),
            expanded,
            device_count: integration.device_count(),
            shown: integration.shown_count(),
            disabled: integration.disabled_count(),
            total: integration.total_count(),
        }));
        if !expanded {
            continue;
        }

        for (device_key, device) in &integration.devices {
            let expanded = expansion.is_device_expanded(device_key);
            rows.push(TreeRow::Device(DeviceRow {
                integration: integration.name().to_string(),
                device_key: device_key.clone(),
                label: registry.display_name(Some(device_key)),
                expanded,
                shown: device.shown_count(),
                disabled: device.disabled_count(),
                total: device.total_count(),
            }));
            if !expanded {
                continue;
            }

            rows.extend(device.entities.iter().map(|entity| {
                TreeRow::Entity(EntityRow {
                    selected: selection.contains(entity.entity_id.as_str()),
                    entity: Arc::clone(entity),
                    device_key: device_key.clone(),
                })
            }));
        }
    }

    rows
}

/// Header statistics over the visible (filtered) tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    pub integrations: usize,
    pub devices: usize,
    /// Entities listed after filtering
    pub entities: usize,
    pub selected: usize,
}

impl ViewStats {
    pub fn collect(hierarchy: &Hierarchy, selection: &SelectionSet) -> Self {
        Self {
            integrations: hierarchy.integration_count(),
            devices: hierarchy.device_count(),
            entities: hierarchy.entity_count(),
            selected: selection.len(),
        }
    }
}

/// Title shown when the visible tree is empty
pub fn empty_title(view_state: ViewState) -> String {
    match view_state {
        ViewState::All => "No entities found".to_string(),
        state => format!("No {state} entities found"),
    }
}
