//! Integration → Device → Entity snapshot

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};

/// Device key used by the backend for entities without a device
pub const NO_DEVICE_KEY: &str = "no_device";

/// A device group inside an integration
///
/// `entities` holds the entities listed for the active view state (or the
/// search result); the counts describe the backend's full set and are never
/// recomputed from the listed subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// `None` for the "no device" group
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub entities: Vec<Arc<Entity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_entities: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_entities: Option<usize>,
}

impl Device {
    pub fn new(device_id: Option<String>) -> Self {
        Self {
            device_id,
            entities: Vec::new(),
            total_entities: None,
            disabled_entities: None,
        }
    }

    /// Number of entities currently listed
    pub fn shown_count(&self) -> usize {
        self.entities.len()
    }

    /// Backend disabled count (0 when not reported)
    pub fn disabled_count(&self) -> usize {
        self.disabled_entities.unwrap_or(0)
    }

    /// Backend total count (falls back to the listed count when not reported)
    pub fn total_count(&self) -> usize {
        self.total_entities.unwrap_or_else(|| self.shown_count())
    }

    /// Copy of this device listing only the given entities (shared, not cloned).
    pub(crate) fn with_entities(&self, entities: Vec<Arc<Entity>>) -> Self {
        Self {
            device_id: self.device_id.clone(),
            entities,
            total_entities: self.total_entities,
            disabled_entities: self.disabled_entities,
        }
    }
}

/// An integration (platform) grouping devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Grouping key, e.g. `hue` or `zwave_js`
    pub integration: String,
    /// Device key (device id or [`NO_DEVICE_KEY`]) → device, in backend order
    #[serde(default)]
    pub devices: IndexMap<String, Device>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_entities: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_entities: Option<usize>,
}

impl Integration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            integration: name.into(),
            devices: IndexMap::new(),
            total_entities: None,
            disabled_entities: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.integration
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Number of entities currently listed across all devices
    pub fn shown_count(&self) -> usize {
        self.devices.values().map(Device::shown_count).sum()
    }

    pub fn disabled_count(&self) -> usize {
        self.disabled_entities.unwrap_or(0)
    }

    pub fn total_count(&self) -> usize {
        self.total_entities.unwrap_or_else(|| self.shown_count())
    }

    /// All listed entities in render order
    pub fn entities(&self) -> impl Iterator<Item = &Arc<Entity>> {
        self.devices.values().flat_map(|device| device.entities.iter())
    }

    /// Copy of this integration with a replaced device map (counts kept).
    pub(crate) fn with_devices(&self, devices: IndexMap<String, Device>) -> Self {
        Self {
            integration: self.integration.clone(),
            devices,
            total_entities: self.total_entities,
            disabled_entities: self.disabled_entities,
        }
    }
}

/// Authoritative snapshot of one backend load
///
/// Stored verbatim: no sorting, validation or transformation. Replaced
/// wholesale on every reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy {
    pub integrations: Vec<Integration>,
}

impl Hierarchy {
    pub fn new(integrations: Vec<Integration>) -> Self {
        Self { integrations }
    }

    pub fn is_empty(&self) -> bool {
        self.integrations.is_empty()
    }

    pub fn integration_count(&self) -> usize {
        self.integrations.len()
    }

    pub fn device_count(&self) -> usize {
        self.integrations.iter().map(Integration::device_count).sum()
    }

    pub fn entity_count(&self) -> usize {
        self.integrations.iter().map(Integration::shown_count).sum()
    }

    pub fn integration(&self, name: &str) -> Option<&Integration> {
        self.integrations.iter().find(|i| i.integration == name)
    }

    /// Device under the named integration. `no_device` groups exist per
    /// integration, so the key alone is not unique.
    pub fn device(&self, integration: &str, device_key: &str) -> Option<&Device> {
        self.integration(integration)?.devices.get(device_key)
    }

    /// Look up a listed entity by id
    pub fn find_entity(&self, entity_id: &str) -> Option<&Arc<Entity>> {
        self.integrations
            .iter()
            .flat_map(Integration::entities)
            .find(|entity| entity.entity_id.as_str() == entity_id)
    }

    /// Ids listed under one device of an integration
    pub fn device_entity_ids(&self, integration: &str, device_key: &str) -> Vec<EntityId> {
        self.device(integration, device_key)
            .map(|device| device.entities.iter().map(|e| e.entity_id.clone()).collect())
            .unwrap_or_default()
    }

    /// Ids listed under the named integration
    pub fn integration_entity_ids(&self, name: &str) -> Vec<EntityId> {
        self.integration(name)
            .map(|integration| integration.entities().map(|e| e.entity_id.clone()).collect())
            .unwrap_or_default()
    }
}
