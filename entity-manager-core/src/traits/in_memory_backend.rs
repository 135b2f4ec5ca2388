//! In-memory entity registry backend

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::EntityBackend;
use crate::error::{CoreError, CoreResult};
use crate::types::{
    BulkFailure, BulkRenameRequest, BulkRenameResult, BulkResult, Device, DeviceInfo, Entity,
    EntityId, Hierarchy, Integration, RenameRequest, RenameTarget, ViewState, NO_DEVICE_KEY,
};
use crate::utils::replace_first;

/// Platform used for entities that report none
const UNKNOWN_PLATFORM: &str = "unknown";

/// Actor recorded when an entity is disabled through this backend
const DISABLED_BY_USER: &str = "user";

#[derive(Debug, Default)]
struct RegistryState {
    /// Flat entity registry in registration order
    entities: Vec<Entity>,
    devices: Vec<DeviceInfo>,
}

impl RegistryState {
    fn position(&self, entity_id: &str) -> Option<usize> {
        self.entities
            .iter()
            .position(|e| e.entity_id.as_str() == entity_id)
    }

    fn entity_mut(&mut self, entity_id: &EntityId) -> CoreResult<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|e| &e.entity_id == entity_id)
            .ok_or_else(|| CoreError::EntityNotFound(entity_id.to_string()))
    }

    fn set_disabled(&mut self, entity_id: &EntityId, disabled: bool) -> CoreResult<()> {
        let entity = self.entity_mut(entity_id)?;
        entity.is_disabled = disabled;
        entity.disabled_by = disabled.then(|| DISABLED_BY_USER.to_string());
        Ok(())
    }

    fn bulk_set_disabled(&mut self, entity_ids: &[EntityId], disabled: bool) -> BulkResult {
        let mut result = BulkResult::default();
        for entity_id in entity_ids {
            match self.set_disabled(entity_id, disabled) {
                Ok(()) => result.success.push(entity_id.clone()),
                Err(e) => {
                    log::error!("Bulk update failed for {entity_id}: {e}");
                    result.failed.push(BulkFailure::new(entity_id.clone(), e.reason()));
                }
            }
        }
        result
    }

    /// Validate and apply an identifier change, keeping registry position.
    fn change_id(&mut self, entity_id: &EntityId, new_id: &str) -> CoreResult<EntityId> {
        let new_id = EntityId::parse(new_id)
            .map_err(|e| CoreError::backend("rename", entity_id.as_str(), e.reason()))?;
        if new_id.domain() != entity_id.domain() {
            return Err(CoreError::backend(
                "rename",
                entity_id.as_str(),
                format!("Domain cannot change ({} → {})", entity_id.domain(), new_id.domain()),
            ));
        }
        if new_id != *entity_id && self.position(new_id.as_str()).is_some() {
            return Err(CoreError::backend(
                "rename",
                entity_id.as_str(),
                format!("Entity ID {new_id} is already registered"),
            ));
        }
        self.entity_mut(entity_id)?.entity_id = new_id.clone();
        Ok(new_id)
    }

    /// Group the registry by platform and device.
    ///
    /// Counts cover every registered entity; only entities matching the view
    /// state are listed, and empty devices/integrations are pruned.
    fn group(&self, view_state: ViewState) -> Hierarchy {
        let mut grouped: IndexMap<String, Integration> = IndexMap::new();

        for entity in &self.entities {
            let platform = if entity.platform.is_empty() {
                UNKNOWN_PLATFORM
            } else {
                entity.platform.as_str()
            };
            let device_key = entity
                .device_id
                .clone()
                .unwrap_or_else(|| NO_DEVICE_KEY.to_string());

            let integration = grouped
                .entry(platform.to_string())
                .or_insert_with(|| counted(Integration::new(platform)));
            bump(&mut integration.total_entities, &mut integration.disabled_entities, entity);

            let device = integration
                .devices
                .entry(device_key)
                .or_insert_with(|| {
                    let mut device = Device::new(entity.device_id.clone());
                    device.total_entities = Some(0);
                    device.disabled_entities = Some(0);
                    device
                });
            bump(&mut device.total_entities, &mut device.disabled_entities, entity);

            if view_state.includes(entity.is_disabled) {
                device.entities.push(Arc::new(entity.clone()));
            }
        }

        let integrations = grouped
            .into_values()
            .filter_map(|mut integration| {
                integration.devices.retain(|_, device| !device.entities.is_empty());
                (!integration.devices.is_empty()).then_some(integration)
            })
            .collect();

        Hierarchy::new(integrations)
    }
}

fn counted(mut integration: Integration) -> Integration {
    integration.total_entities = Some(0);
    integration.disabled_entities = Some(0);
    integration
}

fn bump(total: &mut Option<usize>, disabled: &mut Option<usize>, entity: &Entity) {
    *total = Some(total.unwrap_or(0) + 1);
    if entity.is_disabled {
        *disabled = Some(disabled.unwrap_or(0) + 1);
    }
}

/// In-memory entity backend
///
/// Default implementation, backed by a flat entity registry and a device
/// registry. Used by the terminal frontend and integration tests.
#[derive(Clone, Default)]
pub struct InMemoryEntityBackend {
    state: Arc<RwLock<RegistryState>>,
}

impl InMemoryEntityBackend {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend seeded with entities and device metadata
    #[must_use]
    pub fn with_registry(entities: Vec<Entity>, devices: Vec<DeviceInfo>) -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState { entities, devices })),
        }
    }

    /// Current registry record for an entity
    pub async fn entity(&self, entity_id: &str) -> Option<Entity> {
        let state = self.state.read().await;
        state.position(entity_id).map(|i| state.entities[i].clone())
    }

    /// Register (or replace) an entity
    pub async fn upsert_entity(&self, entity: Entity) {
        let mut state = self.state.write().await;
        match state.position(entity.entity_id.as_str()) {
            Some(i) => state.entities[i] = entity,
            None => state.entities.push(entity),
        }
    }

    /// Remove an entity from the registry
    pub async fn remove_entity(&self, entity_id: &str) -> Option<Entity> {
        let mut state = self.state.write().await;
        state.position(entity_id).map(|i| state.entities.remove(i))
    }
}

#[async_trait]
impl EntityBackend for InMemoryEntityBackend {
    async fn fetch_entities(&self, view_state: ViewState) -> CoreResult<Hierarchy> {
        Ok(self.state.read().await.group(view_state))
    }

    async fn fetch_device_registry(&self) -> CoreResult<Vec<DeviceInfo>> {
        Ok(self.state.read().await.devices.clone())
    }

    async fn enable_entity(&self, entity_id: &EntityId) -> CoreResult<()> {
        self.state.write().await.set_disabled(entity_id, false)
    }

    async fn disable_entity(&self, entity_id: &EntityId) -> CoreResult<()> {
        self.state.write().await.set_disabled(entity_id, true)
    }

    async fn bulk_enable(&self, entity_ids: &[EntityId]) -> CoreResult<BulkResult> {
        Ok(self.state.write().await.bulk_set_disabled(entity_ids, false))
    }

    async fn bulk_disable(&self, entity_ids: &[EntityId]) -> CoreResult<BulkResult> {
        Ok(self.state.write().await.bulk_set_disabled(entity_ids, true))
    }

    async fn rename_entity(
        &self,
        entity_id: &EntityId,
        request: &RenameRequest,
    ) -> CoreResult<()> {
        let mut state = self.state.write().await;
        // Validate the target first so a rejected id change leaves the name untouched
        state.entity_mut(entity_id)?;

        let current_id = match &request.new_entity_id {
            Some(new_id) => state.change_id(entity_id, new_id.as_str())?,
            None => entity_id.clone(),
        };
        if let Some(name) = &request.name {
            state.entity_mut(&current_id)?.name = Some(name.clone());
        }
        Ok(())
    }

    async fn bulk_rename(&self, request: &BulkRenameRequest) -> CoreResult<BulkRenameResult> {
        if request.find.is_empty() {
            return Err(CoreError::Validation(
                "Find string cannot be empty".to_string(),
            ));
        }

        let mut state = self.state.write().await;
        let mut result = BulkRenameResult::default();

        for entity_id in &request.entity_ids {
            let current = match state.entity_mut(entity_id) {
                Ok(entity) => match request.target {
                    RenameTarget::Name => entity.current_name(),
                    RenameTarget::EntityId => entity.entity_id.to_string(),
                },
                Err(e) => {
                    result.failed.push(BulkFailure::new(entity_id.clone(), e.reason()));
                    continue;
                }
            };

            let Some(new_value) = replace_first(&current, &request.find, &request.replace) else {
                result.skipped.push(entity_id.clone());
                continue;
            };

            let applied = match request.target {
                RenameTarget::Name => state
                    .entity_mut(entity_id)
                    .map(|entity| entity.name = Some(new_value)),
                RenameTarget::EntityId => state.change_id(entity_id, &new_value).map(|_| ()),
            };
            match applied {
                Ok(()) => result.success.push(entity_id.clone()),
                Err(e) => {
                    log::error!("Bulk rename failed for {entity_id}: {e}");
                    result.failed.push(BulkFailure::new(entity_id.clone(), e.reason()));
                }
            }
        }

        Ok(result)
    }
}
