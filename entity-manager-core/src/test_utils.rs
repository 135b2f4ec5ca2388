//! Test helpers
//!
//! Mock backend with a call log plus fixture builders.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{EntityManager, ManagerConfig};
use crate::traits::EntityBackend;
use crate::types::{
    BulkRenameRequest, BulkRenameResult, BulkResult, Device, DeviceInfo, Entity, EntityId,
    Hierarchy, Integration, RenameRequest, ViewState, NO_DEVICE_KEY,
};

pub fn id(raw: &str) -> EntityId {
    EntityId::new(raw)
}

// ===== MockEntityBackend =====

/// One observed backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    FetchEntities(ViewState),
    FetchDeviceRegistry,
    Enable(EntityId),
    Disable(EntityId),
    BulkEnable(Vec<EntityId>),
    BulkDisable(Vec<EntityId>),
    Rename(EntityId, RenameRequest),
    BulkRename(BulkRenameRequest),
}

pub struct MockEntityBackend {
    snapshot: RwLock<Hierarchy>,
    devices: RwLock<Vec<DeviceInfo>>,
    calls: RwLock<Vec<BackendCall>>,
    fetch_error: RwLock<Option<String>>,
    registry_error: RwLock<Option<String>>,
    /// If Some, every mutation rejects with this reason
    mutation_error: RwLock<Option<String>>,
    /// Canned bulk enable/disable response; all requested ids succeed when None
    bulk_result: RwLock<Option<BulkResult>>,
    bulk_rename_result: RwLock<Option<BulkRenameResult>>,
}

impl MockEntityBackend {
    pub fn new(snapshot: Hierarchy, devices: Vec<DeviceInfo>) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            devices: RwLock::new(devices),
            calls: RwLock::new(Vec::new()),
            fetch_error: RwLock::new(None),
            registry_error: RwLock::new(None),
            mutation_error: RwLock::new(None),
            bulk_result: RwLock::new(None),
            bulk_rename_result: RwLock::new(None),
        }
    }

    pub async fn calls(&self) -> Vec<BackendCall> {
        self.calls.read().await.clone()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    pub async fn set_fetch_error(&self, err: Option<String>) {
        *self.fetch_error.write().await = err;
    }

    pub async fn set_registry_error(&self, err: Option<String>) {
        *self.registry_error.write().await = err;
    }

    pub async fn set_mutation_error(&self, err: Option<String>) {
        *self.mutation_error.write().await = err;
    }

    pub async fn set_bulk_result(&self, result: Option<BulkResult>) {
        *self.bulk_result.write().await = result;
    }

    pub async fn set_bulk_rename_result(&self, result: Option<BulkRenameResult>) {
        *self.bulk_rename_result.write().await = result;
    }

    async fn record(&self, call: BackendCall) {
        self.calls.write().await.push(call);
    }

    async fn check_mutation(&self, action: &str, entity_id: &str) -> CoreResult<()> {
        match self.mutation_error.read().await.as_ref() {
            Some(msg) => Err(CoreError::backend(action, entity_id, msg.clone())),
            None => Ok(()),
        }
    }

    async fn bulk(&self, entity_ids: &[EntityId], action: &str) -> CoreResult<BulkResult> {
        self.check_mutation(action, "entities").await?;
        Ok(self
            .bulk_result
            .read()
            .await
            .clone()
            .unwrap_or_else(|| BulkResult {
                success: entity_ids.to_vec(),
                failed: Vec::new(),
            }))
    }
}

#[async_trait]
impl EntityBackend for MockEntityBackend {
    async fn fetch_entities(&self, view_state: ViewState) -> CoreResult<Hierarchy> {
        self.record(BackendCall::FetchEntities(view_state)).await;
        if let Some(ref msg) = *self.fetch_error.read().await {
            return Err(CoreError::LoadFailed(msg.clone()));
        }
        Ok(self.snapshot.read().await.clone())
    }

    async fn fetch_device_registry(&self) -> CoreResult<Vec<DeviceInfo>> {
        self.record(BackendCall::FetchDeviceRegistry).await;
        if let Some(ref msg) = *self.registry_error.read().await {
            return Err(CoreError::DeviceRegistry(msg.clone()));
        }
        Ok(self.devices.read().await.clone())
    }

    async fn enable_entity(&self, entity_id: &EntityId) -> CoreResult<()> {
        self.record(BackendCall::Enable(entity_id.clone())).await;
        self.check_mutation("enable", entity_id.as_str()).await
    }

    async fn disable_entity(&self, entity_id: &EntityId) -> CoreResult<()> {
        self.record(BackendCall::Disable(entity_id.clone())).await;
        self.check_mutation("disable", entity_id.as_str()).await
    }

    async fn bulk_enable(&self, entity_ids: &[EntityId]) -> CoreResult<BulkResult> {
        self.record(BackendCall::BulkEnable(entity_ids.to_vec())).await;
        self.bulk(entity_ids, "enable").await
    }

    async fn bulk_disable(&self, entity_ids: &[EntityId]) -> CoreResult<BulkResult> {
        self.record(BackendCall::BulkDisable(entity_ids.to_vec())).await;
        self.bulk(entity_ids, "disable").await
    }

    async fn rename_entity(
        &self,
        entity_id: &EntityId,
        request: &RenameRequest,
    ) -> CoreResult<()> {
        self.record(BackendCall::Rename(entity_id.clone(), request.clone()))
            .await;
        self.check_mutation("rename", entity_id.as_str()).await
    }

    async fn bulk_rename(&self, request: &BulkRenameRequest) -> CoreResult<BulkRenameResult> {
        self.record(BackendCall::BulkRename(request.clone())).await;
        self.check_mutation("rename", "entities").await?;
        Ok(self
            .bulk_rename_result
            .read()
            .await
            .clone()
            .unwrap_or_else(|| BulkRenameResult {
                success: request.entity_ids.clone(),
                ..BulkRenameResult::default()
            }))
    }
}

// ===== Fixtures =====

fn entity(raw: &str, platform: &str, device_id: Option<&str>, original_name: Option<&str>) -> Arc<Entity> {
    let mut entity = Entity::new(raw, platform);
    entity.device_id = device_id.map(str::to_string);
    entity.original_name = original_name.map(str::to_string);
    entity.is_disabled = true;
    entity.disabled_by = Some("integration".to_string());
    Arc::new(entity)
}

fn device(device_id: Option<&str>, entities: Vec<Arc<Entity>>) -> Device {
    let mut device = Device::new(device_id.map(str::to_string));
    device.total_entities = Some(entities.len() + 1);
    device.disabled_entities = Some(entities.len());
    device.entities = entities;
    device
}

/// Two integrations: `hue` (one device) and `zwave_js` (a device plus loose entities).
pub fn sample_hierarchy() -> Hierarchy {
    let mut hue = Integration::new("hue");
    hue.devices.insert(
        "dev-porch".to_string(),
        device(
            Some("dev-porch"),
            vec![
                entity("light.porch", "hue", Some("dev-porch"), Some("Porch Light")),
                entity("sensor.porch_motion", "hue", Some("dev-porch"), None),
            ],
        ),
    );
    hue.total_entities = Some(5);
    hue.disabled_entities = Some(2);

    let mut zwave = Integration::new("zwave_js");
    zwave.devices.insert(
        "dev-fan".to_string(),
        device(
            Some("dev-fan"),
            vec![entity("switch.fan", "zwave_js", Some("dev-fan"), Some("Fan"))],
        ),
    );
    zwave.devices.insert(
        NO_DEVICE_KEY.to_string(),
        device(None, vec![entity("sensor.loose", "zwave_js", None, None)]),
    );
    zwave.total_entities = Some(4);
    zwave.disabled_entities = Some(2);

    Hierarchy::new(vec![hue, zwave])
}

pub fn sample_devices() -> Vec<DeviceInfo> {
    vec![
        DeviceInfo::new("dev-porch", Some("Porch Hub"), Some("Front Porch")),
        DeviceInfo::new("dev-fan", Some("Ceiling Fan"), None),
    ]
}

/// Settle delays are zero so tests never sleep
pub fn test_config() -> ManagerConfig {
    ManagerConfig {
        rename_settle_delay_ms: 0,
        bulk_rename_settle_delay_ms: 0,
        ..ManagerConfig::default()
    }
}

/// Manager over a mock backend seeded with the sample fixtures (not loaded yet)
pub fn create_test_manager() -> (EntityManager, Arc<MockEntityBackend>) {
    let backend = Arc::new(MockEntityBackend::new(sample_hierarchy(), sample_devices()));
    let manager = EntityManager::new(backend.clone(), test_config());
    (manager, backend)
}
