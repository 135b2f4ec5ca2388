//! Backend service abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{
    BulkRenameRequest, BulkRenameResult, BulkResult, DeviceInfo, EntityId, Hierarchy,
    RenameRequest, ViewState,
};

/// Backend service that fetches entity data and executes mutations
///
/// All calls are request/response; failure is signaled only by returning `Err`.
/// Provides a default memory implementation of `InMemoryEntityBackend`.
#[async_trait]
pub trait EntityBackend: Send + Sync {
    /// Fetch the full snapshot for a view state
    ///
    /// # Arguments
    /// * `view_state` - which entities to list
    async fn fetch_entities(&self, view_state: ViewState) -> CoreResult<Hierarchy>;

    /// Fetch device display metadata
    async fn fetch_device_registry(&self) -> CoreResult<Vec<DeviceInfo>>;

    /// Enable one entity
    async fn enable_entity(&self, entity_id: &EntityId) -> CoreResult<()>;

    /// Disable one entity
    async fn disable_entity(&self, entity_id: &EntityId) -> CoreResult<()>;

    /// Enable entities in batches, reporting per-id outcomes
    async fn bulk_enable(&self, entity_ids: &[EntityId]) -> CoreResult<BulkResult>;

    /// Disable entities in batches, reporting per-id outcomes
    async fn bulk_disable(&self, entity_ids: &[EntityId]) -> CoreResult<BulkResult>;

    /// Rename one entity (display name and/or identifier)
    ///
    /// # Arguments
    /// * `entity_id` - current identifier
    /// * `request` - only the fields that change
    async fn rename_entity(&self, entity_id: &EntityId, request: &RenameRequest)
        -> CoreResult<()>;

    /// Find/replace across entities; the backend computes each outcome
    async fn bulk_rename(&self, request: &BulkRenameRequest) -> CoreResult<BulkRenameResult>;
}
