//! Mutation request and result types

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// Failure detail for one id of a bulk action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub entity_id: EntityId,
    pub error: String,
}

impl BulkFailure {
    pub fn new(entity_id: impl Into<EntityId>, error: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            error: error.into(),
        }
    }
}

/// Result of a bulk enable/disable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkResult {
    #[serde(default)]
    pub success: Vec<EntityId>,
    #[serde(default)]
    pub failed: Vec<BulkFailure>,
}

impl BulkResult {
    pub fn failed_ids(&self) -> Vec<EntityId> {
        self.failed.iter().map(|f| f.entity_id.clone()).collect()
    }
}

/// Result of a bulk rename; the three lists are disjoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRenameResult {
    #[serde(default)]
    pub success: Vec<EntityId>,
    #[serde(default)]
    pub failed: Vec<BulkFailure>,
    /// Ids whose value did not contain the find string
    #[serde(default)]
    pub skipped: Vec<EntityId>,
}

/// Field a bulk rename operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameTarget {
    /// Display name
    #[default]
    Name,
    /// Raw entity identifier
    EntityId,
}

impl RenameTarget {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Friendly Name",
            Self::EntityId => "Entity ID",
        }
    }

    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Name => Self::EntityId,
            Self::EntityId => Self::Name,
        }
    }
}

/// Single-entity rename; only the fields that changed are set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_entity_id: Option<EntityId>,
}

impl RenameRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.new_entity_id.is_none()
    }
}

/// Bulk find/replace request; the backend computes per-item outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRenameRequest {
    pub entity_ids: Vec<EntityId>,
    pub find: String,
    pub replace: String,
    pub target: RenameTarget,
}
