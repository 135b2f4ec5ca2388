//! Entity record and identifier

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Entity identifier (`domain.object_id`)
///
/// Primary key of an entity within one load. The two parts are split on the
/// first `.`; identifiers without a dot are kept verbatim and report no object id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap a raw identifier without validation (backend data is trusted as-is).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse user input into an identifier, requiring a non-empty `domain.object_id` form.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let raw = raw.trim();
        match raw.split_once('.') {
            Some((domain, object_id)) if !domain.is_empty() && !object_id.is_empty() => {
                Ok(Self(raw.to_string()))
            }
            _ => Err(CoreError::Validation(format!(
                "Invalid entity id '{raw}': expected <domain>.<object_id>"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Domain part (`light` in `light.kitchen`)
    pub fn domain(&self) -> &str {
        self.0.split_once('.').map_or(self.0.as_str(), |(domain, _)| domain)
    }

    /// Object id part (`kitchen` in `light.kitchen`)
    pub fn object_id(&self) -> Option<&str> {
        self.0.split_once('.').map(|(_, object_id)| object_id)
    }

    /// Name derived from the identifier: domain stripped, underscores as spaces.
    pub fn fallback_name(&self) -> String {
        self.object_id().unwrap_or(self.0.as_str()).replace('_', " ")
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An addressable entity as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_id: EntityId,
    /// Integration (platform) the entity belongs to
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub device_id: Option<String>,
    /// User-assigned display name
    #[serde(default)]
    pub name: Option<String>,
    /// Display name provided by the integration
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub entity_category: Option<String>,
    /// Actor that disabled the entity (`user`, `integration`, ...)
    #[serde(default)]
    pub disabled_by: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
}

impl Entity {
    pub fn new(entity_id: impl Into<EntityId>, platform: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            platform: platform.into(),
            device_id: None,
            name: None,
            original_name: None,
            entity_category: None,
            disabled_by: None,
            is_disabled: false,
        }
    }

    /// Current display name: `name`, else `original_name`, else derived from the id.
    ///
    /// Empty strings count as unset.
    pub fn current_name(&self) -> String {
        non_empty(self.name.as_deref())
            .or_else(|| non_empty(self.original_name.as_deref()))
            .map_or_else(|| self.entity_id.fallback_name(), str::to_string)
    }

    /// Label shown in the tree: `original_name`, else derived from the id.
    pub fn label(&self) -> String {
        non_empty(self.original_name.as_deref())
            .map_or_else(|| self.entity_id.fallback_name(), str::to_string)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
