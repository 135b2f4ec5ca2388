//! Device display metadata

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::hierarchy::NO_DEVICE_KEY;

/// Label shown for entities without a device
pub const NO_DEVICE_LABEL: &str = "(No Device)";

/// Device metadata record from the device registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub id: String,
    /// Name provided by the integration
    #[serde(default)]
    pub name: Option<String>,
    /// Name assigned by the user (takes priority)
    #[serde(default)]
    pub name_by_user: Option<String>,
}

impl DeviceInfo {
    pub fn new(id: impl Into<String>, name: Option<&str>, name_by_user: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
            name_by_user: name_by_user.map(str::to_string),
        }
    }
}

/// Side mapping from device id to display metadata
///
/// Only used to resolve labels; never used to filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRegistry {
    devices: HashMap<String, DeviceInfo>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn get(&self, device_id: &str) -> Option<&DeviceInfo> {
        self.devices.get(device_id)
    }

    /// Resolve a device key to a friendly label.
    ///
    /// `None`, empty or [`NO_DEVICE_KEY`] → [`NO_DEVICE_LABEL`]; known device →
    /// `name_by_user`, else `name`, else the raw id; unknown device → the raw id.
    pub fn display_name(&self, device_key: Option<&str>) -> String {
        let Some(key) = device_key.filter(|k| !k.is_empty() && *k != NO_DEVICE_KEY) else {
            return NO_DEVICE_LABEL.to_string();
        };
        self.devices
            .get(key)
            .and_then(|info| {
                info.name_by_user
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .or_else(|| info.name.as_deref().filter(|n| !n.is_empty()))
            })
            .unwrap_or(key)
            .to_string()
    }
}

impl FromIterator<DeviceInfo> for DeviceRegistry {
    fn from_iter<I: IntoIterator<Item = DeviceInfo>>(iter: I) -> Self {
        Self {
            devices: iter.into_iter().map(|info| (info.id.clone(), info)).collect(),
        }
    }
}

impl From<Vec<DeviceInfo>> for DeviceRegistry {
    fn from(devices: Vec<DeviceInfo>) -> Self {
        devices.into_iter().collect()
    }
}
