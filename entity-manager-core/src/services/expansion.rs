//! Expansion tracker

use std::collections::HashSet;

/// Set of keys with toggle semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleSet {
    keys: HashSet<String>,
}

impl ToggleSet {
    /// Flip membership. Returns `true` when the key is now present.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key.to_string());
            true
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Expanded integrations and devices.
///
/// The two sets are independent. Devices are keyed by device key alone, so
/// the `no_device` group expands in every integration at once. Keys that no
/// longer exist after a reload are simply never looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    pub integrations: ToggleSet,
    pub devices: ToggleSet,
}

impl ExpansionState {
    pub fn toggle_integration(&mut self, name: &str) -> bool {
        self.integrations.toggle(name)
    }

    pub fn toggle_device(&mut self, device_key: &str) -> bool {
        self.devices.toggle(device_key)
    }

    pub fn is_integration_expanded(&self, name: &str) -> bool {
        self.integrations.contains(name)
    }

    pub fn is_device_expanded(&self, device_key: &str) -> bool {
        self.devices.contains(device_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        let mut set = ToggleSet::default();
        assert!(set.toggle("hue"));
        assert!(set.contains("hue"));
        assert!(!set.toggle("hue"));
        assert!(set.is_empty());
    }

    #[test]
    fn integration_and_device_sets_are_independent() {
        let mut expansion = ExpansionState::default();
        expansion.toggle_integration("hue");
        expansion.toggle_device("hue");

        assert!(expansion.is_integration_expanded("hue"));
        assert!(expansion.is_device_expanded("hue"));

        expansion.toggle_integration("hue");
        assert!(!expansion.is_integration_expanded("hue"));
        assert!(expansion.is_device_expanded("hue"));
    }
}
