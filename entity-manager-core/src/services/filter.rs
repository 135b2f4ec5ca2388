//! Search filter over the hierarchy snapshot

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::types::{Device, DeviceRegistry, Entity, Hierarchy, Integration};
use crate::utils::contains_ci;

/// Whether an entity matches a lower-cased search term.
///
/// Integration and device text count as entity text, so a term that only
/// matches the integration name surfaces every entity under it.
pub fn matches_entity(entity: &Entity, integration: &str, device_label: &str, term: &str) -> bool {
    contains_ci(entity.entity_id.as_str(), term)
        || entity
            .original_name
            .as_deref()
            .is_some_and(|name| contains_ci(name, term))
        || contains_ci(integration, term)
        || contains_ci(device_label, term)
}

/// Derive the visible tree for a search term.
///
/// An empty term returns the snapshot itself. Otherwise devices without a
/// matching entity and integrations without a remaining device are dropped;
/// backend counts are carried over untouched and entities stay shared.
pub fn filter_hierarchy<'a>(
    hierarchy: &'a Hierarchy,
    registry: &DeviceRegistry,
    term: &str,
) -> Cow<'a, Hierarchy> {
    if term.is_empty() {
        return Cow::Borrowed(hierarchy);
    }
    let term = term.to_lowercase();

    let integrations = hierarchy
        .integrations
        .iter()
        .filter_map(|integration| filter_integration(integration, registry, &term))
        .collect();

    Cow::Owned(Hierarchy::new(integrations))
}

fn filter_integration(
    integration: &Integration,
    registry: &DeviceRegistry,
    term: &str,
) -> Option<Integration> {
    let devices: IndexMap<String, Device> = integration
        .devices
        .iter()
        .filter_map(|(key, device)| {
            let label = registry.display_name(Some(key));
            let entities: Vec<Arc<Entity>> = device
                .entities
                .iter()
                .filter(|entity| matches_entity(entity, integration.name(), &label, term))
                .cloned()
                .collect();
            (!entities.is_empty()).then(|| (key.clone(), device.with_entities(entities)))
        })
        .collect();

    (!devices.is_empty()).then(|| integration.with_devices(devices))
}
