//! Demo registry
//!
//! Seeds the in-memory backend with a small home so the terminal UI has
//! something to manage without a live server.

use entity_manager_core::types::{DeviceInfo, Entity};
use entity_manager_core::InMemoryEntityBackend;

struct Seed {
    id: &'static str,
    platform: &'static str,
    device: Option<&'static str>,
    original_name: Option<&'static str>,
    disabled_by: Option<&'static str>,
}

const SEEDS: &[Seed] = &[
    Seed { id: "light.living_room", platform: "hue", device: Some("dev-living"), original_name: Some("Living Room Ceiling"), disabled_by: Some("integration") },
    Seed { id: "light.living_room_lamp", platform: "hue", device: Some("dev-living"), original_name: Some("Living Room Lamp"), disabled_by: Some("user") },
    Seed { id: "sensor.living_room_illuminance", platform: "hue", device: Some("dev-living"), original_name: None, disabled_by: None },
    Seed { id: "light.hallway", platform: "hue", device: Some("dev-hallway"), original_name: Some("Hallway"), disabled_by: Some("integration") },
    Seed { id: "sensor.hallway_motion", platform: "hue", device: Some("dev-hallway"), original_name: Some("Hallway Motion"), disabled_by: Some("integration") },
    Seed { id: "climate.thermostat", platform: "zwave_js", device: Some("dev-thermostat"), original_name: Some("Thermostat"), disabled_by: None },
    Seed { id: "sensor.thermostat_battery", platform: "zwave_js", device: Some("dev-thermostat"), original_name: Some("Battery"), disabled_by: Some("integration") },
    Seed { id: "sensor.thermostat_humidity", platform: "zwave_js", device: Some("dev-thermostat"), original_name: Some("Humidity"), disabled_by: Some("integration") },
    Seed { id: "sensor.washer_power", platform: "mqtt", device: None, original_name: Some("Washer Power"), disabled_by: Some("user") },
    Seed { id: "sensor.dryer_power", platform: "mqtt", device: None, original_name: Some("Dryer Power"), disabled_by: Some("user") },
    Seed { id: "binary_sensor.front_door", platform: "mqtt", device: None, original_name: Some("Front Door"), disabled_by: None },
    Seed { id: "cover.garage_door", platform: "esphome", device: Some("dev-garage"), original_name: Some("Garage Door"), disabled_by: None },
    Seed { id: "sensor.garage_wifi_signal", platform: "esphome", device: Some("dev-garage"), original_name: Some("WiFi Signal"), disabled_by: Some("integration") },
];

fn entity(seed: &Seed) -> Entity {
    let mut entity = Entity::new(seed.id, seed.platform);
    entity.device_id = seed.device.map(str::to_string);
    entity.original_name = seed.original_name.map(str::to_string);
    entity.disabled_by = seed.disabled_by.map(str::to_string);
    entity.is_disabled = seed.disabled_by.is_some();
    if seed.id.ends_with("_signal") || seed.id.ends_with("_battery") {
        entity.entity_category = Some("diagnostic".to_string());
    }
    entity
}

fn devices() -> Vec<DeviceInfo> {
    vec![
        DeviceInfo::new("dev-living", Some("Hue Bridge 1"), Some("Living Room")),
        DeviceInfo::new("dev-hallway", Some("Hue Motion Sensor"), None),
        DeviceInfo::new("dev-thermostat", Some("Thermostat T6"), None),
        DeviceInfo::new("dev-garage", Some("garage-door-esp"), Some("Garage Door Opener")),
    ]
}

/// In-memory backend holding the demo registry
pub fn demo_backend() -> InMemoryEntityBackend {
    InMemoryEntityBackend::with_registry(SEEDS.iter().map(entity).collect(), devices())
}
