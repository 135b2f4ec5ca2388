//! src/backend/mod.rs
//! Backend layer: where the entity data and the settings come from.
//!
//!     mod config_service;     // TuiConfig from <config_dir>/entity-manager/config.json
//!     mod demo;               // in-memory registry used as the data source
//!
//! The view-model only sees `Arc<dyn EntityBackend>`, so a networked backend
//! can replace the demo registry without touching the other layers.
//!

mod config_service;
mod demo;

pub use config_service::{ConfigService, LocalConfigService, TuiConfig};
pub use demo::demo_backend;
