//! Config service
//!
//! `TuiConfig` lives in `<config_dir>/entity-manager/config.json`. A missing
//! file means defaults; a file that does not parse is an error.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use entity_manager_core::ManagerConfig;
use serde::{Deserialize, Serialize};

use crate::view::theme::Theme;

const CONFIG_FILE: &str = "config.json";

/// Application config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub manager: ManagerConfig,
    pub theme: Theme,
}

pub trait ConfigService: Send + Sync {
    fn load(&self) -> Result<TuiConfig>;

    fn save(&self, config: &TuiConfig) -> Result<()>;
}

/// Application directory under the platform config dir
fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("entity-manager")
}

/// JSON file backed config service
pub struct LocalConfigService {
    path: PathBuf,
}

impl LocalConfigService {
    pub fn new() -> Self {
        Self::with_path(config_dir().join(CONFIG_FILE))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for LocalConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService for LocalConfigService {
    fn load(&self) -> Result<TuiConfig> {
        if !self.path.exists() {
            log::debug!("No config at {}, using defaults", self.path.display());
            return Ok(TuiConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Malformed config file {}", self.path.display()))?;
        log::info!("Loaded config from {}", self.path.display());
        Ok(config)
    }

    fn save(&self, config: &TuiConfig) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}
