//! ┌────────────────────────────────────────────────────────────────────────┐
//! │                           Main loop (app.rs)                           │
//! │                                                                        │
//! │    ┌──────────┐     ┌─────────┐     ┌──────────┐     ┌─────────┐       │
//! │    │ key press│ ──▶ │  Event  │ ──▶ │ Message  │ ──▶ │ Update  │       │
//! │    └──────────┘     │  layer  │     │  layer   │     │  layer  │       │
//! │         ▲           └─────────┘     └──────────┘     └────┬────┘       │
//! │         │                                                 │            │
//! │         │           ┌─────────┐     ┌──────────┐          ▼            │
//! │         │           │  Util   │     │  Model   │ ◀── Command ──┐       │
//! │         │           │  layer  │     │  layer   │               │       │
//! │         │           └─────────┘     └────┬─────┘     ┌─────────┴─────┐ │
//! │         │                                │           │ EntityManager │ │
//! │         │           ┌─────────┐          ▼           │ (core, async) │ │
//! │         └────────── │  View   │ ◀── read state       └───────────────┘ │
//! │          screen     │  layer  │                                        │
//! │                     └─────────┘                                        │
//! └────────────────────────────────────────────────────────────────────────┘
//!
//! Entity Manager terminal UI
//!
//! Startup order:
//!     1. file logging          (the terminal owns stdout)
//!     2. config                a malformed file aborts here, before raw mode
//!     3. runtime + manager     current-thread tokio runtime, demo backend
//!     4. first load
//!     5. terminal → app::run → restore, restore always runs before the
//!        result of the loop is returned
//!

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use entity_manager_core::EntityManager;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backend::{demo_backend, ConfigService, LocalConfigService};
use util::{init_terminal, restore_terminal};

const LOG_FILE: &str = "entity-manager.log";

/// Route `tracing` and the core's `log` records to a file in the cache dir
fn init_logging() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("entity-manager");
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(path)
}

fn main() -> Result<()> {
    let log_path = init_logging()?;
    tracing::info!("Starting Entity Manager TUI (log: {})", log_path.display());

    let config_service = LocalConfigService::new();
    let config = config_service.load()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start the async runtime")?;
    let manager = EntityManager::new(Arc::new(demo_backend()), config.manager);

    let mut app = model::App::new(runtime, manager, config, Box::new(config_service));
    app.load();

    let mut terminal = init_terminal()?;

    let result = app::run(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    tracing::info!("Entity Manager TUI exited");
    result
}
