//! Entity Manager Core Library
//!
//! Client-side view-model for managing entities grouped by integration and
//! device:
//! - Hierarchy snapshot and device name resolution
//! - Search filtering that keeps backend counts
//! - Selection and expansion tracking
//! - Bulk find/replace rename with preview
//!
//! The backend is abstracted through the [`EntityBackend`] trait, so the
//! engines run without any rendering surface.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{Command, EntityManager, ManagerConfig, Notice};
pub use traits::{EntityBackend, InMemoryEntityBackend};
