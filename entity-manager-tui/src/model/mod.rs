//! src/model/mod.rs
//! Model layer: everything the view reads.
//!
//!     App
//!      ├── manager: EntityManager     snapshot, selection, expansion, dialogs
//!      ├── runtime: tokio Runtime     current-thread, drives the manager
//!      ├── cursor: TreeCursor         index into manager.rows()
//!      ├── input_mode                 Normal | Search
//!      ├── bulk_field                 focused bulk rename input
//!      ├── overlay                    Help | blocking Notice
//!      └── status_message             latest summary / warning
//!
//! Entity state lives in the manager only. The model adds what a terminal
//! needs on top of it: a cursor, the raw search text and popup bookkeeping.
//!

mod app;
mod state;

pub use app::App;
pub use state::{BulkField, InputMode, Overlay, TreeCursor};

#[cfg(test)]
pub(crate) use app::test_support;
