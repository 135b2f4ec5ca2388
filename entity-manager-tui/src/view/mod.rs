//! src/view/mod.rs
//! View layer: draws the model, never mutates it.
//!
//!     ┌──────────────────────────────────────────────────────────┐
//!     │ title bar: view state + stats                            │
//!     ├──────────────────────────────────────────────────────────┤
//!     │ search line (only while searching or filtered)           │
//!     ├──────────────────────────────────────────────────────────┤
//!     │ ┌ Entities ────────────────────────────────────────────┐ │
//!     │ │ tree.rs: integration ▸ device ▸ entity rows          │ │
//!     │ └──────────────────────────────────────────────────────┘ │
//!     ├──────────────────────────────────────────────────────────┤
//!     │ status bar: hints │ latest summary                       │
//!     └──────────────────────────────────────────────────────────┘
//!
//!     Dialogs (rename, bulk rename) are drawn over the tree, overlays
//!     (help, blocking notice) over everything.
//!

pub mod components;
mod layout;
pub mod theme;
mod tree;

pub use layout::render;
