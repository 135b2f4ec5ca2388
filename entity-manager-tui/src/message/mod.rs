//! src/message/mod.rs
//! Message layer: every user intent as a plain enum value.
//!
//!     ┌─────────┐          ┌────────────┐          ┌──────────┐
//!     │  Event  │ ───────▶ │  Message   │ ───────▶ │  Update  │
//!     │  layer  │ translate│   layer    │  consume │  layer   │
//!     └─────────┘          │ AppMessage │          └────┬─────┘
//!          ▲               │ TreeMsg    │               │ mutate
//!          │               │ SearchMsg  │               ▼
//!     ┌─────────┐          │ ModalMsg   │          ┌──────────┐
//!     │  View   │          └────────────┘          │  Model   │
//!     │  layer  │ ◀───────────── read ──────────── │  layer   │
//!     └─────────┘                                  └────┬─────┘
//!                                                       │ Command / block_on
//!                                                       ▼
//!                                              ┌──────────────────┐
//!                                              │ entity-manager-  │
//!                                              │      core        │
//!                                              └──────────────────┘
//!
//!     Module layout:
//!         mod app;    // AppMessage, the only type handed to update::update
//!         mod modal;  // ModalMessage
//!         mod tree;   // TreeMessage, SearchMessage
//!
//!     Messages carry no entity data. The update layer reads the row under the
//!     cursor when it handles a message, so a key press can never act on a
//!     row that a reload has already replaced.
//!

mod app;
mod modal;
mod tree;

pub use app::AppMessage;
pub use modal::ModalMessage;
pub use tree::{SearchMessage, TreeMessage};
