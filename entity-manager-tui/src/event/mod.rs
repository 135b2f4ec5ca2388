//! src/event/mod.rs
//! Event layer: terminal input → `AppMessage`.
//!
//!     poll_event(timeout)     blocks for at most `timeout`, called by app.rs
//!     handle_event(event,app) translates one event
//!
//!     Key routing, first match wins:
//!         Ctrl+C                      quit, from anywhere
//!         overlay open (help/notice)  Esc / Enter close it
//!         dialog open                 handle_modal_keys
//!         search line active         handle_search_keys
//!         otherwise                   handle_tree_keys (keymap.rs bindings)
//!
//!     Dialog keys:
//!         Esc         → ModalMessage::Close
//!         Tab         → ModalMessage::NextField
//!         Shift+Tab   → ModalMessage::PrevField
//!         Enter       → ModalMessage::Confirm
//!         ←/→/Space   → ModalMessage::ToggleTarget   (bulk dialog, target row)
//!         characters  → ModalMessage::Input(c)
//!         Backspace   → ModalMessage::Backspace
//!

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
