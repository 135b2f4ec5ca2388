//! Reusable widgets drawn by the layout

pub mod modal;
pub mod statusbar;
