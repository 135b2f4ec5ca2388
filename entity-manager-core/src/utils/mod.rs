//! Shared helpers

mod text;

pub use text::{contains_ci, replace_first};
