//! Backend abstraction trait definition

mod entity_backend;
mod in_memory_backend;

pub use entity_backend::EntityBackend;
pub use in_memory_backend::InMemoryEntityBackend;
