//! Object storage provider implementations

pub mod local;
pub mod memory;

pub use local::{LocalStorageProvider, LocalStorageSettings};
pub use memory::MemoryStorageProvider;
