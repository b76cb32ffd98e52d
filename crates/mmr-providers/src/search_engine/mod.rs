//! Search engine provider implementations

pub mod memory;

pub use memory::InMemorySearchEngineProvider;
