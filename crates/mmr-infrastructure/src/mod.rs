//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for the multimodal retriever:
//!
//! - [`config`]: layered configuration (defaults, TOML file, environment)
//! - [`logging`]: tracing subscriber setup
//! - [`error_ext`]: context helpers turning foreign errors into domain errors
//! - [`bootstrap`]: wiring registries, manager, pipeline and retrieval service

// Force the linker to keep every provider registration
extern crate mmr_providers;

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{AppContext, ComponentStatus};
pub use config::{AppConfig, AudioConfig, ConfigLoader, LoggingConfig};
