//! Application configuration
//!
//! [`AppConfig`] is loaded by [`ConfigLoader`]; its `components` tree is
//! handed verbatim to the component manager.

mod loader;
mod types;

pub use loader::{ConfigLoader, validate_app_config};
pub use types::{AppConfig, AudioConfig, LoggingConfig};
