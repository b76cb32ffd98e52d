//! Provider Utilities
//!
//! Shared utilities used by provider implementations.

mod http_response;
pub mod settings;

pub use http_response::{HttpResponseUtils, parse_vector};
pub use settings::{DashScopeSettings, http_client, parse_section, require};
