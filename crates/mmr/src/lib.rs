//! # Multimodal Retriever
//!
//! Pluggable ingestion and retrieval core for text, image and video records.
//!
//! Each capability (text/image/video embedding, speech recognition, image
//! captioning, search engine, object storage) is selected at runtime by
//! configuration from the implementations registered at link time. The
//! extraction pipeline turns a record into an index payload of texts and
//! embeddings; the retrieval service stores and searches those records.
//!
//! ## Example
//!
//! ```ignore
//! use mmr::domain::value_objects::MultiModalData;
//! use mmr::infrastructure::{AppContext, ConfigLoader};
//!
//! let context = AppContext::load(ConfigLoader::new())?;
//! let id = context
//!     .retrieval()
//!     .insert(MultiModalData::new().with_text("a red bicycle"))
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, value objects and capability ports
//! - `application` - registries, factories, component manager, pipeline
//! - `providers` - concrete capability implementations
//! - `infrastructure` - configuration, logging and bootstrap

// Force-link mmr-providers so every registration is included
extern crate mmr_providers;

/// Domain layer - core types and capability ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use mmr_domain::*;
}

/// Application layer - component management and use cases
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use mmr_application::*;
}

/// Capability implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use mmr_providers::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use mmr_infrastructure::*;
}

pub mod cli;

pub use mmr_domain::error::{Error, Result};
