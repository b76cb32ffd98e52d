//! Implementation Registry System
//!
//! Defines the auto-registration infrastructure for capability
//! implementations. Uses the `linkme` crate for compile-time registration
//! of implementations that are collected into explicit
//! [`ImplementationRegistry`] objects at bootstrap.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Implementation Registration Flow                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Provider defines:  #[linkme::distributed_slice(VLM_...)]    │
//! │                        static ENTRY: ProviderEntry<dyn ..> = .. │
//! │                              ↓                                  │
//! │  2. Bootstrap builds:  ImplementationRegistry::from_entries()   │
//! │                        (panics on duplicate names)              │
//! │                              ↓                                  │
//! │  3. Factory resolves:  registry.resolve("qwen")                 │
//! │                              ↓                                  │
//! │  4. Config selects:    implementation_type = "qwen"             │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering an implementation (in mmr-providers)
//!
//! ```ignore
//! use mmr_application::registry::{ProviderEntry, VLM_PROVIDERS};
//!
//! #[linkme::distributed_slice(VLM_PROVIDERS)]
//! static QWEN_VLM: ProviderEntry<dyn VlmProvider> = ProviderEntry {
//!     name: "qwen",
//!     description: "Qwen-VL captioning via DashScope",
//!     config_template: QwenVlmConfig::template,
//!     factory: QwenVlmProvider::build,
//! };
//! ```

pub mod entry;

pub use entry::{ImplementationRegistry, ProviderEntry, ProviderFactory};

use mmr_domain::ports::providers::{
    AsrProvider, ImageEmbeddingProvider, SearchEngineProvider, StorageProvider,
    TextEmbeddingProvider, VideoEmbeddingProvider, VlmProvider,
};

// Auto-collection via linkme distributed slices - implementations submit entries at compile time

/// Text embedding implementations
#[linkme::distributed_slice]
pub static TEXT_EMBEDDING_PROVIDERS: [ProviderEntry<dyn TextEmbeddingProvider>] = [..];

/// Image embedding implementations
#[linkme::distributed_slice]
pub static IMAGE_EMBEDDING_PROVIDERS: [ProviderEntry<dyn ImageEmbeddingProvider>] = [..];

/// Video embedding implementations
#[linkme::distributed_slice]
pub static VIDEO_EMBEDDING_PROVIDERS: [ProviderEntry<dyn VideoEmbeddingProvider>] = [..];

/// Speech recognition implementations
#[linkme::distributed_slice]
pub static ASR_PROVIDERS: [ProviderEntry<dyn AsrProvider>] = [..];

/// Vision-language implementations
#[linkme::distributed_slice]
pub static VLM_PROVIDERS: [ProviderEntry<dyn VlmProvider>] = [..];

/// Search engine backends
#[linkme::distributed_slice]
pub static SEARCH_ENGINE_PROVIDERS: [ProviderEntry<dyn SearchEngineProvider>] = [..];

/// Object storage backends
#[linkme::distributed_slice]
pub static STORAGE_PROVIDERS: [ProviderEntry<dyn StorageProvider>] = [..];
