//! # Multimodal Retriever - Capability Implementations
//!
//! Concrete implementations of the capability ports defined in `mmr-domain`.
//! Every implementation registers itself in the matching `mmr-application`
//! registry slice at link time, so linking this crate is all it takes to make
//! them selectable by `implementation_type`.
//!
//! ## Implementations
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | `text_embedding` | `TextEmbeddingProvider` | qwen, null |
//! | `image_embedding` | `ImageEmbeddingProvider` | qwen, null |
//! | `video_embedding` | `VideoEmbeddingProvider` | qwen, null |
//! | `asr` | `AsrProvider` | aliyun, null |
//! | `vlm` | `VlmProvider` | qwen, null |
//! | `search_engine` | `SearchEngineProvider` | memory |
//! | `storage` | `StorageProvider` | memory, local |
//!
//! The ffmpeg [`audio::FfmpegAudioExtractor`] is not a registry category; it
//! is handed to the extraction pipeline directly.
//!
//! ## Usage
//!
//! ```ignore
//! // Force the linker to keep the registrations
//! extern crate mmr_providers;
//!
//! let manager = mmr_application::ComponentManager::from_registered();
//! ```

// Re-export mmr-domain types commonly used with providers
pub use mmr_domain::error::{Error, Result};
pub use mmr_domain::ports::providers::{
    AsrProvider, AudioExtractor, ImageEmbeddingProvider, SearchEngineProvider, StorageProvider,
    TextEmbeddingProvider, VideoEmbeddingProvider, VlmProvider,
};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Text, image and video embedding implementations
pub mod embedding;

/// Speech recognition implementations
pub mod asr;

/// Vision-language (captioning) implementations
pub mod vlm;

/// Search engine implementations
pub mod search_engine;

/// Object storage implementations
pub mod storage;

/// Audio track extraction
pub mod audio;
