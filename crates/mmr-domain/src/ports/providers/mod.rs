//! Capability ports implemented by `mmr-providers`
//!
//! Every capability is modeled the same way (config in, one item in, one
//! result out) so the registry and factory machinery stays category-agnostic.

pub mod asr;
pub mod audio;
pub mod embedding;
pub mod search_engine;
pub mod storage;
pub mod vlm;

pub use asr::AsrProvider;
pub use audio::AudioExtractor;
pub use embedding::{ImageEmbeddingProvider, TextEmbeddingProvider, VideoEmbeddingProvider};
pub use search_engine::SearchEngineProvider;
pub use storage::StorageProvider;
pub use vlm::VlmProvider;
