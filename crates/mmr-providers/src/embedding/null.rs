//! Null embedding providers for testing and development
//!
//! Provide deterministic, hash-based embeddings for every embedding
//! category. No external dependencies - always works offline.

use std::sync::Arc;

use async_trait::async_trait;
use mmr_application::registry::{
    IMAGE_EMBEDDING_PROVIDERS, ProviderEntry, TEXT_EMBEDDING_PROVIDERS, VIDEO_EMBEDDING_PROVIDERS,
};
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::{
    ImageEmbeddingProvider, TextEmbeddingProvider, VideoEmbeddingProvider,
};
use mmr_domain::value_objects::{Embedding, MediaRef};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::constants::EMBEDDING_DIMENSION_NULL;
use crate::utils::parse_section;

#[derive(Debug, Deserialize)]
struct NullSettings {
    #[serde(default = "default_dimension")]
    dimension: usize,
}

fn default_dimension() -> usize {
    EMBEDDING_DIMENSION_NULL
}

fn null_settings(component: &str, section: &Value) -> Result<usize> {
    let settings: NullSettings = parse_section(component, section)?;
    if settings.dimension == 0 {
        return Err(Error::configuration(
            component,
            "dimension must be greater than zero",
        ));
    }
    Ok(settings.dimension)
}

fn config_template() -> Value {
    json!({"dimension": EMBEDDING_DIMENSION_NULL})
}

/// Deterministic vector derived from the input's character sum
fn hashed_vector(input: &str, dimension: usize) -> Vec<f32> {
    let hash = input.chars().map(|c| c as u32).fold(0u32, u32::wrapping_add);
    let base_value = (hash % 1000) as f32 / 1000.0;
    (0..dimension)
        .map(|j| {
            let variation = (j as f32 * 0.01 + base_value).sin();
            (base_value + variation * 0.1).clamp(0.0, 1.0) + 1e-3
        })
        .collect()
}

/// Null text embedding provider
///
/// # Example
///
/// ```rust
/// use mmr_providers::embedding::NullTextEmbeddingProvider;
/// use mmr_domain::ports::providers::TextEmbeddingProvider;
///
/// let provider = NullTextEmbeddingProvider::new(8);
/// assert_eq!(provider.provider_name(), "null");
/// ```
pub struct NullTextEmbeddingProvider {
    dimension: usize,
}

impl NullTextEmbeddingProvider {
    /// Create a provider producing `dimension`-long vectors
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn build(section: &Value) -> Result<Arc<dyn TextEmbeddingProvider>> {
        let dimension = null_settings("text_embedding/null", section)?;
        Ok(Arc::new(Self::new(dimension)))
    }
}

impl Default for NullTextEmbeddingProvider {
    fn default() -> Self {
        Self::new(EMBEDDING_DIMENSION_NULL)
    }
}

#[async_trait]
impl TextEmbeddingProvider for NullTextEmbeddingProvider {
    async fn infer(&self, text: &str) -> Result<Embedding> {
        Embedding::new(hashed_vector(text, self.dimension), "null-text")
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

/// Null image embedding provider
pub struct NullImageEmbeddingProvider {
    dimension: usize,
}

impl NullImageEmbeddingProvider {
    /// Create a provider producing `dimension`-long vectors
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn build(section: &Value) -> Result<Arc<dyn ImageEmbeddingProvider>> {
        let dimension = null_settings("image_embedding/null", section)?;
        Ok(Arc::new(Self::new(dimension)))
    }
}

#[async_trait]
impl ImageEmbeddingProvider for NullImageEmbeddingProvider {
    async fn infer(&self, image: &MediaRef) -> Result<Embedding> {
        if image.is_empty() {
            return Err(Error::validation("image reference cannot be empty"));
        }
        Embedding::new(hashed_vector(image.as_str(), self.dimension), "null-image")
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

/// Null video embedding provider
pub struct NullVideoEmbeddingProvider {
    dimension: usize,
}

impl NullVideoEmbeddingProvider {
    /// Create a provider producing `dimension`-long vectors
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn build(section: &Value) -> Result<Arc<dyn VideoEmbeddingProvider>> {
        let dimension = null_settings("video_embedding/null", section)?;
        Ok(Arc::new(Self::new(dimension)))
    }
}

#[async_trait]
impl VideoEmbeddingProvider for NullVideoEmbeddingProvider {
    async fn infer(&self, video: &MediaRef) -> Result<Embedding> {
        if video.is_empty() {
            return Err(Error::validation("video reference cannot be empty"));
        }
        Embedding::new(hashed_vector(video.as_str(), self.dimension), "null-video")
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

#[linkme::distributed_slice(TEXT_EMBEDDING_PROVIDERS)]
static NULL_TEXT_EMBEDDING: ProviderEntry<dyn TextEmbeddingProvider> = ProviderEntry {
    name: "null",
    description: "Null provider for testing (deterministic hash-based embeddings)",
    config_template,
    factory: NullTextEmbeddingProvider::build,
};

#[linkme::distributed_slice(IMAGE_EMBEDDING_PROVIDERS)]
static NULL_IMAGE_EMBEDDING: ProviderEntry<dyn ImageEmbeddingProvider> = ProviderEntry {
    name: "null",
    description: "Null provider for testing (deterministic hash-based embeddings)",
    config_template,
    factory: NullImageEmbeddingProvider::build,
};

#[linkme::distributed_slice(VIDEO_EMBEDDING_PROVIDERS)]
static NULL_VIDEO_EMBEDDING: ProviderEntry<dyn VideoEmbeddingProvider> = ProviderEntry {
    name: "null",
    description: "Null provider for testing (deterministic hash-based embeddings)",
    config_template,
    factory: NullVideoEmbeddingProvider::build,
};
