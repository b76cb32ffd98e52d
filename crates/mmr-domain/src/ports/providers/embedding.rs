use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{Embedding, MediaRef};

/// Text embedding capability (`text_embedding` category)
///
/// Fails with an inference error when the remote call errors, returns no
/// data, or returns a zero-length vector.
///
/// # Example
///
/// ```ignore
/// let provider: Arc<dyn TextEmbeddingProvider> = manager.get::<TextEmbedding>()?;
/// let embedding = provider.infer("a cat sleeping on a sofa").await?;
/// println!("{} dimensions", embedding.dimensions());
/// ```
#[async_trait]
pub trait TextEmbeddingProvider: Send + Sync {
    /// Embed one text
    async fn infer(&self, text: &str) -> Result<Embedding>;

    /// Implementation name (e.g. "qwen", "null")
    fn provider_name(&self) -> &str;
}

/// Image embedding capability (`image_embedding` category)
///
/// An empty reference is a validation error and never reaches the network.
#[async_trait]
pub trait ImageEmbeddingProvider: Send + Sync {
    /// Embed one image
    async fn infer(&self, image: &MediaRef) -> Result<Embedding>;

    /// Implementation name
    fn provider_name(&self) -> &str;
}

/// Video embedding capability (`video_embedding` category)
///
/// An empty reference is a validation error and never reaches the network.
#[async_trait]
pub trait VideoEmbeddingProvider: Send + Sync {
    /// Embed one video
    async fn infer(&self, video: &MediaRef) -> Result<Embedding>;

    /// Implementation name
    fn provider_name(&self) -> &str;
}
