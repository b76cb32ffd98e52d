use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::MediaRef;

/// Vision-language capability (`vlm` category), used for captioning
#[async_trait]
pub trait VlmProvider: Send + Sync {
    /// Describe `image` following `prompt`
    async fn infer(&self, image: &MediaRef, prompt: &str) -> Result<String>;

    /// Implementation name
    fn provider_name(&self) -> &str;
}
