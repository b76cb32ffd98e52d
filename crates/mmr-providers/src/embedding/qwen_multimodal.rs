//! Qwen Multimodal Embedding Providers
//!
//! Image and video embedding through DashScope's multimodal embedding
//! service. Both send one content item and read
//! `output.embeddings[0].embedding`; only the content key differs.

use std::sync::Arc;

use async_trait::async_trait;
use mmr_application::registry::{
    IMAGE_EMBEDDING_PROVIDERS, ProviderEntry, VIDEO_EMBEDDING_PROVIDERS,
};
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::{ImageEmbeddingProvider, VideoEmbeddingProvider};
use mmr_domain::value_objects::{Embedding, MediaRef};
use reqwest::Client;
use serde_json::{Value, json};

use crate::constants::{DASHSCOPE_MULTIMODAL_EMBEDDING_URL, QWEN_MULTIMODAL_EMBEDDING_MODEL};
use crate::utils::{DashScopeSettings, HttpResponseUtils, http_client, parse_vector};

/// Shared DashScope multimodal embedding client
struct MultimodalEmbeddingClient {
    settings: DashScopeSettings,
    http_client: Client,
    content_key: &'static str,
    component: &'static str,
}

impl MultimodalEmbeddingClient {
    fn from_config(section: &Value, content_key: &'static str, component: &'static str) -> Result<Self> {
        let settings = DashScopeSettings::from_section(component, section)?;
        let http_client = http_client(component, settings.timeout())?;
        Ok(Self {
            settings,
            http_client,
            content_key,
            component,
        })
    }

    async fn embed(&self, media: &MediaRef) -> Result<Embedding> {
        if media.is_empty() {
            return Err(Error::validation(format!(
                "{} reference cannot be empty",
                self.content_key
            )));
        }

        let mut parameters = json!({});
        if let Some(dimension) = self.settings.dimension {
            parameters["dimension"] = json!(dimension);
        }
        let mut content = serde_json::Map::new();
        content.insert(self.content_key.to_string(), json!(media.as_str()));
        let payload = json!({
            "model": self.settings.model,
            "input": {"contents": [content]},
            "parameters": parameters,
        });

        let request = self
            .http_client
            .post(&self.settings.base_url)
            .bearer_auth(&self.settings.dashscope_api_key)
            .timeout(self.settings.timeout())
            .json(&payload);
        let response = HttpResponseUtils::send_and_parse(request, self.component).await?;

        let first = response["output"]["embeddings"]
            .as_array()
            .and_then(|items| items.first())
            .ok_or_else(|| {
                Error::inference(self.component, "no embedding data found in response")
            })?;
        let vector = parse_vector(&first["embedding"], self.component)?;
        if vector.is_empty() {
            return Err(Error::inference(
                self.component,
                "empty embedding vector received",
            ));
        }

        tracing::debug!(
            component = self.component,
            media = %media,
            dimensions = vector.len(),
            "Media embedded"
        );
        Embedding::new(vector, self.settings.model.clone())
    }
}

fn config_template() -> Value {
    DashScopeSettings::template(
        DASHSCOPE_MULTIMODAL_EMBEDDING_URL,
        QWEN_MULTIMODAL_EMBEDDING_MODEL,
    )
}

/// Qwen image embedding provider
pub struct QwenImageEmbeddingProvider {
    client: MultimodalEmbeddingClient,
}

impl QwenImageEmbeddingProvider {
    /// Parse, validate and build from a configuration section
    pub fn from_config(section: &Value) -> Result<Self> {
        Ok(Self {
            client: MultimodalEmbeddingClient::from_config(section, "image", "image_embedding/qwen")?,
        })
    }

    fn build(section: &Value) -> Result<Arc<dyn ImageEmbeddingProvider>> {
        Ok(Arc::new(Self::from_config(section)?))
    }
}

#[async_trait]
impl ImageEmbeddingProvider for QwenImageEmbeddingProvider {
    async fn infer(&self, image: &MediaRef) -> Result<Embedding> {
        self.client.embed(image).await
    }

    fn provider_name(&self) -> &str {
        "qwen"
    }
}

/// Qwen video embedding provider
pub struct QwenVideoEmbeddingProvider {
    client: MultimodalEmbeddingClient,
}

impl QwenVideoEmbeddingProvider {
    /// Parse, validate and build from a configuration section
    pub fn from_config(section: &Value) -> Result<Self> {
        Ok(Self {
            client: MultimodalEmbeddingClient::from_config(section, "video", "video_embedding/qwen")?,
        })
    }

    fn build(section: &Value) -> Result<Arc<dyn VideoEmbeddingProvider>> {
        Ok(Arc::new(Self::from_config(section)?))
    }
}

#[async_trait]
impl VideoEmbeddingProvider for QwenVideoEmbeddingProvider {
    async fn infer(&self, video: &MediaRef) -> Result<Embedding> {
        self.client.embed(video).await
    }

    fn provider_name(&self) -> &str {
        "qwen"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

#[linkme::distributed_slice(IMAGE_EMBEDDING_PROVIDERS)]
static QWEN_IMAGE_EMBEDDING: ProviderEntry<dyn ImageEmbeddingProvider> = ProviderEntry {
    name: "qwen",
    description: "Qwen multimodal embedding of images via DashScope",
    config_template,
    factory: QwenImageEmbeddingProvider::build,
};

#[linkme::distributed_slice(VIDEO_EMBEDDING_PROVIDERS)]
static QWEN_VIDEO_EMBEDDING: ProviderEntry<dyn VideoEmbeddingProvider> = ProviderEntry {
    name: "qwen",
    description: "Qwen multimodal embedding of videos via DashScope",
    config_template,
    factory: QwenVideoEmbeddingProvider::build,
};
