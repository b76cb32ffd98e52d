//! Qwen Text Embedding Provider
//!
//! Implements the TextEmbeddingProvider port using DashScope's
//! OpenAI-compatible `/embeddings` endpoint (text-embedding-v3/v4).

use std::sync::Arc;

use async_trait::async_trait;
use mmr_application::registry::{ProviderEntry, TEXT_EMBEDDING_PROVIDERS};
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::TextEmbeddingProvider;
use mmr_domain::value_objects::Embedding;
use reqwest::Client;
use serde_json::{Value, json};

use crate::constants::{DASHSCOPE_COMPATIBLE_BASE_URL, QWEN_TEXT_EMBEDDING_MODEL};
use crate::utils::{DashScopeSettings, HttpResponseUtils, http_client, parse_vector};

const COMPONENT: &str = "text_embedding/qwen";

/// Qwen text embedding provider
///
/// ## Example
///
/// ```rust,no_run
/// use mmr_providers::embedding::QwenTextEmbeddingProvider;
/// use serde_json::json;
///
/// let provider = QwenTextEmbeddingProvider::from_config(&json!({
///     "dashscope_api_key": "sk-your-key",
///     "base_url": "https://dashscope.aliyuncs.com/compatible-mode/v1",
///     "model": "text-embedding-v4"
/// }))
/// .unwrap();
/// ```
pub struct QwenTextEmbeddingProvider {
    settings: DashScopeSettings,
    http_client: Client,
}

impl QwenTextEmbeddingProvider {
    /// Create a provider from validated settings
    pub fn new(settings: DashScopeSettings, http_client: Client) -> Self {
        Self {
            settings,
            http_client,
        }
    }

    /// Parse, validate and build from a configuration section
    pub fn from_config(section: &Value) -> Result<Self> {
        let settings = DashScopeSettings::from_section(COMPONENT, section)?;
        let http_client = http_client(COMPONENT, settings.timeout())?;
        Ok(Self::new(settings, http_client))
    }

    /// Default configuration section
    pub fn config_template() -> Value {
        DashScopeSettings::template(DASHSCOPE_COMPATIBLE_BASE_URL, QWEN_TEXT_EMBEDDING_MODEL)
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn build(section: &Value) -> Result<Arc<dyn TextEmbeddingProvider>> {
        Ok(Arc::new(Self::from_config(section)?))
    }
}

#[async_trait]
impl TextEmbeddingProvider for QwenTextEmbeddingProvider {
    async fn infer(&self, text: &str) -> Result<Embedding> {
        let mut payload = json!({
            "model": self.settings.model,
            "input": [text],
            "encoding_format": "float"
        });
        if let Some(dimension) = self.settings.dimension {
            payload["dimensions"] = json!(dimension);
        }

        let request = self
            .http_client
            .post(format!("{}/embeddings", self.settings.base_url))
            .bearer_auth(&self.settings.dashscope_api_key)
            .timeout(self.settings.timeout())
            .json(&payload);
        let response = HttpResponseUtils::send_and_parse(request, COMPONENT).await?;

        let first = response["data"]
            .as_array()
            .and_then(|data| data.first())
            .ok_or_else(|| Error::inference(COMPONENT, "no embedding data found in response"))?;
        let vector = parse_vector(&first["embedding"], COMPONENT)?;
        if vector.is_empty() {
            return Err(Error::inference(COMPONENT, "empty embedding vector received"));
        }

        tracing::debug!(
            model = %self.settings.model,
            chars = text.chars().count(),
            dimensions = vector.len(),
            "Text embedded"
        );
        Embedding::new(vector, self.settings.model.clone())
    }

    fn provider_name(&self) -> &str {
        "qwen"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

#[linkme::distributed_slice(TEXT_EMBEDDING_PROVIDERS)]
static QWEN_TEXT_EMBEDDING: ProviderEntry<dyn TextEmbeddingProvider> = ProviderEntry {
    name: "qwen",
    description: "Qwen text embedding via DashScope's OpenAI-compatible API",
    config_template: QwenTextEmbeddingProvider::config_template,
    factory: QwenTextEmbeddingProvider::build,
};
