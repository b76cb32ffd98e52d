//! Qwen VLM Provider
//!
//! Image captioning through DashScope multimodal generation (qwen-vl).
//! The prompt goes in a system message, the image in the user message, and
//! the caption is read from `output.choices[0].message.content[0].text`.

use std::sync::Arc;

use async_trait::async_trait;
use mmr_application::registry::{ProviderEntry, VLM_PROVIDERS};
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::VlmProvider;
use mmr_domain::value_objects::MediaRef;
use reqwest::Client;
use serde_json::{Value, json};

use crate::constants::{DASHSCOPE_MULTIMODAL_GENERATION_URL, QWEN_VLM_MODEL};
use crate::utils::{DashScopeSettings, HttpResponseUtils, http_client};

const COMPONENT: &str = "vlm/qwen";

/// Qwen vision-language provider
pub struct QwenVlmProvider {
    settings: DashScopeSettings,
    http_client: Client,
}

impl QwenVlmProvider {
    /// Parse, validate and build from a configuration section
    pub fn from_config(section: &Value) -> Result<Self> {
        let settings = DashScopeSettings::from_section(COMPONENT, section)?;
        let http_client = http_client(COMPONENT, settings.timeout())?;
        Ok(Self {
            settings,
            http_client,
        })
    }

    /// Default configuration section
    pub fn config_template() -> Value {
        DashScopeSettings::template(DASHSCOPE_MULTIMODAL_GENERATION_URL, QWEN_VLM_MODEL)
    }

    fn build(section: &Value) -> Result<Arc<dyn VlmProvider>> {
        Ok(Arc::new(Self::from_config(section)?))
    }

    fn messages(image: &MediaRef, prompt: &str) -> Value {
        let user = json!({"role": "user", "content": [{"image": image.as_str()}]});
        if prompt.trim().is_empty() {
            json!([user])
        } else {
            json!([{"role": "system", "content": [{"text": prompt}]}, user])
        }
    }
}

#[async_trait]
impl VlmProvider for QwenVlmProvider {
    async fn infer(&self, image: &MediaRef, prompt: &str) -> Result<String> {
        if image.is_empty() {
            return Err(Error::validation("image reference cannot be empty"));
        }

        let payload = json!({
            "model": self.settings.model,
            "input": {"messages": Self::messages(image, prompt)},
        });
        let request = self
            .http_client
            .post(&self.settings.base_url)
            .bearer_auth(&self.settings.dashscope_api_key)
            .timeout(self.settings.timeout())
            .json(&payload);
        let response = HttpResponseUtils::send_and_parse(request, COMPONENT).await?;

        let caption = response["output"]["choices"][0]["message"]["content"]
            .as_array()
            .and_then(|parts| parts.iter().find_map(|part| part["text"].as_str()))
            .ok_or_else(|| Error::inference(COMPONENT, "no caption text found in response"))?;

        tracing::debug!(image = %image, chars = caption.chars().count(), "Image captioned");
        Ok(caption.trim().to_string())
    }

    fn provider_name(&self) -> &str {
        "qwen"
    }
}

#[linkme::distributed_slice(VLM_PROVIDERS)]
static QWEN_VLM: ProviderEntry<dyn VlmProvider> = ProviderEntry {
    name: "qwen",
    description: "Qwen-VL image captioning via DashScope multimodal generation",
    config_template: QwenVlmProvider::config_template,
    factory: QwenVlmProvider::build,
};
