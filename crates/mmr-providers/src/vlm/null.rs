//! Null VLM provider for testing and development

use std::sync::Arc;

use async_trait::async_trait;
use mmr_application::registry::{ProviderEntry, VLM_PROVIDERS};
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::VlmProvider;
use mmr_domain::value_objects::MediaRef;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::utils::parse_section;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NullVlmSettings {
    caption: String,
}

/// Returns a fixed caption for every image
///
/// An empty caption (the default) means no caption text is indexed.
#[derive(Debug, Default)]
pub struct NullVlmProvider {
    caption: String,
}

impl NullVlmProvider {
    /// Create a provider answering `caption`
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
        }
    }

    fn build(section: &Value) -> Result<Arc<dyn VlmProvider>> {
        let settings: NullVlmSettings = parse_section("vlm/null", section)?;
        Ok(Arc::new(Self::new(settings.caption)))
    }
}

#[async_trait]
impl VlmProvider for NullVlmProvider {
    async fn infer(&self, image: &MediaRef, _prompt: &str) -> Result<String> {
        if image.is_empty() {
            return Err(Error::validation("image reference cannot be empty"));
        }
        Ok(self.caption.clone())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[linkme::distributed_slice(VLM_PROVIDERS)]
static NULL_VLM: ProviderEntry<dyn VlmProvider> = ProviderEntry {
    name: "null",
    description: "Null provider for testing (fixed caption)",
    config_template: || json!({"caption": ""}),
    factory: NullVlmProvider::build,
};
