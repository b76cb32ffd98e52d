//! Null ASR provider for testing and development

use std::sync::Arc;

use async_trait::async_trait;
use mmr_application::registry::{ASR_PROVIDERS, ProviderEntry};
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::AsrProvider;
use mmr_domain::value_objects::MediaRef;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::utils::parse_section;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NullAsrSettings {
    transcript: String,
}

/// Returns a fixed transcript for every audio payload
#[derive(Debug, Default)]
pub struct NullAsrProvider {
    transcript: String,
}

impl NullAsrProvider {
    /// Create a provider answering `transcript`
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }

    fn build(section: &Value) -> Result<Arc<dyn AsrProvider>> {
        let settings: NullAsrSettings = parse_section("asr/null", section)?;
        Ok(Arc::new(Self::new(settings.transcript)))
    }
}

#[async_trait]
impl AsrProvider for NullAsrProvider {
    async fn infer(&self, audio: &MediaRef) -> Result<String> {
        if audio.is_empty() {
            return Err(Error::validation("audio reference cannot be empty"));
        }
        Ok(self.transcript.clone())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[linkme::distributed_slice(ASR_PROVIDERS)]
static NULL_ASR: ProviderEntry<dyn AsrProvider> = ProviderEntry {
    name: "null",
    description: "Null provider for testing (fixed transcript)",
    config_template: || json!({"transcript": ""}),
    factory: NullAsrProvider::build,
};
