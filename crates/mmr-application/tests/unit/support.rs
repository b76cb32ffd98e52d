//! Configurable mock implementations shared by the test suites
//!
//! Factories are plain `fn` pointers, so mocks read their behaviour from
//! their configuration section and report calls into a global ledger keyed
//! by the `tag` field. Each test uses its own tag.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mmr_application::ComponentManager;
use mmr_application::components::{
    Asr, Capability, ImageEmbedding, SearchEngine, Storage, TextEmbedding, VideoEmbedding, Vlm,
};
use mmr_application::registry::{ImplementationRegistry, ProviderEntry};
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::{
    AsrProvider, AudioExtractor, ImageEmbeddingProvider, StorageProvider, TextEmbeddingProvider,
    VideoEmbeddingProvider, VlmProvider,
};
use mmr_domain::value_objects::{Embedding, MediaRef};
use serde::Deserialize;
use serde_json::{Value, json};

static CALLS: LazyLock<Mutex<HashMap<String, Vec<String>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Calls recorded under `tag`, in completion order, as `category:input`
pub fn calls(tag: &str) -> Vec<String> {
    CALLS
        .lock()
        .unwrap()
        .get(tag)
        .cloned()
        .unwrap_or_default()
}

/// Number of calls recorded under `tag` for `category`
pub fn call_count(tag: &str, category: &str) -> usize {
    calls(tag)
        .iter()
        .filter(|c| c.split(':').next() == Some(category))
        .count()
}

fn record(tag: &str, category: &str, input: &str) {
    CALLS
        .lock()
        .unwrap()
        .entry(tag.to_string())
        .or_default()
        .push(format!("{category}:{input}"));
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MockSettings {
    pub tag: String,
    pub delay_ms: u64,
    pub fail: bool,
    pub output: String,
}

impl MockSettings {
    fn parse(section: &Value) -> Result<Self> {
        Ok(serde_json::from_value(section.clone())?)
    }

    async fn run(&self, category: &str, input: &str) -> Result<()> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        record(&self.tag, category, input);
        if self.fail {
            return Err(Error::inference(
                format!("{category}/mock"),
                "mock failure",
            ));
        }
        Ok(())
    }
}

fn vector_for(input: &str) -> Vec<f32> {
    vec![input.len() as f32 + 1.0, 1.0, 0.5]
}

pub struct MockText(MockSettings);
pub struct MockImage(MockSettings);
pub struct MockVideo(MockSettings);
pub struct MockAsr(MockSettings);
pub struct MockVlm(MockSettings);
pub struct MockStorage(MockSettings);

#[async_trait]
impl TextEmbeddingProvider for MockText {
    async fn infer(&self, text: &str) -> Result<Embedding> {
        self.0.run("text_embedding", text).await?;
        Embedding::new(vector_for(text), "mock-text")
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl ImageEmbeddingProvider for MockImage {
    async fn infer(&self, image: &MediaRef) -> Result<Embedding> {
        if image.is_empty() {
            return Err(Error::validation("image reference is empty"));
        }
        self.0.run("image_embedding", image.as_str()).await?;
        Embedding::new(vector_for(image.as_str()), "mock-image")
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl VideoEmbeddingProvider for MockVideo {
    async fn infer(&self, video: &MediaRef) -> Result<Embedding> {
        if video.is_empty() {
            return Err(Error::validation("video reference is empty"));
        }
        self.0.run("video_embedding", video.as_str()).await?;
        Embedding::new(vector_for(video.as_str()), "mock-video")
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl AsrProvider for MockAsr {
    async fn infer(&self, audio: &MediaRef) -> Result<String> {
        self.0.run("asr", audio.as_str()).await?;
        Ok(self.0.output.clone())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl VlmProvider for MockVlm {
    async fn infer(&self, image: &MediaRef, prompt: &str) -> Result<String> {
        self.0.run("vlm", &format!("{}|{prompt}", image.as_str())).await?;
        Ok(self.0.output.clone())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl StorageProvider for MockStorage {
    async fn save(&self, _file: &MediaRef, name: &str) -> Result<String> {
        self.0.run("storage", name).await?;
        Ok(format!("mock://{name}"))
    }

    async fn get_url(&self, name_or_url: &str) -> Result<String> {
        Ok(format!("mock://{name_or_url}"))
    }

    async fn delete(&self, name: &str) -> Result<()> {
        record(&self.0.tag, "storage_delete", name);
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// Audio extractor returning a fixed payload
pub struct MockAudio {
    pub settings: MockSettings,
}

impl MockAudio {
    pub fn new(tag: &str) -> Arc<Self> {
        Arc::new(Self {
            settings: MockSettings {
                tag: tag.to_string(),
                ..MockSettings::default()
            },
        })
    }
}

#[async_trait]
impl AudioExtractor for MockAudio {
    async fn extract_wav(&self, video: &MediaRef) -> Result<Vec<u8>> {
        self.settings.run("audio", video.as_str()).await?;
        Ok(b"RIFF....WAVE".to_vec())
    }
}

fn template() -> Value {
    json!({"tag": "", "delay_ms": 0, "fail": false, "output": ""})
}

macro_rules! mock_registry {
    ($fn_name:ident, $capability:ty, $provider:ident, $mock:ident) => {
        pub fn $fn_name() -> ImplementationRegistry<dyn $provider> {
            fn build(section: &Value) -> Result<Arc<dyn $provider>> {
                Ok(Arc::new($mock(MockSettings::parse(section)?)))
            }
            let mut registry = ImplementationRegistry::new(<$capability>::CATEGORY);
            registry.register(ProviderEntry {
                name: "mock",
                description: "Test double",
                config_template: template,
                factory: build,
            });
            registry
        }
    };
}

mock_registry!(text_registry, TextEmbedding, TextEmbeddingProvider, MockText);
mock_registry!(image_registry, ImageEmbedding, ImageEmbeddingProvider, MockImage);
mock_registry!(video_registry, VideoEmbedding, VideoEmbeddingProvider, MockVideo);
mock_registry!(asr_registry, Asr, AsrProvider, MockAsr);
mock_registry!(vlm_registry, Vlm, VlmProvider, MockVlm);
mock_registry!(storage_registry, Storage, StorageProvider, MockStorage);

/// Manager with a mock implementation in every AI category and the real
/// in-memory search engine
///
/// `overrides` maps a category name to extra fields of its mock section.
pub fn mock_manager(tag: &str, overrides: Value) -> Arc<ComponentManager> {
    let mut manager = ComponentManager::new();
    manager.register::<TextEmbedding>(text_registry());
    manager.register::<ImageEmbedding>(image_registry());
    manager.register::<VideoEmbedding>(video_registry());
    manager.register::<Asr>(asr_registry());
    manager.register::<Vlm>(vlm_registry());
    manager.register::<Storage>(storage_registry());
    manager.register::<SearchEngine>(SearchEngine::registry());

    let mut tree = serde_json::Map::new();
    for category in manager.categories() {
        if category == SearchEngine::CATEGORY {
            tree.insert(
                category.to_string(),
                json!({"implementation_type": "memory", "memory": {}}),
            );
            continue;
        }
        let mut section = json!({"tag": tag});
        if let Some(Value::Object(extra)) = overrides.get(category) {
            for (key, value) in extra {
                section[key] = value.clone();
            }
        }
        tree.insert(
            category.to_string(),
            json!({"implementation_type": "mock", "mock": section}),
        );
    }
    manager
        .apply_config_value(&Value::Object(tree))
        .expect("mock configuration applies");
    Arc::new(manager)
}
