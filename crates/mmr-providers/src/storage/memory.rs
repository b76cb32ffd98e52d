//! In-memory storage provider
//!
//! Holds saved payloads in a concurrent map and hands out `memory://` URLs.
//! Nothing outside the process can fetch those URLs, so this backend only
//! suits local pipelines and tests.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use mmr_application::registry::{ProviderEntry, STORAGE_PROVIDERS};
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::StorageProvider;
use mmr_domain::value_objects::MediaRef;
use serde_json::{Value, json};

use crate::constants::MEMORY_STORAGE_SCHEME;

/// In-memory object storage
#[derive(Default)]
pub struct MemoryStorageProvider {
    objects: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryStorageProvider {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes saved under `name`
    pub fn bytes(&self, name: &str) -> Option<Vec<u8>> {
        let name = name.strip_prefix(MEMORY_STORAGE_SCHEME).unwrap_or(name);
        self.objects.get(name).map(|entry| entry.value().clone())
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when nothing has been saved
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    async fn save(&self, file: &MediaRef, name: &str) -> Result<String> {
        if file.is_empty() {
            return Err(Error::validation("file reference cannot be empty"));
        }
        if file.is_url() || file.as_str().starts_with(MEMORY_STORAGE_SCHEME) {
            return Ok(file.as_str().to_string());
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("object name cannot be empty"));
        }

        let bytes = file.decode_inline()?;
        tracing::debug!(name, size = bytes.len(), "Object saved in memory");
        self.objects.insert(name.to_string(), bytes);
        Ok(format!("{MEMORY_STORAGE_SCHEME}{name}"))
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let name = name.strip_prefix(MEMORY_STORAGE_SCHEME).unwrap_or(name).trim();
        if self.objects.remove(name).is_some() {
            tracing::debug!(name, "Object removed from memory");
        }
        Ok(())
    }

    async fn get_url(&self, name_or_url: &str) -> Result<String> {
        if MediaRef::new(name_or_url).is_url() {
            return Ok(name_or_url.to_string());
        }
        let name = name_or_url
            .strip_prefix(MEMORY_STORAGE_SCHEME)
            .unwrap_or(name_or_url);
        if self.objects.contains_key(name) {
            Ok(format!("{MEMORY_STORAGE_SCHEME}{name}"))
        } else {
            Err(Error::not_found(format!("object '{name}'")))
        }
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

fn memory_storage_factory(_section: &Value) -> Result<Arc<dyn StorageProvider>> {
    Ok(Arc::new(MemoryStorageProvider::new()))
}

#[linkme::distributed_slice(STORAGE_PROVIDERS)]
static MEMORY_STORAGE: ProviderEntry<dyn StorageProvider> = ProviderEntry {
    name: "memory",
    description: "In-memory object storage (non-persistent, process-local URLs)",
    config_template: || json!({}),
    factory: memory_storage_factory,
};
