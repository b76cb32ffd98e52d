//! Local filesystem storage provider
//!
//! Writes payloads under `root_dir` and publishes them as
//! `{public_base_url}/{name}`. Point `public_base_url` at a web server
//! exposing `root_dir` when remote services (e.g. hosted ASR) must fetch
//! the files. Without it, `file://` URLs are returned.

use std::path::{Component as PathComponent, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use mmr_application::registry::{ProviderEntry, STORAGE_PROVIDERS};
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::StorageProvider;
use mmr_domain::value_objects::MediaRef;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::utils::{parse_section, require};

const COMPONENT: &str = "storage/local";

/// Local storage settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalStorageSettings {
    /// Directory receiving saved objects
    pub root_dir: String,
    /// URL prefix under which `root_dir` is served
    pub public_base_url: String,
}

/// Filesystem-backed object storage
pub struct LocalStorageProvider {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorageProvider {
    /// Create a provider rooted at `root`
    ///
    /// An empty `public_base_url` publishes `file://` URLs.
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        let root = root.into();
        let public_base_url = match public_base_url.trim().trim_end_matches('/') {
            "" => format!("file://{}", root.display()),
            url => url.to_string(),
        };
        Self {
            root,
            public_base_url,
        }
    }

    /// Parse, validate and build from a configuration section
    pub fn from_config(section: &Value) -> Result<Self> {
        let settings: LocalStorageSettings = parse_section(COMPONENT, section)?;
        let root_dir = require(COMPONENT, "root_dir", &settings.root_dir)?;
        Ok(Self::new(root_dir, &settings.public_base_url))
    }

    /// Directory receiving saved objects
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn build(section: &Value) -> Result<Arc<dyn StorageProvider>> {
        Ok(Arc::new(Self::from_config(section)?))
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{name}", self.public_base_url)
    }
}

/// Resolve `name` under `root`, rejecting absolute paths and `..`
fn object_path(root: &Path, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("object name cannot be empty"));
    }
    let relative = Path::new(name);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, PathComponent::Normal(_) | PathComponent::CurDir));
    if escapes {
        return Err(Error::validation(format!(
            "object name '{name}' must be a relative path inside the storage root"
        )));
    }
    Ok(root.join(relative))
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn save(&self, file: &MediaRef, name: &str) -> Result<String> {
        if file.is_empty() {
            return Err(Error::validation("file reference cannot be empty"));
        }
        if file.is_url() {
            return Ok(file.as_str().to_string());
        }

        let path = object_path(&self.root, name)?;
        let bytes = file.decode_inline()?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::io_with_source(format!("failed to create {}", parent.display()), e)
            })?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| Error::io_with_source(format!("failed to write {}", path.display()), e))?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Object saved");
        Ok(self.url_for(name.trim()))
    }

    async fn get_url(&self, name_or_url: &str) -> Result<String> {
        if MediaRef::new(name_or_url).is_url() {
            return Ok(name_or_url.to_string());
        }
        let path = object_path(&self.root, name_or_url)?;
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            Ok(self.url_for(name_or_url.trim()))
        } else {
            Err(Error::not_found(format!("object '{}'", name_or_url.trim())))
        }
    }

    async fn delete(&self, name: &str) -> Result<()> {
        if MediaRef::new(name).is_url() {
            return Ok(());
        }
        let path = object_path(&self.root, name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Object removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_with_source(
                format!("failed to remove {}", path.display()),
                e,
            )),
        }
    }

    fn provider_name(&self) -> &str {
        "local"
    }
}

#[linkme::distributed_slice(STORAGE_PROVIDERS)]
static LOCAL_STORAGE: ProviderEntry<dyn StorageProvider> = ProviderEntry {
    name: "local",
    description: "Local filesystem directory published under a base URL",
    config_template: || json!({"root_dir": "", "public_base_url": ""}),
    factory: LocalStorageProvider::build,
};
