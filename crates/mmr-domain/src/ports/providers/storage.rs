use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::MediaRef;

/// Object storage (`storage` category)
///
/// Used by the ASR path to stage extracted audio at a URL the speech model
/// can fetch.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Store a file given as URL or inline payload under `name`, returning its URL
    async fn save(&self, file: &MediaRef, name: &str) -> Result<String>;

    /// Store raw bytes under `name`, returning its URL
    async fn save_bytes(&self, bytes: &[u8], name: &str) -> Result<String> {
        self.save(&MediaRef::from_bytes(bytes, "application/octet-stream"), name)
            .await
    }

    /// Resolve a stored name (or pass through a URL) to a fetchable URL
    async fn get_url(&self, name_or_url: &str) -> Result<String>;

    /// Remove the object stored under `name`
    ///
    /// Removing a missing object, or passing a URL this storage does not
    /// own, succeeds without effect.
    async fn delete(&self, name: &str) -> Result<()>;

    /// Implementation name
    fn provider_name(&self) -> &str;
}
