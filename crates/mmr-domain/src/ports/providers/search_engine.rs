use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{MultiModalData, RecordPage, SearchHit, StoredRecord};

/// Search engine backend (`search_engine` category)
///
/// Records handed to `add` and `search` already carry their derived
/// [`IndexParam`](crate::value_objects::IndexParam).
#[async_trait]
pub trait SearchEngineProvider: Send + Sync {
    /// Index an extracted record, returning its id
    async fn add(&self, record: &MultiModalData) -> Result<String>;

    /// Rank stored records against an extracted query record
    async fn search(&self, query: &MultiModalData, top_k: usize) -> Result<Vec<SearchHit>>;

    /// Fetch one record
    async fn get(&self, id: &str) -> Result<Option<StoredRecord>>;

    /// Delete one record, returning whether it existed
    async fn delete(&self, id: &str) -> Result<bool>;

    /// List records page by page (1-based `page`)
    async fn list(&self, page: usize, page_size: usize) -> Result<RecordPage>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;

    /// Implementation name
    fn provider_name(&self) -> &str;
}
