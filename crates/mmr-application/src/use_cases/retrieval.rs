//! Insert and search use cases
//!
//! Every record and every query goes through the extraction pipeline before
//! it reaches the search engine.

use std::sync::Arc;

use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::SearchEngineProvider;
use mmr_domain::value_objects::{MultiModalData, RecordPage, SearchHit, SearchQuery, StoredRecord};
use tokio_util::sync::CancellationToken;

use super::extraction::ExtractionPipeline;
use crate::components::{ComponentManager, SearchEngine};

/// Maximum page size accepted by [`RetrievalService::list`]
pub const MAX_PAGE_SIZE: usize = 100;

/// Insert, search and browse multimodal records
pub struct RetrievalService {
    manager: Arc<ComponentManager>,
    pipeline: Arc<ExtractionPipeline>,
}

impl RetrievalService {
    /// Create the service
    pub fn new(manager: Arc<ComponentManager>, pipeline: Arc<ExtractionPipeline>) -> Self {
        Self { manager, pipeline }
    }

    /// Extraction pipeline used by the service
    pub fn pipeline(&self) -> &Arc<ExtractionPipeline> {
        &self.pipeline
    }

    /// Extract and index a record, returning its id
    pub async fn insert(&self, data: MultiModalData) -> Result<String> {
        self.insert_with_cancel(data, &CancellationToken::new()).await
    }

    /// [`insert`](Self::insert), aborting when `token` is cancelled
    pub async fn insert_with_cancel(
        &self,
        mut data: MultiModalData,
        token: &CancellationToken,
    ) -> Result<String> {
        if data.is_empty() {
            return Err(Error::validation(
                "record must carry at least one of text, image or video",
            ));
        }
        data.index_param = self.pipeline.extract_with_cancel(&data, token).await?;

        let engine = self.engine()?;
        let id = engine.add(&data).await?;
        tracing::info!(
            id = %id,
            engine = engine.provider_name(),
            texts = data.index_param.texts.len(),
            "Record indexed"
        );
        Ok(id)
    }

    /// Rank indexed records against a query record
    pub async fn search(&self, query: SearchQuery) -> Result<Vec<SearchHit>> {
        self.search_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// [`search`](Self::search), aborting when `token` is cancelled
    pub async fn search_with_cancel(
        &self,
        query: SearchQuery,
        token: &CancellationToken,
    ) -> Result<Vec<SearchHit>> {
        if query.top_k == 0 {
            return Err(Error::validation("top_k must be greater than zero"));
        }
        let mut data = query.data;
        data.index_param = self.pipeline.extract_with_cancel(&data, token).await?;

        let hits = self.engine()?.search(&data, query.top_k).await?;
        tracing::info!(hits = hits.len(), top_k = query.top_k, "Search completed");
        Ok(hits)
    }

    /// Fetch one record
    pub async fn get(&self, id: &str) -> Result<StoredRecord> {
        self.engine()?
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("record '{id}'")))
    }

    /// Delete one record
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.engine()?.delete(id).await? {
            tracing::info!(id = %id, "Record deleted");
            Ok(())
        } else {
            Err(Error::not_found(format!("record '{id}'")))
        }
    }

    /// List records page by page (1-based `page`)
    pub async fn list(&self, page: usize, page_size: usize) -> Result<RecordPage> {
        if page == 0 {
            return Err(Error::validation("page starts at 1"));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        self.engine()?.list(page, page_size).await
    }

    /// Number of indexed records
    pub async fn count(&self) -> Result<usize> {
        self.engine()?.count().await
    }

    fn engine(&self) -> Result<Arc<dyn SearchEngineProvider>> {
        self.manager.get::<SearchEngine>()
    }
}
