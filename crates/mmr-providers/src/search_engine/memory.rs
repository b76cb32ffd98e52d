//! In-memory search engine provider implementation
//!
//! Keeps records in a concurrent map and ranks them with a hybrid score:
//! keyword overlap on the record's texts plus cosine similarity on every
//! embedding the query and the record both carry. Data is not persisted
//! and will be lost on restart.

use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use dashmap::DashMap;
use mmr_application::registry::{ProviderEntry, SEARCH_ENGINE_PROVIDERS};
use mmr_domain::error::Result;
use mmr_domain::ports::providers::SearchEngineProvider;
use mmr_domain::value_objects::{
    Embedding, IndexParam, MultiModalData, RecordPage, SearchHit, StoredRecord,
};
use serde_json::{Value, json};

/// Keyword weight of the record's own text
const TEXT_WEIGHT: f32 = 2.0;
/// Keyword weight of derived texts (captions, transcripts)
const DERIVED_TEXT_WEIGHT: f32 = 1.0;

/// Record plus its insertion sequence
type RecordEntry = (u64, StoredRecord);

/// In-memory search engine provider
///
/// Useful for development and testing where persistence is not required.
pub struct InMemorySearchEngineProvider {
    records: Arc<DashMap<String, RecordEntry>>,
    sequence: AtomicU64,
}

impl InMemorySearchEngineProvider {
    /// Create an empty search engine
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Snapshot of all records in insertion order
    fn ordered(&self) -> Vec<RecordEntry> {
        let mut entries: Vec<RecordEntry> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries
    }
}

impl Default for InMemorySearchEngineProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchEngineProvider for InMemorySearchEngineProvider {
    async fn add(&self, record: &MultiModalData) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let seq = self.sequence.fetch_add(1, AtomicOrdering::Relaxed);
        self.records
            .insert(id.clone(), (seq, StoredRecord::from_data(id.clone(), record)));
        tracing::debug!(id = %id, total = self.records.len(), "Record added");
        Ok(id)
    }

    async fn search(&self, query: &MultiModalData, top_k: usize) -> Result<Vec<SearchHit>> {
        let tokens = query_tokens(query);
        let param = &query.index_param;

        if tokens.is_empty() && !has_embeddings(param) {
            return Ok(self
                .ordered()
                .iter()
                .take(top_k)
                .map(|(_, record)| SearchHit::from_record(record, 1.0))
                .collect());
        }

        let mut scored: Vec<(f32, u64, StoredRecord)> = self
            .ordered()
            .into_iter()
            .filter_map(|(seq, record)| {
                let score = keyword_score(&tokens, &record)
                    + embedding_score(param, &record.index_param);
                (score > 0.0).then_some((score, seq, record))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        scored.truncate(top_k);

        Ok(scored
            .iter()
            .map(|(score, _, record)| SearchHit::from_record(record, *score))
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<StoredRecord>> {
        Ok(self.records.get(id).map(|entry| entry.value().1.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.records.remove(id).is_some())
    }

    async fn list(&self, page: usize, page_size: usize) -> Result<RecordPage> {
        let entries = self.ordered();
        let total = entries.len();
        let items = entries
            .into_iter()
            .skip(page.saturating_sub(1).saturating_mul(page_size))
            .take(page_size)
            .map(|(_, record)| record)
            .collect();
        Ok(RecordPage {
            items,
            total,
            page,
            page_size,
        })
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Lowercased, deduplicated query words
fn query_tokens(query: &MultiModalData) -> Vec<String> {
    let texts: Vec<&str> = if query.index_param.texts.is_empty() {
        query.text().into_iter().collect()
    } else {
        query.index_param.texts.iter().map(String::as_str).collect()
    };

    let mut tokens: Vec<String> = Vec::new();
    for word in texts.iter().flat_map(|t| t.split_whitespace()) {
        let word = word.to_lowercase();
        if !tokens.contains(&word) {
            tokens.push(word);
        }
    }
    tokens
}

fn has_embeddings(param: &IndexParam) -> bool {
    !param.text_embeddings.is_empty()
        || param.image_embedding.is_some()
        || param.video_embedding.is_some()
}

/// Fraction of query tokens found in `field`
#[allow(clippy::cast_precision_loss)]
fn overlap(tokens: &[String], field: &str) -> f32 {
    if tokens.is_empty() || field.is_empty() {
        return 0.0;
    }
    let field = field.to_lowercase();
    let hits = tokens.iter().filter(|t| field.contains(t.as_str())).count();
    hits as f32 / tokens.len() as f32
}

fn keyword_score(tokens: &[String], record: &StoredRecord) -> f32 {
    TEXT_WEIGHT * overlap(tokens, &record.text)
        + DERIVED_TEXT_WEIGHT * overlap(tokens, &record.image_text)
        + DERIVED_TEXT_WEIGHT * overlap(tokens, &record.video_text)
}

/// `cosine + 1`, so any comparable pair contributes a positive score
fn similarity(a: &Embedding, b: &Embedding) -> Option<f32> {
    a.cosine_similarity(b).map(|cosine| cosine + 1.0)
}

fn embedding_score(query: &IndexParam, record: &IndexParam) -> f32 {
    let text = query
        .text_embeddings
        .iter()
        .flat_map(|q| record.text_embeddings.iter().filter_map(move |r| similarity(q, r)))
        .fold(None, |best: Option<f32>, s| Some(best.map_or(s, |b| b.max(s))))
        .unwrap_or(0.0);

    let pair = |q: &Option<Embedding>, r: &Option<Embedding>| match (q, r) {
        (Some(q), Some(r)) => similarity(q, r).unwrap_or(0.0),
        _ => 0.0,
    };

    text + pair(&query.image_embedding, &record.image_embedding)
        + pair(&query.video_embedding, &record.video_embedding)
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

fn memory_search_engine_factory(_section: &Value) -> Result<Arc<dyn SearchEngineProvider>> {
    Ok(Arc::new(InMemorySearchEngineProvider::new()))
}

#[linkme::distributed_slice(SEARCH_ENGINE_PROVIDERS)]
static MEMORY_SEARCH_ENGINE: ProviderEntry<dyn SearchEngineProvider> = ProviderEntry {
    name: "memory",
    description: "In-memory hybrid keyword and vector search (fast, non-persistent)",
    config_template: || json!({}),
    factory: memory_search_engine_factory,
};
