//! Search and storage value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IndexParam, MultiModalData, TextOrigin};

/// Default number of hits returned by a search
pub const DEFAULT_TOP_K: usize = 10;

/// A similarity query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Query record (text, image and/or video), extracted like any other record
    pub data: MultiModalData,
    /// Maximum number of hits
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl SearchQuery {
    /// Query with the default `top_k`
    pub fn new(data: MultiModalData) -> Self {
        Self {
            data,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override `top_k`
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

/// A record as held by the search engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Record identifier assigned on insertion
    pub id: String,
    /// Original text
    #[serde(default)]
    pub text: String,
    /// Image reference
    #[serde(default)]
    pub image: String,
    /// Video reference
    #[serde(default)]
    pub video: String,
    /// Caption derived from the image
    #[serde(default)]
    pub image_text: String,
    /// Transcript derived from the video
    #[serde(default)]
    pub video_text: String,
    /// Derived embeddings
    #[serde(default)]
    pub index_param: IndexParam,
    /// Insertion time
    pub created_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Flatten an extracted record into its stored form
    pub fn from_data(id: impl Into<String>, data: &MultiModalData) -> Self {
        let param = &data.index_param;
        Self {
            id: id.into(),
            text: data.text().unwrap_or_default().to_string(),
            image: data.image().map(|m| m.as_str().to_string()).unwrap_or_default(),
            video: data.video().map(|m| m.as_str().to_string()).unwrap_or_default(),
            image_text: param
                .text_for(TextOrigin::ImageCaption)
                .unwrap_or_default()
                .to_string(),
            video_text: param
                .text_for(TextOrigin::VideoTranscript)
                .unwrap_or_default()
                .to_string(),
            index_param: param.clone(),
            created_at: Utc::now(),
        }
    }
}

/// One ranked search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Record identifier
    pub id: String,
    /// Original text
    pub text: String,
    /// Image reference
    pub image: String,
    /// Video reference
    pub video: String,
    /// Caption derived from the image
    pub image_text: String,
    /// Transcript derived from the video
    pub video_text: String,
    /// Relevance score (higher is better)
    pub score: f32,
}

impl SearchHit {
    /// Build a hit from a stored record and its score
    pub fn from_record(record: &StoredRecord, score: f32) -> Self {
        Self {
            id: record.id.clone(),
            text: record.text.clone(),
            image: record.image.clone(),
            video: record.video.clone(),
            image_text: record.image_text.clone(),
            video_text: record.video_text.clone(),
            score,
        }
    }
}

/// One page of stored records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    /// Records on this page, in insertion order
    pub items: Vec<StoredRecord>,
    /// Total number of stored records
    pub total: usize,
    /// 1-based page number
    pub page: usize,
    /// Page size
    pub page_size: usize,
}
