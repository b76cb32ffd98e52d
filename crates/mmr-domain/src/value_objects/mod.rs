//! Value objects shared by every layer

pub mod embedding;
pub mod media;
pub mod multimodal;
pub mod search;

pub use embedding::Embedding;
pub use media::MediaRef;
pub use multimodal::{IndexParam, Modality, MultiModalData, TextOrigin};
pub use search::{DEFAULT_TOP_K, RecordPage, SearchHit, SearchQuery, StoredRecord};
