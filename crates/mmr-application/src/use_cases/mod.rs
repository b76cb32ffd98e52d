//! Use cases built on top of the component manager

pub mod extraction;
pub mod retrieval;

pub use extraction::{
    DEFAULT_AUDIO_PREFIX, DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_CAPTION_PROMPT, ExtractionPipeline,
    FailurePolicy, PipelineConfig,
};
pub use retrieval::{MAX_PAGE_SIZE, RetrievalService};
