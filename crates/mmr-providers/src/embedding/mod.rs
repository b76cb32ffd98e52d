//! Embedding provider implementations
//!
//! | Implementation | Categories | Backend |
//! |----------------|------------|---------|
//! | `qwen` | text_embedding | DashScope OpenAI-compatible `/embeddings` |
//! | `qwen` | image_embedding, video_embedding | DashScope multimodal embedding |
//! | `null` | all three | Deterministic offline vectors |

pub mod null;
pub mod qwen_multimodal;
pub mod qwen_text;

pub use null::{NullImageEmbeddingProvider, NullTextEmbeddingProvider, NullVideoEmbeddingProvider};
pub use qwen_multimodal::{QwenImageEmbeddingProvider, QwenVideoEmbeddingProvider};
pub use qwen_text::QwenTextEmbeddingProvider;
