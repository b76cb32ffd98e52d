//! Provider Constants
//!
//! Constants specific to provider implementations. Category names live in
//! mmr-domain.

// ============================================================================
// HTTP CONSTANTS
// ============================================================================

/// JSON content type header value
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Default timeout for remote model calls, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// DASHSCOPE CONSTANTS
// ============================================================================

/// OpenAI-compatible endpoint used by Qwen text embedding
pub const DASHSCOPE_COMPATIBLE_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

/// Multimodal embedding endpoint used by Qwen image and video embedding
pub const DASHSCOPE_MULTIMODAL_EMBEDDING_URL: &str = "https://dashscope.aliyuncs.com/api/v1/services/embeddings/multimodal-embedding/multimodal-embedding";

/// Multimodal generation endpoint used by the Qwen VLM
pub const DASHSCOPE_MULTIMODAL_GENERATION_URL: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/multimodal-generation/generation";

/// Asynchronous file transcription endpoint used by Aliyun ASR
pub const DASHSCOPE_TRANSCRIPTION_URL: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/audio/asr/transcription";

/// Header enabling DashScope asynchronous task submission
pub const DASHSCOPE_ASYNC_HEADER: &str = "X-DashScope-Async";

/// Default Qwen text embedding model
pub const QWEN_TEXT_EMBEDDING_MODEL: &str = "text-embedding-v4";

/// Default Qwen multimodal embedding model
pub const QWEN_MULTIMODAL_EMBEDDING_MODEL: &str = "multimodal-embedding-v1";

/// Default Qwen VLM model
pub const QWEN_VLM_MODEL: &str = "qwen-vl-max-latest";

/// Default Aliyun ASR model
pub const ALIYUN_ASR_MODEL: &str = "paraformer-v2";

/// Default delay between transcription task polls, in milliseconds
pub const ASR_POLL_INTERVAL_MS: u64 = 1000;

/// Default number of transcription task polls before giving up
///
/// Kept under the pipeline's default 30 s call timeout at the default
/// poll interval; the pipeline timeout bounds the whole ASR call.
pub const ASR_MAX_POLL_ATTEMPTS: u32 = 25;

/// Default language hints passed to Aliyun ASR
pub const ASR_LANGUAGE_HINTS: [&str; 2] = ["zh", "en"];

// ============================================================================
// NULL PROVIDER CONSTANTS
// ============================================================================

/// Null embedding provider dimension (for testing)
pub const EMBEDDING_DIMENSION_NULL: usize = 384;

// ============================================================================
// STORAGE CONSTANTS
// ============================================================================

/// URL scheme of objects held by the memory storage backend
pub const MEMORY_STORAGE_SCHEME: &str = "memory://";

// ============================================================================
// AUDIO CONSTANTS
// ============================================================================

/// Default ffmpeg binary
pub const FFMPEG_BINARY: &str = "ffmpeg";

/// Sample rate expected by the ASR models
pub const AUDIO_SAMPLE_RATE: u32 = 16_000;
