//! Vision-language provider implementations

pub mod null;
pub mod qwen;

pub use null::NullVlmProvider;
pub use qwen::QwenVlmProvider;
