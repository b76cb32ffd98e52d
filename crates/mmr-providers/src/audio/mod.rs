//! Audio extraction for video transcription

pub mod ffmpeg;

pub use ffmpeg::FfmpegAudioExtractor;
