use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::MediaRef;

/// Extracts the audio track of a video as mono 16 kHz WAV
///
/// Not a registry category: the pipeline receives one instance directly.
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Produce WAV bytes for the audio track of `video`
    async fn extract_wav(&self, video: &MediaRef) -> Result<Vec<u8>>;
}
