use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::MediaRef;

/// Speech recognition capability (`asr` category)
///
/// Receives a reference to already-extracted audio (mono 16 kHz WAV)
/// and returns its transcript.
#[async_trait]
pub trait AsrProvider: Send + Sync {
    /// Transcribe one audio payload
    async fn infer(&self, audio: &MediaRef) -> Result<String>;

    /// Implementation name
    fn provider_name(&self) -> &str;
}
