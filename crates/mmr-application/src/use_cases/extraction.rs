//! Multimodal extraction pipeline
//!
//! Turns one [`MultiModalData`] into its [`IndexParam`]:
//!
//! ```text
//!   image ──┬─ image_embedding ─────────────────────────────┐
//!           └─ vlm(prompt) ── caption ──┐                   │
//!                                       ├─ text_embedding ──┼─ IndexParam
//!   text ───────────────────────────────┤                   │
//!   video ──┬─ ffmpeg ─ storage ─ asr ──┘                   │
//!           └─ video_embedding ─────────────────────────────┘
//! ```
//!
//! The image and video branches run concurrently. Text embeddings are
//! computed concurrently once captions and transcripts are known and are
//! assembled in the fixed order original text, caption, transcript.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use mmr_domain::constants::{
    CATEGORY_ASR, CATEGORY_IMAGE_EMBEDDING, CATEGORY_STORAGE, CATEGORY_TEXT_EMBEDDING,
    CATEGORY_VIDEO_EMBEDDING, CATEGORY_VLM,
};
use mmr_domain::error::{Error, ErrorKind, Result};
use mmr_domain::ports::providers::AudioExtractor;
use mmr_domain::value_objects::{
    Embedding, IndexParam, MediaRef, Modality, MultiModalData, TextOrigin,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::components::{
    Asr, ComponentManager, ImageEmbedding, Storage, TextEmbedding, VideoEmbedding, Vlm,
};

/// Default per-call timeout, in seconds
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Default caption prompt sent to the VLM
pub const DEFAULT_CAPTION_PROMPT: &str = "Describe this image in detail. Mention the main \
subjects, their actions, the setting and any visible text. Answer in one paragraph.";

/// Default storage prefix for staged audio
pub const DEFAULT_AUDIO_PREFIX: &str = "audio";

/// What to do when one modality of a record fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the record on the first error
    #[default]
    FailFast,
    /// Skip the failing modality, log it and keep the rest
    ///
    /// Configuration and lookup errors still abort: they are not specific
    /// to the record.
    BestEffort,
}

/// Pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Prompt used to caption images
    pub caption_prompt: String,
    /// File holding the caption prompt; takes precedence over `caption_prompt`
    pub caption_prompt_path: Option<PathBuf>,
    /// Partial failure policy
    pub failure_policy: FailurePolicy,
    /// Timeout applied to every remote call, in seconds
    ///
    /// This also bounds a whole ASR transcription, including its polling.
    pub call_timeout_secs: u64,
    /// Storage prefix under which extracted audio is staged for ASR
    pub audio_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            caption_prompt: DEFAULT_CAPTION_PROMPT.to_string(),
            caption_prompt_path: None,
            failure_policy: FailurePolicy::default(),
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            audio_prefix: DEFAULT_AUDIO_PREFIX.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Per-call timeout
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Caption prompt, reading `caption_prompt_path` when set
    pub fn resolve_caption_prompt(&self) -> Result<String> {
        let Some(path) = &self.caption_prompt_path else {
            return Ok(self.caption_prompt.clone());
        };
        let prompt = std::fs::read_to_string(path).map_err(|e| {
            Error::io_with_source(
                format!("failed to read caption prompt {}", path.display()),
                e,
            )
        })?;
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::configuration(
                "pipeline",
                format!("caption prompt file {} is empty", path.display()),
            ));
        }
        Ok(prompt.to_string())
    }
}

struct ImageOutput {
    embedding: Embedding,
    caption: String,
}

struct VideoOutput {
    embedding: Embedding,
    transcript: String,
}

/// Derives an [`IndexParam`] from a multimodal record
///
/// Components are looked up from the manager per call and only for the
/// modalities present, so a text-only record never initialises the image,
/// video, speech or captioning components.
pub struct ExtractionPipeline {
    manager: Arc<ComponentManager>,
    audio: Arc<dyn AudioExtractor>,
    config: PipelineConfig,
    caption_prompt: String,
}

impl ExtractionPipeline {
    /// Create a pipeline
    ///
    /// Fails if `caption_prompt_path` is set but cannot be read.
    pub fn new(
        manager: Arc<ComponentManager>,
        audio: Arc<dyn AudioExtractor>,
        config: PipelineConfig,
    ) -> Result<Self> {
        let caption_prompt = config.resolve_caption_prompt()?;
        Ok(Self {
            manager,
            audio,
            config,
            caption_prompt,
        })
    }

    /// Pipeline settings
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Component manager the pipeline resolves from
    pub fn manager(&self) -> &Arc<ComponentManager> {
        &self.manager
    }

    /// Extract texts and embeddings from `data`
    ///
    /// A record with no modality yields an empty [`IndexParam`]. Dropping
    /// the returned future cancels every in-flight call.
    pub async fn extract(&self, data: &MultiModalData) -> Result<IndexParam> {
        let started = Instant::now();
        let modalities = data.modalities();
        if modalities.is_empty() {
            tracing::debug!("Record has no modality, nothing to extract");
            return Ok(IndexParam::default());
        }

        let image = async {
            match data.image() {
                Some(image) => self.settle(Modality::Image, self.image_branch(image).await),
                None => Ok(None),
            }
        };
        let video = async {
            match data.video() {
                Some(video) => self.settle(Modality::Video, self.video_branch(video).await),
                None => Ok(None),
            }
        };
        let (image, video) = futures::try_join!(image, video)?;

        let mut texts: Vec<(TextOrigin, String)> = Vec::with_capacity(3);
        if let Some(text) = data.text() {
            texts.push((TextOrigin::Original, text.to_string()));
        }
        if let Some(caption) = image.as_ref().map(|i| i.caption.trim()).filter(|c| !c.is_empty()) {
            texts.push((TextOrigin::ImageCaption, caption.to_string()));
        }
        if let Some(transcript) = video
            .as_ref()
            .map(|v| v.transcript.trim())
            .filter(|t| !t.is_empty())
        {
            texts.push((TextOrigin::VideoTranscript, transcript.to_string()));
        }

        let embeddings = self.embed_texts(&texts).await?;

        let mut param = IndexParam::default();
        for ((origin, text), embedding) in texts.into_iter().zip(embeddings) {
            if let Some(embedding) = embedding {
                param.push_text(origin, text, embedding);
            }
        }
        param.image_embedding = image.map(|i| i.embedding);
        param.video_embedding = video.map(|v| v.embedding);

        tracing::info!(
            modalities = ?modalities,
            texts = param.texts.len(),
            has_image_embedding = param.image_embedding.is_some(),
            has_video_embedding = param.video_embedding.is_some(),
            elapsed_ms = elapsed_ms(started),
            "Extraction completed"
        );
        Ok(param)
    }

    /// [`extract`](Self::extract), aborting when `token` is cancelled
    pub async fn extract_with_cancel(
        &self,
        data: &MultiModalData,
        token: &CancellationToken,
    ) -> Result<IndexParam> {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                tracing::info!("Extraction cancelled");
                Err(Error::Cancelled)
            }
            result = self.extract(data) => result,
        }
    }

    /// Extract and store the result in `data.index_param`
    pub async fn extract_into(&self, data: &mut MultiModalData) -> Result<()> {
        data.index_param = self.extract(data).await?;
        Ok(())
    }

    async fn image_branch(&self, image: &MediaRef) -> Result<ImageOutput> {
        let embedder = self.manager.get::<ImageEmbedding>()?;
        let vlm = self.manager.get::<Vlm>()?;

        let embedding = self.timed(
            CATEGORY_IMAGE_EMBEDDING,
            embedder.provider_name(),
            embedder.infer(image),
        );
        let caption = self.timed(
            CATEGORY_VLM,
            vlm.provider_name(),
            vlm.infer(image, &self.caption_prompt),
        );
        let (embedding, caption) = futures::try_join!(embedding, caption)?;
        Ok(ImageOutput { embedding, caption })
    }

    async fn video_branch(&self, video: &MediaRef) -> Result<VideoOutput> {
        let embedder = self.manager.get::<VideoEmbedding>()?;
        let storage = self.manager.get::<Storage>()?;
        let asr = self.manager.get::<Asr>()?;

        let embedding = self.timed(
            CATEGORY_VIDEO_EMBEDDING,
            embedder.provider_name(),
            embedder.infer(video),
        );
        let transcript = async {
            let wav = self
                .timed("audio", "extractor", self.audio.extract_wav(video))
                .await?;
            let name = format!("{}/{}.wav", self.config.audio_prefix, uuid::Uuid::new_v4());
            let url = self
                .timed(
                    CATEGORY_STORAGE,
                    storage.provider_name(),
                    storage.save_bytes(&wav, &name),
                )
                .await?;
            tracing::debug!(bytes = wav.len(), url = %url, "Staged audio for speech recognition");
            let transcript = self
                .timed(CATEGORY_ASR, asr.provider_name(), asr.infer(&MediaRef::new(url)))
                .await;
            if let Err(e) = self
                .timed(CATEGORY_STORAGE, storage.provider_name(), storage.delete(&name))
                .await
            {
                tracing::warn!(name = %name, error = %e, "Failed to remove staged audio");
            }
            transcript
        };
        let (embedding, transcript) = futures::try_join!(embedding, transcript)?;
        Ok(VideoOutput {
            embedding,
            transcript,
        })
    }

    /// One embedding per text, `None` where best-effort skipped a failure
    ///
    /// Identical texts share one call.
    async fn embed_texts(&self, texts: &[(TextOrigin, String)]) -> Result<Vec<Option<Embedding>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let embedder = self
            .manager
            .get::<TextEmbedding>()
            .map_err(|e| Error::extraction(Modality::Text, e))?;

        let mut distinct: Vec<(Modality, &str)> = Vec::with_capacity(texts.len());
        let slots = texts
            .iter()
            .map(|(origin, text)| {
                distinct
                    .iter()
                    .position(|(_, t)| *t == text.as_str())
                    .unwrap_or_else(|| {
                        distinct.push((origin_modality(*origin), text.as_str()));
                        distinct.len() - 1
                    })
            })
            .collect::<Vec<_>>();

        let calls = distinct.iter().map(|(modality, text)| {
            let embedder = Arc::clone(&embedder);
            async move {
                let result = self
                    .timed(
                        CATEGORY_TEXT_EMBEDDING,
                        embedder.provider_name(),
                        embedder.infer(text),
                    )
                    .await;
                self.settle(*modality, result)
            }
        });
        let embeddings = futures::future::try_join_all(calls).await?;

        Ok(slots.into_iter().map(|i| embeddings[i].clone()).collect())
    }

    /// Run one component call under the per-call timeout
    async fn timed<T>(
        &self,
        category: &str,
        implementation: &str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let started = Instant::now();
        let timeout = self.config.call_timeout();
        let result = tokio::time::timeout(timeout, call).await.map_err(|_| {
            Error::inference(
                format!("{category}/{implementation}"),
                format!("call timed out after {}s", timeout.as_secs()),
            )
        })?;
        tracing::debug!(
            category,
            implementation,
            ok = result.is_ok(),
            elapsed_ms = elapsed_ms(started),
            "Component call finished"
        );
        result
    }

    /// Apply the failure policy to the outcome of one modality
    fn settle<T>(&self, modality: Modality, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if self.skippable(&e) => {
                tracing::warn!(modality = %modality, error = %e, "Skipping failed modality");
                Ok(None)
            }
            Err(e) => Err(Error::extraction(modality, e)),
        }
    }

    fn skippable(&self, error: &Error) -> bool {
        self.config.failure_policy == FailurePolicy::BestEffort
            && !matches!(
                error.kind(),
                ErrorKind::Configuration | ErrorKind::NotFound | ErrorKind::Cancelled
            )
    }
}

/// Milliseconds since `started`, saturating at `u64::MAX`
fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn origin_modality(origin: TextOrigin) -> Modality {
    match origin {
        TextOrigin::Original => Modality::Text,
        TextOrigin::ImageCaption => Modality::Image,
        TextOrigin::VideoTranscript => Modality::Video,
    }
}

impl std::fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("manager", &self.manager)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
