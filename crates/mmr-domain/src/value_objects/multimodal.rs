//! Multimodal record value objects
//!
//! [`MultiModalData`] is the unit moving through the extraction pipeline.
//! [`IndexParam`] is what the pipeline derives from it.

use serde::{Deserialize, Serialize};

use super::{Embedding, MediaRef};

/// Input modality of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// Plain text
    Text,
    /// Still image
    Image,
    /// Video (with its audio track)
    Video,
}

impl Modality {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an indexed text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOrigin {
    /// Text supplied with the record
    Original,
    /// Caption generated by the VLM from the image
    ImageCaption,
    /// Transcript produced by ASR from the video's audio
    VideoTranscript,
}

/// Texts and embeddings derived from one record, ready for indexing
///
/// `texts`, `text_origins` and `text_embeddings` are parallel arrays, always
/// ordered original text, then image caption, then video transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexParam {
    /// Original and derived texts
    #[serde(default)]
    pub texts: Vec<String>,
    /// Origin of each entry in `texts`
    #[serde(default)]
    pub text_origins: Vec<TextOrigin>,
    /// One embedding per entry in `texts`
    #[serde(default)]
    pub text_embeddings: Vec<Embedding>,
    /// Embedding of the image, if the record had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_embedding: Option<Embedding>,
    /// Embedding of the video, if the record had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_embedding: Option<Embedding>,
}

impl IndexParam {
    /// Append a text together with its embedding
    pub fn push_text(&mut self, origin: TextOrigin, text: String, embedding: Embedding) {
        self.texts.push(text);
        self.text_origins.push(origin);
        self.text_embeddings.push(embedding);
    }

    /// Text of the given origin, if present
    pub fn text_for(&self, origin: TextOrigin) -> Option<&str> {
        self.text_origins
            .iter()
            .position(|o| *o == origin)
            .map(|i| self.texts[i].as_str())
    }

    /// True when nothing was derived
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.image_embedding.is_none() && self.video_embedding.is_none()
    }
}

/// One multimodal record: any combination of text, image and video
///
/// Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiModalData {
    /// Optional text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Optional image URL or inline payload
    #[serde(
        default,
        alias = "image_b64_or_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<MediaRef>,
    /// Optional video URL or inline payload
    #[serde(
        default,
        alias = "video_b64_or_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub video: Option<MediaRef>,
    /// Derived texts and embeddings
    #[serde(default)]
    pub index_param: IndexParam,
}

impl MultiModalData {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the image reference
    pub fn with_image(mut self, image: impl Into<MediaRef>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the video reference
    pub fn with_video(mut self, video: impl Into<MediaRef>) -> Self {
        self.video = Some(video.into());
        self
    }

    /// Non-blank text
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Non-blank image reference
    pub fn image(&self) -> Option<&MediaRef> {
        self.image.as_ref().filter(|m| !m.is_empty())
    }

    /// Non-blank video reference
    pub fn video(&self) -> Option<&MediaRef> {
        self.video.as_ref().filter(|m| !m.is_empty())
    }

    /// Modalities actually present, in canonical order
    pub fn modalities(&self) -> Vec<Modality> {
        let mut present = Vec::with_capacity(3);
        if self.text().is_some() {
            present.push(Modality::Text);
        }
        if self.image().is_some() {
            present.push(Modality::Image);
        }
        if self.video().is_some() {
            present.push(Modality::Video);
        }
        present
    }

    /// True when no modality is present
    pub fn is_empty(&self) -> bool {
        self.modalities().is_empty()
    }
}
