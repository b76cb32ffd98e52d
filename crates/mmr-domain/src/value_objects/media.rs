//! Media references
//!
//! Images and videos travel through the system either as URLs the remote
//! model can fetch, or inline as base64 (optionally wrapped in a `data:` URI).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const URL_SCHEMES: [&str; 4] = ["http://", "https://", "oss://", "file://"];

/// Reference to an image, video or audio payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(String);

impl MediaRef {
    /// Wrap a URL or base64 payload
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Build a `data:` URI reference from raw bytes
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self(format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)))
    }

    /// The raw reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the reference is blank
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// True when the reference is a fetchable URL
    pub fn is_url(&self) -> bool {
        let value = self.0.trim_start();
        URL_SCHEMES.iter().any(|scheme| value.starts_with(scheme))
    }

    /// True when the payload is carried inline
    pub fn is_inline(&self) -> bool {
        !self.is_empty() && !self.is_url()
    }

    /// MIME type declared by a `data:` URI, if any
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        let mime = &rest[..end];
        (!mime.is_empty()).then_some(mime)
    }

    /// Decode an inline payload into bytes
    pub fn decode_inline(&self) -> Result<Vec<u8>> {
        let payload = match self.0.strip_prefix("data:") {
            Some(rest) => rest.split_once(',').map_or(rest, |(_, data)| data),
            None => self.0.as_str(),
        };
        Ok(STANDARD.decode(payload.trim())?)
    }
}

impl From<&str> for MediaRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MediaRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for MediaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_inline() {
            write!(f, "<inline {} bytes>", self.0.len())
        } else {
            f.write_str(&self.0)
        }
    }
}
