//! ffmpeg audio track extraction
//!
//! Runs `ffmpeg` as a child process and reads mono 16 kHz WAV from its
//! stdout. URLs and absolute paths are handed to ffmpeg as the input; inline
//! payloads are streamed through stdin.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::AudioExtractor;
use mmr_domain::value_objects::MediaRef;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::constants::{AUDIO_SAMPLE_RATE, FFMPEG_BINARY};

/// Audio extractor backed by the ffmpeg binary
#[derive(Debug, Clone)]
pub struct FfmpegAudioExtractor {
    binary: PathBuf,
}

impl FfmpegAudioExtractor {
    /// Use `binary` (a path or a name on `PATH`)
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The ffmpeg binary in use
    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }

    fn arguments(input: &str) -> Vec<String> {
        let rate = AUDIO_SAMPLE_RATE.to_string();
        [
            "-hide_banner", "-loglevel", "error", "-i", input, "-vn", "-ac", "1", "-ar", &rate,
            "-f", "wav", "pipe:1",
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    }
}

impl Default for FfmpegAudioExtractor {
    fn default() -> Self {
        Self::new(FFMPEG_BINARY)
    }
}

/// ffmpeg input argument and optional stdin payload for `video`
fn input_for(video: &MediaRef) -> Result<(String, Option<Vec<u8>>)> {
    let value = video.as_str().trim();
    if let Some(path) = value.strip_prefix("file://") {
        return Ok((path.to_string(), None));
    }
    if value.starts_with("http://") || value.starts_with("https://") || value.starts_with('/') {
        return Ok((value.to_string(), None));
    }
    if video.is_url() {
        return Err(Error::validation(format!(
            "ffmpeg cannot read '{video}'; provide an http(s) URL, a file:// path or inline data"
        )));
    }
    Ok(("pipe:0".to_string(), Some(video.decode_inline()?)))
}

#[async_trait]
impl AudioExtractor for FfmpegAudioExtractor {
    async fn extract_wav(&self, video: &MediaRef) -> Result<Vec<u8>> {
        if video.is_empty() {
            return Err(Error::validation("video reference cannot be empty"));
        }
        let (input, stdin_payload) = input_for(video)?;

        let mut child = Command::new(&self.binary)
            .args(Self::arguments(&input))
            .stdin(if stdin_payload.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                Error::io_with_source(
                    format!("failed to start {}", self.binary.display()),
                    e,
                )
            })?;

        let writer = match (stdin_payload, child.stdin.take()) {
            (Some(payload), Some(mut stdin)) => Some(tokio::spawn(async move {
                // ffmpeg may close stdin early once it has read the header it needs
                let _ = stdin.write_all(&payload).await;
                let _ = stdin.shutdown().await;
            })),
            _ => None,
        };

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| Error::io_with_source("failed to wait for ffmpeg", e))?;
        if let Some(writer) = writer {
            let _ = writer.await;
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::io(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(Error::io("ffmpeg produced no audio"));
        }

        tracing::debug!(bytes = output.stdout.len(), "Audio track extracted");
        Ok(output.stdout)
    }
}
