//! Aliyun ASR Provider
//!
//! Speech recognition through DashScope paraformer file transcription.
//! Transcription is asynchronous on the server side:
//!
//! 1. submit the audio URL as a task (`X-DashScope-Async: enable`)
//! 2. poll `tasks/{task_id}` until it leaves `PENDING`/`RUNNING`
//! 3. fetch the transcript document from the result's `transcription_url`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mmr_application::registry::{ASR_PROVIDERS, ProviderEntry};
use mmr_domain::error::{Error, Result};
use mmr_domain::ports::providers::AsrProvider;
use mmr_domain::value_objects::MediaRef;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::constants::{
    ALIYUN_ASR_MODEL, ASR_LANGUAGE_HINTS, ASR_MAX_POLL_ATTEMPTS, ASR_POLL_INTERVAL_MS,
    DASHSCOPE_ASYNC_HEADER, DASHSCOPE_TRANSCRIPTION_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::utils::{HttpResponseUtils, http_client, parse_section, require};

const COMPONENT: &str = "asr/aliyun";

/// Aliyun ASR settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliyunAsrSettings {
    /// DashScope API key
    pub api_key: String,
    /// Transcription task submission endpoint
    pub base_url: String,
    /// Model name (e.g. "paraformer-v2")
    pub model: String,
    /// Per-request timeout, in seconds
    pub timeout_secs: u64,
    /// Delay between task polls, in milliseconds
    pub poll_interval_ms: u64,
    /// Polls before the task is considered lost
    ///
    /// Inside the extraction pipeline the whole call is also cut off at
    /// `pipeline.call_timeout_secs`.
    pub max_poll_attempts: u32,
    /// Language hints passed to the model
    pub language_hints: Vec<String>,
    /// Task status endpoint; derived from `base_url` when empty
    pub task_url: String,
}

impl Default for AliyunAsrSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            model: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            poll_interval_ms: ASR_POLL_INTERVAL_MS,
            max_poll_attempts: ASR_MAX_POLL_ATTEMPTS,
            language_hints: ASR_LANGUAGE_HINTS.iter().map(ToString::to_string).collect(),
            task_url: String::new(),
        }
    }
}

impl AliyunAsrSettings {
    /// Parse and validate a section
    pub fn from_section(section: &Value) -> Result<Self> {
        let mut settings: Self = parse_section(COMPONENT, section)?;
        settings.api_key = require(COMPONENT, "api_key", &settings.api_key)?;
        settings.base_url = require(COMPONENT, "base_url", &settings.base_url)?
            .trim_end_matches('/')
            .to_string();
        settings.model = require(COMPONENT, "model", &settings.model)?;
        if settings.timeout_secs == 0 || settings.max_poll_attempts == 0 {
            return Err(Error::configuration(
                COMPONENT,
                "timeout_secs and max_poll_attempts must be greater than zero",
            ));
        }
        settings.task_url = match settings.task_url.trim() {
            "" => derive_task_url(&settings.base_url),
            url => url.trim_end_matches('/').to_string(),
        };
        tracing::debug!(
            api_key_len = settings.api_key.len(),
            model = %settings.model,
            task_url = %settings.task_url,
            "Aliyun ASR settings validated"
        );
        Ok(settings)
    }
}

/// `https://host/api/v1/services/...` → `https://host/api/v1/tasks`
fn derive_task_url(base_url: &str) -> String {
    match base_url.find("/api/v1/") {
        Some(at) => format!("{}/api/v1/tasks", &base_url[..at]),
        None => format!("{base_url}/tasks"),
    }
}

/// Aliyun paraformer speech recognition provider
pub struct AliyunAsrProvider {
    settings: AliyunAsrSettings,
    http_client: Client,
}

impl AliyunAsrProvider {
    /// Parse, validate and build from a configuration section
    pub fn from_config(section: &Value) -> Result<Self> {
        let settings = AliyunAsrSettings::from_section(section)?;
        let http_client = http_client(COMPONENT, Duration::from_secs(settings.timeout_secs))?;
        Ok(Self {
            settings,
            http_client,
        })
    }

    /// Default configuration section
    pub fn config_template() -> Value {
        json!({
            "api_key": "",
            "base_url": DASHSCOPE_TRANSCRIPTION_URL,
            "model": ALIYUN_ASR_MODEL,
            "timeout_secs": DEFAULT_TIMEOUT_SECS,
            "poll_interval_ms": ASR_POLL_INTERVAL_MS,
            "max_poll_attempts": ASR_MAX_POLL_ATTEMPTS,
            "language_hints": ASR_LANGUAGE_HINTS,
        })
    }

    fn build(section: &Value) -> Result<Arc<dyn AsrProvider>> {
        Ok(Arc::new(Self::from_config(section)?))
    }

    async fn submit(&self, audio_url: &str) -> Result<String> {
        let payload = json!({
            "model": self.settings.model,
            "input": {"file_urls": [audio_url]},
            "parameters": {"language_hints": self.settings.language_hints},
        });
        let request = self
            .http_client
            .post(&self.settings.base_url)
            .bearer_auth(&self.settings.api_key)
            .header(DASHSCOPE_ASYNC_HEADER, "enable")
            .json(&payload);
        let response = HttpResponseUtils::send_and_parse(request, COMPONENT).await?;

        response["output"]["task_id"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| Error::inference(COMPONENT, "no task_id in submission response"))
    }

    async fn wait_for(&self, task_id: &str) -> Result<Value> {
        let url = format!("{}/{task_id}", self.settings.task_url);
        let interval = Duration::from_millis(self.settings.poll_interval_ms);

        for attempt in 1..=self.settings.max_poll_attempts {
            let request = self.http_client.get(&url).bearer_auth(&self.settings.api_key);
            let response = HttpResponseUtils::send_and_parse(request, COMPONENT).await?;
            let output = &response["output"];

            match output["task_status"].as_str().unwrap_or("UNKNOWN") {
                "SUCCEEDED" => return Ok(output.clone()),
                "PENDING" | "RUNNING" => {
                    tracing::trace!(task_id, attempt, "Transcription task still running");
                    tokio::time::sleep(interval).await;
                }
                status => {
                    let message = output["message"].as_str().unwrap_or("no message");
                    return Err(Error::inference(
                        COMPONENT,
                        format!("transcription task {task_id} {status}: {message}"),
                    ));
                }
            }
        }
        Err(Error::inference(
            COMPONENT,
            format!(
                "transcription task {task_id} not finished after {} polls",
                self.settings.max_poll_attempts
            ),
        ))
    }

    async fn fetch_transcript(&self, output: &Value) -> Result<String> {
        let result = &output["results"][0];
        if let Some(status) = result["subtask_status"].as_str()
            && status != "SUCCEEDED"
        {
            let message = result["message"].as_str().unwrap_or("no message");
            return Err(Error::inference(
                COMPONENT,
                format!("transcription subtask {status}: {message}"),
            ));
        }
        let url = result["transcription_url"].as_str().ok_or_else(|| {
            Error::inference(COMPONENT, "no transcription_url in task result")
        })?;

        let document =
            HttpResponseUtils::send_and_parse(self.http_client.get(url), COMPONENT).await?;
        let transcripts = document["transcripts"]
            .as_array()
            .ok_or_else(|| Error::inference(COMPONENT, "no transcripts in transcription result"))?;
        let text = transcripts
            .iter()
            .filter_map(|t| t["text"].as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(text)
    }
}

#[async_trait]
impl AsrProvider for AliyunAsrProvider {
    async fn infer(&self, audio: &MediaRef) -> Result<String> {
        if audio.is_empty() {
            return Err(Error::validation("audio reference cannot be empty"));
        }
        if !audio.is_url() {
            return Err(Error::validation(
                "aliyun transcription needs a fetchable audio URL, not inline data",
            ));
        }

        let task_id = self.submit(audio.as_str()).await?;
        tracing::debug!(task_id = %task_id, "Transcription task submitted");
        let output = self.wait_for(&task_id).await?;
        let transcript = self.fetch_transcript(&output).await?;
        tracing::debug!(
            task_id = %task_id,
            chars = transcript.chars().count(),
            "Transcription completed"
        );
        Ok(transcript)
    }

    fn provider_name(&self) -> &str {
        "aliyun"
    }
}

#[linkme::distributed_slice(ASR_PROVIDERS)]
static ALIYUN_ASR: ProviderEntry<dyn AsrProvider> = ProviderEntry {
    name: "aliyun",
    description: "Aliyun paraformer file transcription via DashScope",
    config_template: AliyunAsrProvider::config_template,
    factory: AliyunAsrProvider::build,
};
