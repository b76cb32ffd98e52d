//! Implementation settings parsing
//!
//! Every implementation receives its raw configuration section and turns it
//! into a typed settings struct here. Missing fields fall back to defaults
//! during parsing and are rejected by the implementation's own validation,
//! so the error names the field.

use std::time::Duration;

use mmr_domain::error::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::constants::DEFAULT_TIMEOUT_SECS;

/// Parse a configuration section into `T`
///
/// A null section parses like an empty mapping.
pub fn parse_section<T: DeserializeOwned>(component: &str, section: &Value) -> Result<T> {
    let section = match section {
        Value::Null => json!({}),
        other => other.clone(),
    };
    serde_json::from_value(section)
        .map_err(|e| Error::configuration(component, format!("invalid settings: {e}")))
}

/// Reject a blank required field
pub fn require(component: &str, field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::configuration(component, format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// Build the HTTP client used by one implementation instance
pub fn http_client(component: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::configuration(component, format!("failed to create HTTP client: {e}")))
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Settings shared by the DashScope-hosted Qwen implementations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashScopeSettings {
    /// DashScope API key
    #[serde(default)]
    pub dashscope_api_key: String,
    /// Endpoint URL
    #[serde(default)]
    pub base_url: String,
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Per-request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Output dimension, for models that support choosing one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<usize>,
}

impl DashScopeSettings {
    /// Template section with an empty key
    pub fn template(base_url: &str, model: &str) -> Value {
        json!({
            "dashscope_api_key": "",
            "base_url": base_url,
            "model": model,
            "timeout_secs": DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Parse and validate a section
    ///
    /// Fails with a configuration error naming the first missing field among
    /// `dashscope_api_key`, `base_url` and `model`.
    pub fn from_section(component: &str, section: &Value) -> Result<Self> {
        let mut settings: Self = parse_section(component, section)?;
        settings.dashscope_api_key =
            require(component, "dashscope_api_key", &settings.dashscope_api_key)?;
        settings.base_url = require(component, "base_url", &settings.base_url)?
            .trim_end_matches('/')
            .to_string();
        settings.model = require(component, "model", &settings.model)?;
        if settings.timeout_secs == 0 {
            return Err(Error::configuration(
                component,
                "timeout_secs must be greater than zero",
            ));
        }
        if settings.dimension == Some(0) {
            return Err(Error::configuration(
                component,
                "dimension must be greater than zero",
            ));
        }
        tracing::debug!(
            component,
            api_key_len = settings.dashscope_api_key.len(),
            base_url = %settings.base_url,
            model = %settings.model,
            "DashScope settings validated"
        );
        Ok(settings)
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
