//! HTTP Response Utilities
//!
//! Helper functions for processing HTTP responses from model APIs.
//! These are shared utilities, not ports.

use mmr_domain::error::{Error, Result};
use reqwest::{RequestBuilder, Response};
use serde_json::Value;

use crate::constants::CONTENT_TYPE_JSON;

/// Format an inference error for `component`
fn inference_error(component: &str, context: &str, details: &str) -> Error {
    Error::inference(component, format!("{context}: {details}"))
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Send a request, mapping transport failures to inference errors
    pub async fn send(request: RequestBuilder, component: &str) -> Result<Response> {
        request
            .header("Content-Type", CONTENT_TYPE_JSON)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    inference_error(component, "request timed out", &e.to_string())
                } else {
                    inference_error(component, "HTTP request failed", &e.to_string())
                }
            })
    }

    /// Check response status and parse JSON
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `component` - `category/implementation` label for error messages
    pub async fn check_and_parse(response: Response, component: &str) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let code = status.as_u16();

            return Err(match code {
                401 | 403 => inference_error(component, "authentication failed", &error_text),
                429 => inference_error(component, "rate limit exceeded", &error_text),
                500..=599 => {
                    inference_error(component, &format!("server error ({code})"), &error_text)
                }
                _ => inference_error(component, &format!("request failed ({code})"), &error_text),
            });
        }

        response
            .json()
            .await
            .map_err(|e| inference_error(component, "response parse failed", &e.to_string()))
    }

    /// Send a request and parse its JSON response
    pub async fn send_and_parse(request: RequestBuilder, component: &str) -> Result<Value> {
        let response = Self::send(request, component).await?;
        Self::check_and_parse(response, component).await
    }
}

/// Read a float array as an embedding vector
///
/// Non-numeric entries fail the whole vector.
pub fn parse_vector(value: &Value, component: &str) -> Result<Vec<f32>> {
    let items = value.as_array().ok_or_else(|| {
        Error::inference(component, "invalid response format: embedding is not an array")
    })?;
    items
        .iter()
        .map(|v| {
            v.as_f64().map(|f| f as f32).ok_or_else(|| {
                Error::inference(component, "invalid response format: non-numeric embedding value")
            })
        })
        .collect()
}
